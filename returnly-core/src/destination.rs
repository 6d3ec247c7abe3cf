//! Destination calendar resolution.

use crate::error::{ReturnlyError, ReturnlyResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar the provider exposes as a possible reminder destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDestination {
    pub id: String,
    pub name: String,
    pub allows_modifications: bool,
}

impl fmt::Display for CalendarDestination {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A single interactive choice among writable calendars.
///
/// Invoked at most once per batch, and only when more than one writable
/// calendar exists. Returning `None` means the user dismissed the prompt
/// without choosing.
pub trait DestinationChooser {
    fn choose(&self, candidates: &[CalendarDestination]) -> ReturnlyResult<Option<usize>>;
}

/// Resolve which calendar reminder events will be written to.
///
/// Zero writable candidates is fatal for the whole batch (there is nowhere to
/// write for any transaction); a single writable candidate is auto-selected
/// without prompting; multiple candidates defer to the chooser.
pub fn resolve_destination(
    candidates: Vec<CalendarDestination>,
    chooser: &dyn DestinationChooser,
) -> ReturnlyResult<Option<CalendarDestination>> {
    let mut writable: Vec<CalendarDestination> = candidates
        .into_iter()
        .filter(|c| c.allows_modifications)
        .collect();

    match writable.len() {
        0 => Err(ReturnlyError::NoWritableCalendar),
        1 => Ok(Some(writable.remove(0))),
        _ => match chooser.choose(&writable)? {
            Some(index) if index < writable.len() => Ok(Some(writable.swap_remove(index))),
            Some(index) => Err(ReturnlyError::InvalidInput(format!(
                "Calendar choice {index} out of range"
            ))),
            None => Ok(None),
        },
    }
}
