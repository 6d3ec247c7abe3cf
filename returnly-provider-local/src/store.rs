//! On-disk calendar store.
//!
//! A single JSON file holding every calendar and its events:
//!   ~/.local/share/returnly/calendars.json
//!
//! Seeded with one default writable calendar when the file does not exist.

use anyhow::{Context, Result};
use returnly_core::destination::CalendarDestination;
use returnly_core::event::EventDraft;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CalendarStore {
    calendars: Vec<StoredCalendar>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredCalendar {
    id: String,
    name: String,
    allows_modifications: bool,
    #[serde(default)]
    events: Vec<StoredEvent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredEvent {
    id: String,
    #[serde(flatten)]
    draft: EventDraft,
}

fn store_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .context("Could not determine data directory")?
        .join("returnly");

    Ok(data_dir.join("calendars.json"))
}

fn load() -> Result<CalendarStore> {
    let path = store_path()?;

    if !path.exists() {
        return Ok(default_store());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn save(store: &CalendarStore) -> Result<()> {
    let path = store_path()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let contents =
        serde_json::to_string_pretty(store).context("Failed to serialize calendar store")?;

    std::fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

fn default_store() -> CalendarStore {
    CalendarStore {
        calendars: vec![StoredCalendar {
            id: "personal".to_string(),
            name: "Personal".to_string(),
            allows_modifications: true,
            events: Vec::new(),
        }],
    }
}

pub fn list_calendars() -> Result<Vec<CalendarDestination>> {
    Ok(load()?
        .calendars
        .iter()
        .map(|c| CalendarDestination {
            id: c.id.clone(),
            name: c.name.clone(),
            allows_modifications: c.allows_modifications,
        })
        .collect())
}

pub fn create_event(calendar_id: &str, draft: &EventDraft) -> Result<String> {
    let mut store = load()?;

    let calendar = store
        .calendars
        .iter_mut()
        .find(|c| c.id == calendar_id)
        .with_context(|| format!("Calendar '{}' not found", calendar_id))?;

    if !calendar.allows_modifications {
        anyhow::bail!("Calendar '{}' does not allow modifications", calendar_id);
    }

    let event_id = Uuid::new_v4().to_string();
    calendar.events.push(StoredEvent {
        id: event_id.clone(),
        draft: draft.clone(),
    });
    save(&store)?;

    Ok(event_id)
}
