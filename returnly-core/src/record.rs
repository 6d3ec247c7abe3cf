//! Persisted reminder records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row in the backend reminder table.
///
/// Created once per successful reminder creation; never mutated or deleted
/// here. Field names match the backend schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderRecord {
    pub user_id: String,
    pub store: String,
    pub last_return_date: NaiveDate,
    #[serde(default)]
    pub item_type: Option<String>,
}
