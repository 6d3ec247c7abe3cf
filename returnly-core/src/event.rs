//! Reminder event construction.

use crate::transaction::Transaction;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reminder events block a fixed 30 minutes starting at the deadline.
const REMINDER_DURATION_MINUTES: i64 = 30;

/// A calendar event ready to hand to a provider (provider-neutral).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub uid: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub notes: String,
    pub timezone: String,
}

impl EventDraft {
    /// Build the reminder event for one transaction.
    ///
    /// Anchored to UTC midnight on the deadline so the event lands on the
    /// same calendar day regardless of the caller's local offset.
    pub fn return_reminder(transaction: &Transaction, deadline: NaiveDate) -> Self {
        let start = deadline.and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::minutes(REMINDER_DURATION_MINUTES);

        EventDraft {
            uid: Uuid::new_v4().to_string(),
            title: format!("Last day to return {} purchase", transaction.store),
            start,
            end,
            notes: format!(
                "Return window ends for your purchase at {}",
                transaction.store
            ),
            timezone: "UTC".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction() -> Transaction {
        Transaction {
            id: "1".to_string(),
            store: "Target".to_string(),
            transaction_date: NaiveDate::from_ymd_opt(2025, 3, 25).unwrap(),
            return_window_days: 30,
            estimated_return_date: NaiveDate::from_ymd_opt(2025, 4, 24).unwrap(),
            item_type: Some("Electronics".to_string()),
        }
    }

    #[test]
    fn reminder_references_the_store() {
        let deadline = NaiveDate::from_ymd_opt(2025, 4, 24).unwrap();
        let draft = EventDraft::return_reminder(&transaction(), deadline);

        assert_eq!(draft.title, "Last day to return Target purchase");
        assert_eq!(draft.notes, "Return window ends for your purchase at Target");
    }

    #[test]
    fn reminder_starts_at_utc_midnight_and_lasts_30_minutes() {
        let deadline = NaiveDate::from_ymd_opt(2025, 4, 24).unwrap();
        let draft = EventDraft::return_reminder(&transaction(), deadline);

        assert_eq!(draft.start.to_rfc3339(), "2025-04-24T00:00:00+00:00");
        assert_eq!(draft.end - draft.start, Duration::minutes(30));
        assert_eq!(draft.timezone, "UTC");
    }

    #[test]
    fn each_draft_gets_a_fresh_uid() {
        let deadline = NaiveDate::from_ymd_opt(2025, 4, 24).unwrap();
        let a = EventDraft::return_reminder(&transaction(), deadline);
        let b = EventDraft::return_reminder(&transaction(), deadline);
        assert_ne!(a.uid, b.uid);
    }
}
