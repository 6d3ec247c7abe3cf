//! Collaborator ports.
//!
//! The batch engine talks to authentication, the calendar, the backend
//! record table and the transaction ledger exclusively through these traits,
//! so the CLI can wire real collaborators and tests can wire in-memory ones.

use crate::destination::CalendarDestination;
use crate::error::ReturnlyResult;
use crate::event::EventDraft;
use crate::record::ReminderRecord;
use crate::transaction::Transaction;
use async_trait::async_trait;

/// An authenticated user session.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
}

/// Authentication collaborator: who is signed in right now.
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn current_session(&self) -> ReturnlyResult<Option<Session>>;
}

/// Device/provider calendar collaborator.
#[async_trait]
pub trait CalendarPort: Send + Sync {
    /// Whether the environment grants event-creation access.
    async fn request_authorization(&self) -> ReturnlyResult<bool>;

    async fn list_calendars(&self) -> ReturnlyResult<Vec<CalendarDestination>>;

    /// Create one event, returning the provider's event id.
    async fn create_event(
        &self,
        destination_id: &str,
        draft: &EventDraft,
    ) -> ReturnlyResult<String>;
}

/// Backend reminder-record collaborator.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append one row. Not idempotent on its own; duplicate avoidance is the
    /// batch orchestrator's job.
    async fn insert(&self, record: &ReminderRecord) -> ReturnlyResult<()>;

    /// Existing rows for a user, used to seed the batch completion set.
    async fn records_for_user(&self, user_id: &str) -> ReturnlyResult<Vec<ReminderRecord>>;
}

/// Transaction ledger collaborator.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn transactions(&self) -> ReturnlyResult<Vec<Transaction>>;
}
