//! The reminder batch engine.
//!
//! One batch = one pass over the transaction set, attempting reminder
//! creation for every transaction not already covered by a persisted record.
//! Destination resolution happens once up front; per-transaction work then
//! fans out concurrently and failures stay isolated to their own transaction.

use crate::deadline::return_deadline;
use crate::destination::{CalendarDestination, DestinationChooser, resolve_destination};
use crate::error::{ReturnlyError, ReturnlyResult};
use crate::event::EventDraft;
use crate::ports::{CalendarPort, RecordStore, SessionSource, TransactionSource};
use crate::record::ReminderRecord;
use crate::transaction::Transaction;
use chrono::NaiveDate;
use futures::future::join_all;
use std::collections::HashSet;
use std::time::Duration;
use tracing::warn;

/// Upper bound on a single backend persistence call.
const PERSIST_TIMEOUT: Duration = Duration::from_secs(10);

/// The record of one successfully created reminder.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderOutcome {
    pub transaction_id: String,
    pub store: String,
    pub reminder_date: NaiveDate,
}

/// What a batch run produced.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successfully created reminders, in input order.
    pub outcomes: Vec<ReminderOutcome>,
    /// Transactions skipped because a persisted record already covers them.
    pub already_done: usize,
    /// Transactions skipped because of an isolated per-transaction failure.
    pub failed: usize,
    /// True when the user dismissed the calendar choice; nothing was attempted.
    pub cancelled: bool,
}

impl BatchReport {
    /// Every transaction was already covered: not a failure, just nothing to do.
    pub fn nothing_new(&self) -> bool {
        self.outcomes.is_empty() && self.failed == 0 && !self.cancelled
    }
}

/// The batch orchestrator, wired with its collaborators at startup.
pub struct ReminderBatch<'a> {
    pub sessions: &'a dyn SessionSource,
    pub calendar: &'a dyn CalendarPort,
    pub records: &'a dyn RecordStore,
    pub source: &'a dyn TransactionSource,
}

impl ReminderBatch<'_> {
    /// Run one full pass over the transaction set.
    ///
    /// `NotAuthenticated` and `NoWritableCalendar` abort the batch before any
    /// write; every other error is confined to the transaction it hit.
    pub async fn run(&self, chooser: &dyn DestinationChooser) -> ReturnlyResult<BatchReport> {
        // Auth gate: no writes of any kind without a user to attribute them to.
        let session = self
            .sessions
            .current_session()
            .await?
            .ok_or(ReturnlyError::NotAuthenticated)?;
        if session.user_id.is_empty() {
            return Err(ReturnlyError::NotAuthenticated);
        }

        let transactions = self.source.transactions().await?;
        if transactions.is_empty() {
            return Ok(BatchReport::default());
        }

        // The already-covered check is authoritative from the backend, so a
        // fresh process does not re-offer reminders created before it started.
        let existing: HashSet<(String, NaiveDate)> = self
            .records
            .records_for_user(&session.user_id)
            .await?
            .into_iter()
            .map(|r| (r.store, r.last_return_date))
            .collect();

        // Resolve the destination once for the whole batch, ahead of the
        // fan-out. NoWritableCalendar aborts here: there is nowhere to write
        // for any transaction.
        let candidates = self.calendar.list_calendars().await?;
        let destination = match resolve_destination(candidates, chooser)? {
            Some(destination) => destination,
            None => {
                return Ok(BatchReport {
                    cancelled: true,
                    ..BatchReport::default()
                });
            }
        };

        // Claim each (store, deadline) key before the fan-out so two
        // transactions that collapse to the same reminder produce one event,
        // not two. First occurrence in input order wins; the rest count as
        // already covered, even if the first later fails.
        let mut claimed = existing;
        let attempts = transactions.iter().map(|tx| {
            let covered = match return_deadline(tx.transaction_date, tx.return_window_days) {
                Ok(deadline) => !claimed.insert((tx.store.clone(), deadline)),
                Err(_) => false,
            };
            self.attempt(&session.user_id, tx, &destination, covered)
        });
        let results = join_all(attempts).await;

        let mut report = BatchReport::default();
        for (tx, result) in transactions.iter().zip(results) {
            match result {
                Ok(Some(outcome)) => report.outcomes.push(outcome),
                Ok(None) => report.already_done += 1,
                Err(e) => {
                    warn!(transaction = %tx.id, store = %tx.store, error = %e, "skipping transaction");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// Attempt one transaction end to end. `covered` marks transactions the
    /// completion set already accounts for; they are skipped as `Ok(None)`.
    /// Errors are isolated to this transaction by `run`.
    async fn attempt(
        &self,
        user_id: &str,
        tx: &Transaction,
        destination: &CalendarDestination,
        covered: bool,
    ) -> ReturnlyResult<Option<ReminderOutcome>> {
        if covered {
            return Ok(None);
        }

        let deadline = return_deadline(tx.transaction_date, tx.return_window_days)?;

        if !self.calendar.request_authorization().await? {
            return Err(ReturnlyError::PermissionDenied);
        }

        let draft = EventDraft::return_reminder(tx, deadline);
        self.calendar.create_event(&destination.id, &draft).await?;

        let record = ReminderRecord {
            user_id: user_id.to_string(),
            store: tx.store.clone(),
            last_return_date: deadline,
            item_type: tx.item_type.clone(),
        };
        match tokio::time::timeout(PERSIST_TIMEOUT, self.records.insert(&record)).await {
            Ok(result) => result?,
            Err(_) => return Err(ReturnlyError::Timeout(PERSIST_TIMEOUT.as_secs())),
        }

        Ok(Some(ReminderOutcome {
            transaction_id: tx.id.clone(),
            store: tx.store.clone(),
            reminder_date: deadline,
        }))
    }
}
