//! Core types and the reminder batch engine for the returnly ecosystem.
//!
//! This crate provides everything shared between the returnly CLI and
//! calendar provider binaries:
//! - domain types (`Transaction`, `CalendarDestination`, `ReminderRecord`)
//! - the deadline calculator and destination selection
//! - the batch orchestrator (`ReminderBatch`)
//! - the `protocol` module for CLI-provider communication

pub mod batch;
pub mod config;
pub mod deadline;
pub mod destination;
pub mod error;
pub mod event;
pub mod ports;
pub mod protocol;
pub mod provider;
pub mod record;
pub mod transaction;

pub use batch::{BatchReport, ReminderBatch, ReminderOutcome};
pub use error::{ReturnlyError, ReturnlyResult};
