//! Defines the JSON protocol used for communication between returnly
//! and calendar provider binaries over stdin/stdout.

use crate::destination::CalendarDestination;
use crate::event::EventDraft;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    RequestAuthorization,
    ListCalendars,
    CreateEvent,
}

/// Request sent from returnly to a provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from a provider to returnly.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap()
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::to_string(&Response::<()>::Error {
            error: msg.to_string(),
        })
        .unwrap()
    }
}

/// Ask whether the provider grants event-creation access.
#[derive(Debug, Serialize, Deserialize)]
pub struct RequestAuthorization {}

impl ProviderCommand for RequestAuthorization {
    type Response = bool;
    fn command() -> Command {
        Command::RequestAuthorization
    }
}

/// List the calendars available as reminder destinations.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListCalendars {}

impl ProviderCommand for ListCalendars {
    type Response = Vec<CalendarDestination>;
    fn command() -> Command {
        Command::ListCalendars
    }
}

/// Create one reminder event in a destination calendar.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEvent {
    pub calendar_id: String,
    pub event: EventDraft,
}

impl ProviderCommand for CreateEvent {
    type Response = String; // Provider-assigned event id
    fn command() -> Command {
        Command::CreateEvent
    }
}
