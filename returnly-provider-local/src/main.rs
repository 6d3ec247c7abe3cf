//! returnly-provider-local - file-backed calendar provider for returnly
//!
//! This binary implements the returnly provider protocol, communicating
//! with the CLI via JSON over stdin/stdout. Calendars and their events live
//! in a single JSON file under the user's data directory, which makes it the
//! reference provider implementation and a way to try the CLI without a real
//! calendar account.

mod store;

use returnly_core::event::EventDraft;
use returnly_core::protocol::{Command, Request, Response};
use serde::Deserialize;
use std::io::{self, BufRead, Write};

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Failed to read stdin: {}", e);
                break;
            }
        };

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = Response::error(&format!("Failed to parse request: {}", e));
                writeln!(stdout, "{}", response).unwrap();
                stdout.flush().unwrap();
                continue;
            }
        };

        let response = handle_request(request);

        writeln!(stdout, "{}", response).unwrap();
        stdout.flush().unwrap();
    }
}

fn handle_request(request: Request) -> String {
    match request.command {
        Command::RequestAuthorization => handle_request_authorization(),
        Command::ListCalendars => handle_list_calendars(),
        Command::CreateEvent => handle_create_event(&request.params),
    }
}

fn handle_request_authorization() -> String {
    // The local store is always writable by its owner.
    Response::success(true)
}

fn handle_list_calendars() -> String {
    match store::list_calendars() {
        Ok(calendars) => Response::success(calendars),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}

#[derive(Debug, Deserialize)]
struct CreateEventParams {
    calendar_id: String,
    event: EventDraft,
}

fn handle_create_event(params: &serde_json::Value) -> String {
    let params: CreateEventParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    match store::create_event(&params.calendar_id, &params.event) {
        Ok(event_id) => Response::success(event_id),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}
