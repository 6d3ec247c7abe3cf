//! Calendar provider subprocess transport.
//!
//! This module handles communication with external provider binaries
//! (e.g., `returnly-provider-local`) using JSON over stdin/stdout.
//!
//! The protocol is language-agnostic: any executable that speaks the JSON
//! protocol can be a provider. Providers manage their own credentials and
//! storage; returnly just names the destination calendar.

use crate::destination::CalendarDestination;
use crate::error::{ReturnlyError, ReturnlyResult};
use crate::event::EventDraft;
use crate::ports::CalendarPort;
use crate::protocol::{
    Command, CreateEvent, ListCalendars, ProviderCommand, Request, RequestAuthorization, Response,
};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// A calendar provider, addressed by name (`local`, `google`, ...).
#[derive(Clone, Debug)]
pub struct Provider(String);

impl Provider {
    pub fn from_name(name: &str) -> Self {
        Provider(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    fn binary_path(&self) -> ReturnlyResult<std::path::PathBuf> {
        let binary_name = format!("returnly-provider-{}", self.0);
        let binary_path = which::which(&binary_name).map_err(|_| {
            ReturnlyError::ProviderNotInstalled(format!(
                "Provider '{}' not found. Install it with:\n  cargo install {}",
                self.0, binary_name
            ))
        })?;
        Ok(binary_path)
    }

    /// Call a typed provider command and return the result.
    ///
    /// The response type is inferred from the command's associated type,
    /// ensuring compile-time type safety.
    pub async fn call<C: ProviderCommand>(&self, cmd: C) -> ReturnlyResult<C::Response> {
        timeout(PROVIDER_TIMEOUT, self.call_raw(C::command(), cmd))
            .await
            .map_err(|_| ReturnlyError::Timeout(PROVIDER_TIMEOUT.as_secs()))?
    }

    /// Low-level call that sends a command with params and deserializes the response.
    async fn call_raw<P: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> ReturnlyResult<R> {
        let params = serde_json::to_value(params)
            .map_err(|e| ReturnlyError::Serialization(e.to_string()))?;
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| ReturnlyError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;

        let mut child = TokioCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .map_err(|e| {
                ReturnlyError::Provider(format!(
                    "Failed to spawn {}: {}",
                    binary_path.display(),
                    e
                ))
            })?;

        // Write request to stdin (unwrap safe: we piped stdin above)
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        // Wait for process and collect output
        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(ReturnlyError::Provider(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.is_empty() {
            return Err(ReturnlyError::Provider(
                "Provider returned no response".into(),
            ));
        }

        let response: Response<R> = serde_json::from_str(&response_str)
            .map_err(|e| ReturnlyError::Provider(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(ReturnlyError::Provider(error)),
        }
    }
}

#[async_trait]
impl CalendarPort for Provider {
    async fn request_authorization(&self) -> ReturnlyResult<bool> {
        self.call(RequestAuthorization {}).await
    }

    async fn list_calendars(&self) -> ReturnlyResult<Vec<CalendarDestination>> {
        self.call(ListCalendars {}).await
    }

    async fn create_event(
        &self,
        destination_id: &str,
        draft: &EventDraft,
    ) -> ReturnlyResult<String> {
        self.call(CreateEvent {
            calendar_id: destination_id.to_string(),
            event: draft.clone(),
        })
        .await
        .map_err(|e| match e {
            // A provider-side rejection of this one event is a creation
            // failure; transport problems keep their own variants.
            ReturnlyError::Provider(msg) => ReturnlyError::CreationFailed(msg),
            other => other,
        })
    }
}
