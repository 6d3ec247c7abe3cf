//! Backend reminder-record client.
//!
//! Talks to the PostgREST-style API that owns the `reminders` table. An
//! explicit handle constructed once at startup and passed into the batch as
//! its `RecordStore` dependency.

use async_trait::async_trait;
use returnly_core::error::{ReturnlyError, ReturnlyResult};
use returnly_core::ports::RecordStore;
use returnly_core::record::ReminderRecord;

pub struct BackendClient {
    base_url: String,
    api_key: String,
    access_token: String,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: &str, api_key: &str, access_token: &str) -> Self {
        BackendClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            access_token: access_token.to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn reminders_url(&self) -> String {
        format!("{}/rest/v1/reminders", self.base_url)
    }
}

#[async_trait]
impl RecordStore for BackendClient {
    async fn insert(&self, record: &ReminderRecord) -> ReturnlyResult<()> {
        let response = self
            .http
            .post(self.reminders_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
            .json(&[record])
            .send()
            .await
            .map_err(|e| ReturnlyError::Persistence(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReturnlyError::Persistence(format!("{status}: {body}")));
        }

        Ok(())
    }

    async fn records_for_user(&self, user_id: &str) -> ReturnlyResult<Vec<ReminderRecord>> {
        let response = self
            .http
            .get(self.reminders_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
            .query(&[
                ("user_id", format!("eq.{user_id}")),
                (
                    "select",
                    "user_id,store,last_return_date,item_type".to_string(),
                ),
            ])
            .send()
            .await
            .map_err(|e| ReturnlyError::Persistence(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReturnlyError::Persistence(format!("{status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| ReturnlyError::Persistence(e.to_string()))
    }
}
