use std::collections::HashSet;

use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use returnly_core::config::ReturnlyConfig;
use returnly_core::deadline::return_deadline;
use returnly_core::ports::{RecordStore, TransactionSource};
use returnly_core::transaction::FileTransactionSource;

use crate::backend::BackendClient;
use crate::render::Render;
use crate::session::FileSession;

pub async fn run() -> Result<()> {
    let config = ReturnlyConfig::load()?;
    let source = FileTransactionSource::new(config.transactions_path());
    let transactions = source.transactions().await?;

    if transactions.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    // Best effort: when signed in, mark transactions that already have a
    // persisted reminder record.
    let covered = covered_set(&config).await.unwrap_or_default();

    for tx in &transactions {
        let mut line = tx.render();
        // Key on the computed deadline, the same key the batch records under.
        if let Ok(deadline) = return_deadline(tx.transaction_date, tx.return_window_days) {
            if covered.contains(&(tx.store.clone(), deadline)) {
                line.push_str(&format!("  {}", "reminder created".green()));
            }
        }
        println!("{line}");
    }

    Ok(())
}

async fn covered_set(config: &ReturnlyConfig) -> Result<HashSet<(String, NaiveDate)>> {
    let session = FileSession::new(FileSession::default_path()?);
    let Some(data) = session.load()? else {
        return Ok(HashSet::new());
    };

    let (url, key) = config.backend()?;
    let backend = BackendClient::new(url, key, &data.access_token);

    Ok(backend
        .records_for_user(&data.user_id)
        .await?
        .into_iter()
        .map(|r| (r.store, r.last_return_date))
        .collect())
}
