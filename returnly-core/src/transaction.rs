//! Purchase transactions and the file-backed transaction source.

use crate::deadline::return_deadline;
use crate::error::{ReturnlyError, ReturnlyResult};
use crate::ports::TransactionSource;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A purchase transaction as provided by the ledger collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub store: String,
    pub transaction_date: NaiveDate,
    pub return_window_days: i64,
    /// Precomputed display deadline. `FileTransactionSource` rejects snapshots
    /// where this disagrees with `deadline::return_deadline`.
    pub estimated_return_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}

/// Reads the transaction set from a JSON file on disk.
///
/// Stands in for a real ledger or bank-feed API; the batch engine only ever
/// sees the `TransactionSource` trait.
pub struct FileTransactionSource {
    path: PathBuf,
}

impl FileTransactionSource {
    pub fn new(path: PathBuf) -> Self {
        FileTransactionSource { path }
    }
}

#[async_trait]
impl TransactionSource for FileTransactionSource {
    async fn transactions(&self) -> ReturnlyResult<Vec<Transaction>> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ReturnlyError::Config(format!(
                "Could not read transactions from {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let transactions: Vec<Transaction> = serde_json::from_str(&contents)
            .map_err(|e| ReturnlyError::InvalidInput(format!("Malformed transaction data: {e}")))?;

        // The snapshot carries a precomputed display deadline; reject it when
        // it disagrees with the computed one rather than letting two deadlines
        // circulate. Rows with an invalid window are left for the batch to
        // skip individually.
        for tx in &transactions {
            if let Ok(deadline) = return_deadline(tx.transaction_date, tx.return_window_days) {
                if deadline != tx.estimated_return_date {
                    return Err(ReturnlyError::InvalidInput(format!(
                        "Transaction {}: estimated return date {} does not match {} + {} days",
                        tx.id, tx.estimated_return_date, tx.transaction_date, tx.return_window_days
                    )));
                }
            }
        }

        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = r#"[
        {
            "id": "1",
            "store": "Target",
            "transaction_date": "2025-03-25",
            "return_window_days": 30,
            "estimated_return_date": "2025-04-24",
            "item_type": "Electronics"
        },
        {
            "id": "2",
            "store": "Amazon",
            "transaction_date": "2025-03-20",
            "return_window_days": 30,
            "estimated_return_date": "2025-04-19"
        }
    ]"#;

    #[test]
    fn parses_transaction_set() {
        let transactions: Vec<Transaction> = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].store, "Target");
        assert_eq!(
            transactions[0].transaction_date,
            NaiveDate::from_ymd_opt(2025, 3, 25).unwrap()
        );
        assert_eq!(transactions[0].return_window_days, 30);
        assert_eq!(transactions[0].item_type.as_deref(), Some("Electronics"));
        assert_eq!(transactions[1].item_type, None);
    }

    #[tokio::test]
    async fn reads_transactions_from_file() {
        let path = std::env::temp_dir().join(format!(
            "returnly-transactions-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, SAMPLE).unwrap();

        let source = FileTransactionSource::new(path.clone());
        let transactions = source.transactions().await.unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[1].store, "Amazon");

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_a_config_error() {
        let source = FileTransactionSource::new(PathBuf::from("/nonexistent/transactions.json"));
        let err = source.transactions().await.unwrap_err();
        assert!(matches!(err, ReturnlyError::Config(_)));
    }

    #[tokio::test]
    async fn disagreeing_estimated_return_date_is_rejected() {
        let path = std::env::temp_dir().join(format!(
            "returnly-transactions-skew-{}.json",
            std::process::id()
        ));
        // 2025-03-25 + 30 days is 2025-04-24, not 2025-04-25.
        std::fs::write(
            &path,
            r#"[{
                "id": "1",
                "store": "Target",
                "transaction_date": "2025-03-25",
                "return_window_days": 30,
                "estimated_return_date": "2025-04-25"
            }]"#,
        )
        .unwrap();

        let source = FileTransactionSource::new(path.clone());
        let err = source.transactions().await.unwrap_err();
        assert!(matches!(err, ReturnlyError::InvalidInput(_)));
        assert!(err.to_string().contains("Transaction 1"));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn invalid_window_rows_still_load() {
        let path = std::env::temp_dir().join(format!(
            "returnly-transactions-window-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"[{
                "id": "1",
                "store": "Target",
                "transaction_date": "2025-03-25",
                "return_window_days": -5,
                "estimated_return_date": "2025-04-24"
            }]"#,
        )
        .unwrap();

        let source = FileTransactionSource::new(path.clone());
        let transactions = source.transactions().await.unwrap();
        assert_eq!(transactions.len(), 1);

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn malformed_file_is_invalid_input() {
        let path = std::env::temp_dir().join(format!(
            "returnly-transactions-bad-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ not json").unwrap();

        let source = FileTransactionSource::new(path.clone());
        let err = source.transactions().await.unwrap_err();
        assert!(matches!(err, ReturnlyError::InvalidInput(_)));

        std::fs::remove_file(&path).unwrap();
    }
}
