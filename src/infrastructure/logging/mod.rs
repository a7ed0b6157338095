pub mod in_memory;

use crate::core::errors::LedgerError;
use crate::core::models::ActivityEntry;
use async_trait::async_trait;

/// Records ledger mutations for later inspection.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn log_action(&self, action: &str, details: serde_json::Value) -> Result<(), LedgerError>;
    async fn get_logs(&self) -> Result<Vec<ActivityEntry>, LedgerError>;
}
