use crate::core::errors::LedgerError;
use crate::core::models::ActivityEntry;
use crate::infrastructure::logging::ActivityLog;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryActivityLog {
    logs: Arc<RwLock<Vec<ActivityEntry>>>,
}

impl InMemoryActivityLog {
    pub fn new() -> Self {
        InMemoryActivityLog {
            logs: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ActivityLog for InMemoryActivityLog {
    async fn log_action(&self, action: &str, details: serde_json::Value) -> Result<(), LedgerError> {
        let mut logs = self.logs.write().await;
        logs.push(ActivityEntry {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            details,
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<ActivityEntry>, LedgerError> {
        let logs = self.logs.read().await;
        Ok(logs.clone())
    }
}
