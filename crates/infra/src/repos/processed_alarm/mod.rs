mod file;
mod inmemory;

use calarm_domain::Entity;
pub use file::FileProcessedAlarmRepo;
pub use inmemory::InMemoryProcessedAlarmRepo;

/// An alarm id that must never ring again
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedAlarm {
    pub alarm_id: String,
    /// Timestamp in millis of when the alarm was stopped or escalated
    pub processed_at: i64,
}

impl Entity for ProcessedAlarm {
    fn id(&self) -> &str {
        &self.alarm_id
    }
}

#[async_trait::async_trait]
pub trait IProcessedAlarmRepo: Send + Sync {
    async fn insert(&self, alarm: &ProcessedAlarm) -> anyhow::Result<()>;
    async fn find_all(&self) -> anyhow::Result<Vec<ProcessedAlarm>>;
}
