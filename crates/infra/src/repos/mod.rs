mod processed_alarm;
mod scheduled_entry;
mod shared;

use crate::{config::Config, system::ISys};
pub use processed_alarm::{
    FileProcessedAlarmRepo, IProcessedAlarmRepo, InMemoryProcessedAlarmRepo, ProcessedAlarm,
};
pub use scheduled_entry::{IScheduledEntryRepo, InMemoryScheduledEntryRepo, SaveResult};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub scheduled_entries: Arc<dyn IScheduledEntryRepo>,
    pub processed_alarms: Arc<dyn IProcessedAlarmRepo>,
}

impl Repos {
    /// Scheduled entries always live in memory as they describe schedules owned by this process.
    /// Processed alarms are persisted when a store is configured.
    pub async fn create(config: &Config, sys: Arc<dyn ISys>) -> anyhow::Result<Self> {
        let processed_alarms: Arc<dyn IProcessedAlarmRepo> = match &config.processed_store_path {
            Some(path) => {
                info!("Persisting processed alarms in {}", path.display());
                Arc::new(
                    FileProcessedAlarmRepo::open(path.clone(), config.processed_ttl_millis, sys)
                        .await?,
                )
            }
            None => Arc::new(InMemoryProcessedAlarmRepo::new()),
        };
        Ok(Self {
            scheduled_entries: Arc::new(InMemoryScheduledEntryRepo::new()),
            processed_alarms,
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            scheduled_entries: Arc::new(InMemoryScheduledEntryRepo::new()),
            processed_alarms: Arc::new(InMemoryProcessedAlarmRepo::new()),
        }
    }
}
