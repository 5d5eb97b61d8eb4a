use super::{IProcessedAlarmRepo, ProcessedAlarm};
use crate::repos::shared::inmemory_repo::*;
use std::sync::Mutex;

/// Only remembers processed alarms for the lifetime of the process
pub struct InMemoryProcessedAlarmRepo {
    processed: Mutex<Vec<ProcessedAlarm>>,
}

impl InMemoryProcessedAlarmRepo {
    pub fn new() -> Self {
        Self {
            processed: Mutex::new(vec![]),
        }
    }
}

impl Default for InMemoryProcessedAlarmRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IProcessedAlarmRepo for InMemoryProcessedAlarmRepo {
    async fn insert(&self, alarm: &ProcessedAlarm) -> anyhow::Result<()> {
        upsert(alarm, &mut lock(&self.processed));
        Ok(())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<ProcessedAlarm>> {
        Ok(lock(&self.processed).clone())
    }
}
