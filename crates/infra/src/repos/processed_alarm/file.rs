use super::{IProcessedAlarmRepo, ProcessedAlarm};
use crate::repos::shared::inmemory_repo::upsert;
use crate::system::ISys;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Persists processed alarms as a JSON file so that alarms stopped before a
/// restart do not ring again. Entries older than the ttl are dropped.
pub struct FileProcessedAlarmRepo {
    path: PathBuf,
    ttl_millis: i64,
    sys: Arc<dyn ISys>,
    processed: Mutex<Vec<ProcessedAlarm>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProcessedAlarmFile {
    id: String,
    processed_at: i64,
}

impl ProcessedAlarmFile {
    fn to_domain(&self) -> ProcessedAlarm {
        ProcessedAlarm {
            alarm_id: self.id.clone(),
            processed_at: self.processed_at,
        }
    }

    fn from_domain(alarm: &ProcessedAlarm) -> Self {
        Self {
            id: alarm.alarm_id.clone(),
            processed_at: alarm.processed_at,
        }
    }
}

async fn read_entries(path: &Path) -> anyhow::Result<Vec<ProcessedAlarm>> {
    let content = match tokio::fs::read(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => {
            return Err(anyhow::Error::new(e))
                .with_context(|| format!("Unable to read {}", path.display()))
        }
    };
    match serde_json::from_slice::<Vec<ProcessedAlarmFile>>(&content) {
        Ok(entries) => Ok(entries.iter().map(|e| e.to_domain()).collect()),
        Err(e) => {
            warn!(
                "Processed alarms file {} is malformed, starting with an empty one. Error message: {:?}",
                path.display(),
                e
            );
            Ok(vec![])
        }
    }
}

impl FileProcessedAlarmRepo {
    pub async fn open(path: PathBuf, ttl_millis: i64, sys: Arc<dyn ISys>) -> anyhow::Result<Self> {
        let entries = read_entries(&path).await?;
        info!(
            "Loaded {} processed alarms from {}",
            entries.len(),
            path.display()
        );
        let repo = Self {
            path,
            ttl_millis,
            sys,
            processed: Mutex::new(entries),
        };
        let mut processed = repo.processed.lock().await;
        repo.prune(&mut processed);
        drop(processed);
        Ok(repo)
    }

    fn prune(&self, processed: &mut Vec<ProcessedAlarm>) {
        let oldest = self.sys.get_timestamp_millis() - self.ttl_millis;
        processed.retain(|p| p.processed_at >= oldest);
    }

    async fn persist(&self, processed: &[ProcessedAlarm]) -> anyhow::Result<()> {
        let entries = processed
            .iter()
            .map(ProcessedAlarmFile::from_domain)
            .collect::<Vec<_>>();
        let content = serde_json::to_vec(&entries)?;

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                tokio::fs::create_dir_all(dir).await?;
            }
        }
        // Write and rename so that a crash never leaves a half written file behind
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, content)
            .await
            .with_context(|| format!("Unable to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Unable to replace {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl IProcessedAlarmRepo for FileProcessedAlarmRepo {
    async fn insert(&self, alarm: &ProcessedAlarm) -> anyhow::Result<()> {
        let mut processed = self.processed.lock().await;
        upsert(alarm, &mut processed);
        self.prune(&mut processed);
        self.persist(&processed).await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<ProcessedAlarm>> {
        let mut processed = self.processed.lock().await;
        self.prune(&mut processed);
        Ok(processed.clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::system::MockSys;

    const HOUR: i64 = 1000 * 60 * 60;

    fn processed(id: &str, processed_at: i64) -> ProcessedAlarm {
        ProcessedAlarm {
            alarm_id: id.into(),
            processed_at,
        }
    }

    #[tokio::test]
    async fn survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed.json");
        let sys = Arc::new(MockSys::new(100 * HOUR));

        let repo = FileProcessedAlarmRepo::open(path.clone(), 24 * HOUR, sys.clone())
            .await
            .unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
        repo.insert(&processed("evt_10", 100 * HOUR)).await.unwrap();
        repo.insert(&processed("evt_10", 100 * HOUR)).await.unwrap();
        repo.insert(&processed("evt_20", 100 * HOUR)).await.unwrap();

        let reopened = FileProcessedAlarmRepo::open(path, 24 * HOUR, sys)
            .await
            .unwrap();
        let ids = reopened
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.alarm_id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["evt_10".to_string(), "evt_20".to_string()]);
    }

    #[tokio::test]
    async fn drops_expired_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed.json");
        let sys = Arc::new(MockSys::new(100 * HOUR));

        let repo = FileProcessedAlarmRepo::open(path.clone(), 24 * HOUR, sys.clone())
            .await
            .unwrap();
        repo.insert(&processed("old", 100 * HOUR)).await.unwrap();
        sys.advance(25 * HOUR);
        repo.insert(&processed("new", 125 * HOUR)).await.unwrap();

        let reopened = FileProcessedAlarmRepo::open(path, 24 * HOUR, sys)
            .await
            .unwrap();
        let all = reopened.find_all().await.unwrap();
        assert_eq!(all, vec![processed("new", 125 * HOUR)]);
    }

    #[tokio::test]
    async fn malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed.json");
        std::fs::write(&path, b"not json").unwrap();

        let repo = FileProcessedAlarmRepo::open(path, 24 * HOUR, Arc::new(MockSys::new(0)))
            .await
            .unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
