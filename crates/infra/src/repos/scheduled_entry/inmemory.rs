use super::{IScheduledEntryRepo, SaveResult};
use crate::repos::shared::inmemory_repo::*;
use calarm_domain::ScheduledEntry;
use std::sync::Mutex;

struct Entries {
    generation: u64,
    entries: Vec<ScheduledEntry>,
}

pub struct InMemoryScheduledEntryRepo {
    state: Mutex<Entries>,
}

impl InMemoryScheduledEntryRepo {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(Entries {
                generation: 0,
                entries: vec![],
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Entries> {
        lock(&self.state)
    }
}

impl Default for InMemoryScheduledEntryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IScheduledEntryRepo for InMemoryScheduledEntryRepo {
    async fn generation(&self) -> u64 {
        self.lock().generation
    }

    async fn find(&self, reminder_id: &str) -> Option<ScheduledEntry> {
        find(reminder_id, &self.lock().entries)
    }

    async fn find_all(&self) -> Vec<ScheduledEntry> {
        self.lock().entries.clone()
    }

    async fn save_if_generation(&self, entry: &ScheduledEntry, generation: u64) -> SaveResult {
        let mut state = self.lock();
        if state.generation != generation {
            return SaveResult::Outdated;
        }
        SaveResult::Saved {
            replaced: upsert(entry, &mut state.entries),
        }
    }

    async fn delete(&self, reminder_id: &str) -> Option<ScheduledEntry> {
        delete(reminder_id, &mut self.lock().entries)
    }

    async fn delete_triggered_before(&self, ts: i64) -> Vec<ScheduledEntry> {
        let mut state = self.lock();
        let (deleted, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.entries)
            .into_iter()
            .partition(|e| e.trigger_ts < ts);
        state.entries = kept;
        deleted
    }

    async fn delete_all(&self) -> Vec<ScheduledEntry> {
        let mut state = self.lock();
        state.generation += 1;
        std::mem::take(&mut state.entries)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use calarm_domain::DeliveryHandle;

    fn entry(id: &str, trigger_ts: i64) -> ScheduledEntry {
        ScheduledEntry {
            reminder_id: id.into(),
            trigger_ts,
            meeting_link: None,
            handle: Some(DeliveryHandle::new(format!("h-{}", id))),
        }
    }

    #[tokio::test]
    async fn saves_and_replaces_entries() {
        let repo = InMemoryScheduledEntryRepo::new();
        let gen = repo.generation().await;

        assert_eq!(
            repo.save_if_generation(&entry("r1", 10), gen).await,
            SaveResult::Saved { replaced: None }
        );
        assert_eq!(
            repo.save_if_generation(&entry("r1", 20), gen).await,
            SaveResult::Saved {
                replaced: Some(entry("r1", 10))
            }
        );
        assert_eq!(repo.find("r1").await, Some(entry("r1", 20)));
        assert_eq!(repo.find_all().await.len(), 1);

        assert_eq!(repo.delete("r1").await, Some(entry("r1", 20)));
        assert!(repo.delete("r1").await.is_none());
    }

    #[tokio::test]
    async fn deletes_entries_due_before() {
        let repo = InMemoryScheduledEntryRepo::new();
        let gen = repo.generation().await;
        repo.save_if_generation(&entry("old", 10), gen).await;
        repo.save_if_generation(&entry("new", 30), gen).await;

        let deleted = repo.delete_triggered_before(20).await;
        assert_eq!(deleted, vec![entry("old", 10)]);
        assert_eq!(repo.find_all().await, vec![entry("new", 30)]);
        // Pruning is not a cancellation
        assert_eq!(repo.generation().await, gen);
    }

    #[tokio::test]
    async fn rejects_writes_from_before_delete_all() {
        let repo = InMemoryScheduledEntryRepo::new();
        let gen = repo.generation().await;
        repo.save_if_generation(&entry("r1", 10), gen).await;

        let deleted = repo.delete_all().await;
        assert_eq!(deleted.len(), 1);

        assert_eq!(
            repo.save_if_generation(&entry("r2", 10), gen).await,
            SaveResult::Outdated
        );
        assert!(repo.find_all().await.is_empty());

        let gen = repo.generation().await;
        assert!(matches!(
            repo.save_if_generation(&entry("r2", 10), gen).await,
            SaveResult::Saved { .. }
        ));
    }
}
