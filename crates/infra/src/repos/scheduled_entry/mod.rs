mod inmemory;

use calarm_domain::ScheduledEntry;
pub use inmemory::InMemoryScheduledEntryRepo;

#[derive(Debug, Clone, PartialEq)]
pub enum SaveResult {
    Saved { replaced: Option<ScheduledEntry> },
    /// Every entry was removed after the generation was read, so nothing was written
    Outdated,
}

/// Keeps track of which reminders are scheduled, or already handled.
///
/// Removing all entries starts a new generation. Writers that read the generation
/// before a suspension point use it to avoid writing back entries for schedules
/// that were cancelled in the meantime.
#[async_trait::async_trait]
pub trait IScheduledEntryRepo: Send + Sync {
    async fn generation(&self) -> u64;
    async fn find(&self, reminder_id: &str) -> Option<ScheduledEntry>;
    async fn find_all(&self) -> Vec<ScheduledEntry>;
    async fn save_if_generation(&self, entry: &ScheduledEntry, generation: u64) -> SaveResult;
    async fn delete(&self, reminder_id: &str) -> Option<ScheduledEntry>;
    /// Removes entries that were due before `ts`
    async fn delete_triggered_before(&self, ts: i64) -> Vec<ScheduledEntry>;
    /// Removes every entry and starts a new generation
    async fn delete_all(&self) -> Vec<ScheduledEntry>;
}
