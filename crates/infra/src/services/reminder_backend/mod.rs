mod inmemory;
mod rest_api;

use calarm_domain::{EventReminderOverride, ReminderInstance, ReminderOffsets, ReminderSettings};
pub use inmemory::InMemoryReminderBackend;
pub use rest_api::ReminderBackendRestApi;

/// The backend that owns calendar data and computes upcoming reminders
#[async_trait::async_trait]
pub trait IReminderBackend: Send + Sync {
    /// Reminders for the next day and the recent past. Malformed entries are left out.
    async fn upcoming_reminders(&self, user_id: &str) -> anyhow::Result<Vec<ReminderInstance>>;
    async fn settings(&self, user_id: &str) -> anyhow::Result<ReminderSettings>;
    async fn update_settings(&self, settings: &ReminderSettings)
        -> anyhow::Result<ReminderSettings>;
    async fn event_settings(&self, event_id: &str) -> anyhow::Result<EventReminderOverride>;
    async fn update_event_settings(
        &self,
        user_id: &str,
        event_id: &str,
        offsets: &ReminderOffsets,
    ) -> anyhow::Result<EventReminderOverride>;
}
