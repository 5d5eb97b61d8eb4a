use super::IReminderBackend;
use calarm_domain::{EventReminderOverride, ReminderInstance, ReminderOffsets, ReminderSettings};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct BackendState {
    reminders: Vec<ReminderInstance>,
    settings: HashMap<String, ReminderSettings>,
    event_settings: HashMap<String, ReminderOffsets>,
    unavailable: bool,
    upcoming_calls: usize,
}

/// Backend living in memory, useful for testing
#[derive(Default)]
pub struct InMemoryReminderBackend {
    state: Mutex<BackendState>,
}

impl InMemoryReminderBackend {
    pub fn new() -> Self {
        Default::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_reminders(&self, reminders: Vec<ReminderInstance>) {
        self.lock().reminders = reminders;
    }

    /// Makes every call fail like an unreachable backend would
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Number of times upcoming reminders were requested
    pub fn upcoming_calls(&self) -> usize {
        self.lock().upcoming_calls
    }

    fn check_available(&self) -> anyhow::Result<()> {
        if self.lock().unavailable {
            anyhow::bail!("Reminder backend is unavailable");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl IReminderBackend for InMemoryReminderBackend {
    async fn upcoming_reminders(&self, _user_id: &str) -> anyhow::Result<Vec<ReminderInstance>> {
        self.lock().upcoming_calls += 1;
        self.check_available()?;
        Ok(self.lock().reminders.clone())
    }

    async fn settings(&self, user_id: &str) -> anyhow::Result<ReminderSettings> {
        self.check_available()?;
        Ok(self
            .lock()
            .settings
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| ReminderSettings::new(user_id.to_string())))
    }

    async fn update_settings(
        &self,
        settings: &ReminderSettings,
    ) -> anyhow::Result<ReminderSettings> {
        self.check_available()?;
        self.lock()
            .settings
            .insert(settings.user_id.clone(), settings.clone());
        Ok(settings.clone())
    }

    async fn event_settings(&self, event_id: &str) -> anyhow::Result<EventReminderOverride> {
        self.check_available()?;
        Ok(match self.lock().event_settings.get(event_id) {
            Some(offsets) => EventReminderOverride::Custom(offsets.clone()),
            None => EventReminderOverride::Inherit,
        })
    }

    async fn update_event_settings(
        &self,
        _user_id: &str,
        event_id: &str,
        offsets: &ReminderOffsets,
    ) -> anyhow::Result<EventReminderOverride> {
        self.check_available()?;
        self.lock()
            .event_settings
            .insert(event_id.to_string(), offsets.clone());
        Ok(EventReminderOverride::Custom(offsets.clone()))
    }
}
