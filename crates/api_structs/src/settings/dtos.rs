use calarm_domain::{EventReminderOverride, ReminderOffsets, ReminderSettings};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettingsDTO {
    pub user_id: String,
    pub reminder_offsets: Vec<i64>,
    pub default_alarm_sound: String,
    pub morning_mode_enabled: bool,
    pub morning_mode_sound: String,
}

impl ReminderSettingsDTO {
    pub fn new(settings: ReminderSettings) -> Self {
        Self {
            user_id: settings.user_id,
            reminder_offsets: settings.reminder_offsets.into_inner(),
            default_alarm_sound: settings.default_alarm_sound,
            morning_mode_enabled: settings.morning_mode_enabled,
            morning_mode_sound: settings.morning_mode_sound,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventReminderSettingsDTO {
    pub event_id: String,
    /// `null` when the event follows the global settings, an empty list disables reminders
    pub reminder_offsets: Option<Vec<i64>>,
}

impl EventReminderSettingsDTO {
    pub fn new(event_id: String, settings: EventReminderOverride) -> Self {
        Self {
            event_id,
            reminder_offsets: settings
                .offsets()
                .map(|offsets: &ReminderOffsets| offsets.minutes().to_vec()),
        }
    }
}
