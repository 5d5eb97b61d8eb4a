use crate::dtos::{EventReminderSettingsDTO, ReminderSettingsDTO};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub settings: ReminderSettingsDTO,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EventSettingsResponse {
    pub settings: EventReminderSettingsDTO,
}

pub mod get_settings {
    use super::*;

    pub type APIResponse = SettingsResponse;
}

pub mod update_settings {
    use super::*;

    /// Fields that are left out keep their current value
    #[derive(Deserialize, Serialize, Debug, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reminder_offsets: Option<Vec<i64>>,
        pub default_alarm_sound: Option<String>,
        pub morning_mode_enabled: Option<bool>,
        pub morning_mode_sound: Option<String>,
    }

    pub type APIResponse = SettingsResponse;
}

pub mod get_event_settings {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: String,
    }

    pub type APIResponse = EventSettingsResponse;
}

pub mod update_event_settings {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: String,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reminder_offsets: Vec<i64>,
    }

    pub type APIResponse = EventSettingsResponse;
}
