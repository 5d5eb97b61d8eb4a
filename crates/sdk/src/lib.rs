mod alarm;
mod base;
mod notification;
mod reminder;
mod session;
mod settings;
mod status;

use alarm::AlarmClient;
use notification::NotificationClient;
use reminder::ReminderClient;
use session::SessionClient;
use settings::SettingsClient;
use status::StatusClient;
use std::sync::Arc;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};

pub use calarm_api_structs::{dtos::*, NotificationDataDTO, NotificationEventBody};
pub use reqwest::StatusCode;
pub use settings::{UpdateEventSettingsInput, UpdateSettingsInput};

/// Calarm SDK
///
/// The SDK contains methods for controlling a running calarm engine
/// through its local control API.
#[derive(Clone)]
pub struct CalarmSDK {
    pub alarm: AlarmClient,
    pub notification: NotificationClient,
    pub reminder: ReminderClient,
    pub session: SessionClient,
    pub settings: SettingsClient,
    pub status: StatusClient,
}

impl CalarmSDK {
    pub fn new<T: Into<String>>(address: String, api_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_key(api_key.into());
        let base = Arc::new(base);

        Self {
            alarm: AlarmClient::new(base.clone()),
            notification: NotificationClient::new(base.clone()),
            reminder: ReminderClient::new(base.clone()),
            session: SessionClient::new(base.clone()),
            settings: SettingsClient::new(base.clone()),
            status: StatusClient::new(base),
        }
    }
}
