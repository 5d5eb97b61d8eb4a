use crate::dtos::TriggerOutcomeDTO;
use calarm_domain::RawNotification;
use serde::{Deserialize, Serialize};

/// The data attached to a notification when it was scheduled
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDataDTO {
    pub id: Option<String>,
    pub account_email: Option<String>,
    pub event_start_time: Option<i64>,
    pub meeting_link: Option<String>,
    pub snoozed: Option<bool>,
}

/// A notification as reported by the host platform
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEventBody {
    pub title: Option<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub data: NotificationDataDTO,
}

impl From<NotificationEventBody> for RawNotification {
    fn from(e: NotificationEventBody) -> Self {
        Self {
            title: e.title,
            body: e.body,
            id: e.data.id,
            account_email: e.data.account_email,
            event_start_time: e.data.event_start_time,
            meeting_link: e.data.meeting_link,
            snoozed: e.data.snoozed,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEventResponse {
    pub alarm_id: String,
    pub outcome: TriggerOutcomeDTO,
}

pub mod notification_delivered {
    use super::*;

    pub type RequestBody = NotificationEventBody;
    pub type APIResponse = NotificationEventResponse;
}

pub mod notification_tapped {
    use super::*;

    pub type RequestBody = NotificationEventBody;
    pub type APIResponse = NotificationEventResponse;
}
