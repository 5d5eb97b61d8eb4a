use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt::Display;
use thiserror::Error;
use url::Url;

/// Opaque handle returned by a delivery scheduler which is needed to cancel
/// a scheduled notification later on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryHandle(String);

impl DeliveryHandle {
    pub fn new<T: Into<String>>(handle: T) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DeliveryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The data that has to survive the round trip through the delivery primitive
/// so that a full `Alarm` can be reconstructed when the notification fires.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPayload {
    /// Id of the `Alarm` that should be triggered on delivery
    pub id: String,
    pub account_email: String,
    pub event_start_time: Option<i64>,
    pub meeting_link: Option<String>,
    /// Set on notifications that were created by snoozing an alarm
    pub snoozed: bool,
}

/// A request to deliver a notification at `trigger_ts`
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub payload: NotificationPayload,
    pub trigger_ts: i64,
}

/// Notification data as it arrives from the delivery primitive, before validation.
/// Every field is optional because nothing guarantees what a platform hands back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawNotification {
    pub title: Option<String>,
    pub body: Option<String>,
    pub id: Option<String>,
    pub account_email: Option<String>,
    pub event_start_time: Option<i64>,
    pub meeting_link: Option<String>,
    pub snoozed: Option<bool>,
}

/// A validated notification that was delivered to, or tapped by, the user
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveredNotification {
    pub title: String,
    pub body: String,
    pub payload: NotificationPayload,
}

pub const DEFAULT_ALARM_TITLE: &str = "Alarm";
pub const UNKNOWN_ACCOUNT_EMAIL: &str = "Unknown";

#[derive(Error, Debug, PartialEq)]
pub enum InvalidPayloadError {
    #[error("Notification payload is missing the alarm id")]
    MissingId,
    #[error("Notification payload has an invalid event start time: {0}")]
    InvalidEventStartTime(i64),
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let v = v.trim().to_string();
        if v.is_empty() {
            None
        } else {
            Some(v)
        }
    })
}

/// Meeting links are opened by the UI, so anything that is not a http(s) url is dropped
fn sanitize_meeting_link(link: Option<String>) -> Option<String> {
    non_empty(link).filter(|link| match Url::parse(link) {
        Ok(url) => url.scheme() == "https" || url.scheme() == "http",
        Err(_) => false,
    })
}

impl TryFrom<RawNotification> for DeliveredNotification {
    type Error = InvalidPayloadError;

    fn try_from(raw: RawNotification) -> Result<Self, Self::Error> {
        let id = non_empty(raw.id).ok_or(InvalidPayloadError::MissingId)?;
        if let Some(ts) = raw.event_start_time {
            if ts < 0 {
                return Err(InvalidPayloadError::InvalidEventStartTime(ts));
            }
        }

        Ok(Self {
            title: non_empty(raw.title).unwrap_or_else(|| DEFAULT_ALARM_TITLE.into()),
            body: raw.body.unwrap_or_default(),
            payload: NotificationPayload {
                id,
                account_email: non_empty(raw.account_email)
                    .unwrap_or_else(|| UNKNOWN_ACCOUNT_EMAIL.into()),
                event_start_time: raw.event_start_time,
                meeting_link: sanitize_meeting_link(raw.meeting_link),
                snoozed: raw.snoozed.unwrap_or(false),
            },
        })
    }
}

impl From<NotificationRequest> for DeliveredNotification {
    fn from(req: NotificationRequest) -> Self {
        Self {
            title: req.title,
            body: req.body,
            payload: req.payload,
        }
    }
}

/// Inbound events from the delivery primitive. Both carry the same payload and
/// are turned into an `Alarm` the same way.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryEvent {
    /// The notification was delivered while the app was in the foreground
    Delivered(DeliveredNotification),
    /// The user tapped the notification, possibly relaunching the app
    Tapped(DeliveredNotification),
}

impl DeliveryEvent {
    pub fn notification(&self) -> &DeliveredNotification {
        match self {
            Self::Delivered(n) | Self::Tapped(n) => n,
        }
    }

    pub fn into_notification(self) -> DeliveredNotification {
        match self {
            Self::Delivered(n) | Self::Tapped(n) => n,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn raw() -> RawNotification {
        RawNotification {
            title: Some("Standup".into()),
            body: Some("Standup starts at 09:00".into()),
            id: Some("evt1_10".into()),
            account_email: Some("me@example.com".into()),
            event_start_time: Some(1613898000000),
            meeting_link: Some("https://meet.example.com/abc".into()),
            snoozed: None,
        }
    }

    #[test]
    fn accepts_valid_notification() {
        let n = DeliveredNotification::try_from(raw()).unwrap();
        assert_eq!(n.title, "Standup");
        assert_eq!(n.payload.id, "evt1_10");
        assert_eq!(n.payload.account_email, "me@example.com");
        assert_eq!(
            n.payload.meeting_link,
            Some("https://meet.example.com/abc".to_string())
        );
        assert!(!n.payload.snoozed);
    }

    #[test]
    fn rejects_notification_without_id() {
        let mut r = raw();
        r.id = None;
        assert_eq!(
            DeliveredNotification::try_from(r),
            Err(InvalidPayloadError::MissingId)
        );

        let mut r = raw();
        r.id = Some("   ".into());
        assert_eq!(
            DeliveredNotification::try_from(r),
            Err(InvalidPayloadError::MissingId)
        );
    }

    #[test]
    fn rejects_negative_event_start_time() {
        let mut r = raw();
        r.event_start_time = Some(-5);
        assert_eq!(
            DeliveredNotification::try_from(r),
            Err(InvalidPayloadError::InvalidEventStartTime(-5))
        );
    }

    #[test]
    fn defaults_missing_fields() {
        let r = RawNotification {
            id: Some("r1".into()),
            ..Default::default()
        };
        let n = DeliveredNotification::try_from(r).unwrap();
        assert_eq!(n.title, DEFAULT_ALARM_TITLE);
        assert_eq!(n.body, "");
        assert_eq!(n.payload.account_email, UNKNOWN_ACCOUNT_EMAIL);
        assert_eq!(n.payload.event_start_time, None);
        assert_eq!(n.payload.meeting_link, None);
    }

    #[test]
    fn drops_malformed_meeting_links() {
        for link in &["not a url", "javascript:alert(1)", ""] {
            let mut r = raw();
            r.meeting_link = Some(link.to_string());
            let n = DeliveredNotification::try_from(r).unwrap();
            assert_eq!(n.payload.meeting_link, None);
        }
    }
}
