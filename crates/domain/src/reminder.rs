use crate::{
    date::format_clock,
    notification::{NotificationPayload, NotificationRequest},
    shared::entity::Entity,
    timing::ReminderTiming,
};
use chrono_tz::Tz;

/// A `ReminderInstance` is one (calendar event, offset) pair computed by the backend.
/// It is read only to this process.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderInstance {
    /// Stable per reminder occurrence. This is not the id of the calendar event,
    /// as one event can have several reminders at different offsets.
    pub id: String,
    /// The calendar event this reminder belongs to
    pub event_id: String,
    pub title: String,
    /// Email of the connected calendar account that owns the event
    pub account_email: String,
    pub meeting_link: Option<String>,
    pub sound: Option<String>,
    /// Start of the calendar event in millis
    pub start_ts: i64,
    /// The timestamp in millis at which the user should be reminded.
    /// This is `start_ts` minus the reminder offset.
    pub remind_at: i64,
    pub minutes_before: Option<i64>,
    /// Hint from the backend that this reminder is already due
    pub trigger_immediately: bool,
}

impl Entity for ReminderInstance {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ReminderInstance {
    /// Where this reminder is relative to `now`.
    ///
    /// The backend clock decides `trigger_immediately`, so a reminder flagged by
    /// the backend is treated as due even if the local clock is slightly behind.
    /// The stale cutoff is always evaluated against the local clock.
    pub fn timing(&self, now: i64) -> ReminderTiming {
        match ReminderTiming::classify(self.remind_at - now) {
            ReminderTiming::Future if self.trigger_immediately => ReminderTiming::RecentlyDue,
            timing => timing,
        }
    }

    pub fn body(&self, tz: &Tz) -> String {
        format!("{} starts at {}", self.title, format_clock(self.start_ts, tz))
    }

    fn payload(&self) -> NotificationPayload {
        NotificationPayload {
            id: self.id.clone(),
            account_email: self.account_email.clone(),
            event_start_time: Some(self.start_ts),
            meeting_link: self.meeting_link.clone(),
            snoozed: false,
        }
    }

    /// The notification that should be delivered at `remind_at`
    pub fn notification(&self, tz: &Tz) -> NotificationRequest {
        NotificationRequest {
            title: self.title.clone(),
            body: self.body(tz),
            payload: self.payload(),
            trigger_ts: self.remind_at,
        }
    }
}
