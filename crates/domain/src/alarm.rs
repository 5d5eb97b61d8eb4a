use crate::{
    notification::{DeliveredNotification, NotificationPayload, NotificationRequest},
    reminder::ReminderInstance,
    shared::entity::Entity,
};
use chrono_tz::Tz;

const SNOOZE_ID_SEPARATOR: &str = "_snooze_";
pub const MISSED_REMINDER_PREFIX: &str = "Missed Reminder: ";
pub const SNOOZED_PREFIX: &str = "Snoozed: ";

/// An `Alarm` is a reminder that became due and is waiting for the user to
/// stop or snooze it.
#[derive(Debug, Clone, PartialEq)]
pub struct Alarm {
    /// Either the id of the `ReminderInstance` or a snooze id derived from it
    pub id: String,
    pub title: String,
    pub body: String,
    pub account_email: String,
    pub event_id: Option<String>,
    pub sound: Option<String>,
    pub event_start_time: Option<i64>,
    pub meeting_link: Option<String>,
    /// Wall clock time in millis at which the alarm actually fired
    pub trigger_time: i64,
}

impl Entity for Alarm {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Creates the id of a snoozed copy of an alarm. It differs from the original id
/// so that the processed original does not suppress the copy.
pub fn snooze_id(alarm_id: &str, now: i64) -> String {
    format!("{}{}{}", alarm_id, SNOOZE_ID_SEPARATOR, now)
}

/// The id of the reminder an alarm id was originally derived from
pub fn original_alarm_id(alarm_id: &str) -> &str {
    match alarm_id.find(SNOOZE_ID_SEPARATOR) {
        Some(idx) => &alarm_id[..idx],
        None => alarm_id,
    }
}

impl Alarm {
    pub fn from_notification(notification: DeliveredNotification, now: i64) -> Self {
        let DeliveredNotification {
            title,
            body,
            payload,
        } = notification;
        Self {
            id: payload.id,
            title,
            body,
            account_email: payload.account_email,
            event_id: None,
            sound: None,
            event_start_time: payload.event_start_time,
            meeting_link: payload.meeting_link,
            trigger_time: now,
        }
    }

    /// Alarm for a reminder that became due while nothing was scheduled for it
    pub fn missed_reminder(reminder: &ReminderInstance, now: i64, tz: &Tz) -> Self {
        Self {
            id: reminder.id.clone(),
            title: format!("{}{}", MISSED_REMINDER_PREFIX, reminder.title),
            body: reminder.body(tz),
            account_email: reminder.account_email.clone(),
            event_id: Some(reminder.event_id.clone()),
            sound: reminder.sound.clone(),
            event_start_time: Some(reminder.start_ts),
            meeting_link: reminder.meeting_link.clone(),
            trigger_time: now,
        }
    }

    /// The time shown to the user: start of the event if known, otherwise when the alarm fired
    pub fn display_time(&self) -> i64 {
        self.event_start_time.unwrap_or(self.trigger_time)
    }

    pub fn is_snoozed_copy(&self) -> bool {
        self.id.contains(SNOOZE_ID_SEPARATOR)
    }

    /// The notification to schedule when this alarm is snoozed at `now` for `snooze_millis`
    pub fn snooze_notification(&self, now: i64, snooze_millis: i64) -> NotificationRequest {
        let title = if self.title.starts_with(SNOOZED_PREFIX) {
            self.title.clone()
        } else {
            format!("{}{}", SNOOZED_PREFIX, self.title)
        };
        NotificationRequest {
            title,
            body: self.body.clone(),
            payload: NotificationPayload {
                id: snooze_id(&self.id, now),
                account_email: self.account_email.clone(),
                event_start_time: self.event_start_time,
                meeting_link: self.meeting_link.clone(),
                snoozed: true,
            },
            trigger_ts: now + snooze_millis,
        }
    }
}
