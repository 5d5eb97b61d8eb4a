mod alarm;
mod alarm_queue;
pub mod date;
mod notification;
mod reminder;
mod scheduled_entry;
mod settings;
mod shared;
mod timing;

pub use alarm::{original_alarm_id, snooze_id, Alarm, MISSED_REMINDER_PREFIX, SNOOZED_PREFIX};
pub use alarm_queue::{AlarmQueue, QueueState, StoppedAlarm, TriggerOutcome};
pub use notification::{
    DeliveredNotification, DeliveryEvent, DeliveryHandle, InvalidPayloadError,
    NotificationPayload, NotificationRequest, RawNotification, DEFAULT_ALARM_TITLE,
    UNKNOWN_ACCOUNT_EMAIL,
};
pub use reminder::ReminderInstance;
pub use scheduled_entry::ScheduledEntry;
pub use settings::{
    EventReminderOverride, InvalidOffsetsError, ReminderOffsets, ReminderSettings,
    DEFAULT_ALARM_SOUND, DEFAULT_REMINDER_OFFSET_MINUTES, MAX_REMINDER_OFFSET_MINUTES,
};
pub use shared::entity::Entity;
pub use timing::{
    is_same_trigger_time, ReminderTiming, ScheduleOutcome, DUPLICATE_TOLERANCE_MILLIS,
    STALE_WINDOW_MILLIS,
};

pub use chrono_tz::Tz;
