use serde::{Deserialize, Serialize};

/// Reminders that became due longer ago than this are not escalated anymore.
/// This avoids surprising the user with alarms for long past events after e.g.
/// the process having been stopped for hours.
pub const STALE_WINDOW_MILLIS: i64 = 1000 * 60 * 15;

/// Two trigger times closer than this are considered the same schedule. Absorbs
/// jitter between clock reads of the backend and the local device.
pub const DUPLICATE_TOLERANCE_MILLIS: i64 = 1000;

/// Where a reminder is relative to now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderTiming {
    /// Should be delivered later by the delivery scheduler
    Future,
    /// Became due within the stale window and should ring right away
    RecentlyDue,
    /// Too old to be of any use to the user
    Stale,
}

impl ReminderTiming {
    /// `diff_millis` is `remind_at - now`
    pub fn classify(diff_millis: i64) -> Self {
        if diff_millis > 0 {
            Self::Future
        } else if diff_millis >= -STALE_WINDOW_MILLIS {
            Self::RecentlyDue
        } else {
            Self::Stale
        }
    }
}

/// The decision taken for a single `ReminderInstance` during reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleOutcome {
    Scheduled,
    Rescheduled,
    SkippedDuplicate,
    FiredImmediately,
    DiscardedStale,
}

pub fn is_same_trigger_time(ts1: i64, ts2: i64) -> bool {
    (ts1 - ts2).abs() < DUPLICATE_TOLERANCE_MILLIS
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::date::MINUTE_MILLIS;

    #[test]
    fn classifies_reminder_timing() {
        assert_eq!(ReminderTiming::classify(1), ReminderTiming::Future);
        assert_eq!(
            ReminderTiming::classify(5 * MINUTE_MILLIS),
            ReminderTiming::Future
        );
        assert_eq!(ReminderTiming::classify(0), ReminderTiming::RecentlyDue);
        assert_eq!(
            ReminderTiming::classify(-10 * MINUTE_MILLIS),
            ReminderTiming::RecentlyDue
        );
        assert_eq!(
            ReminderTiming::classify(-15 * MINUTE_MILLIS),
            ReminderTiming::RecentlyDue
        );
        assert_eq!(
            ReminderTiming::classify(-15 * MINUTE_MILLIS - 1),
            ReminderTiming::Stale
        );
        assert_eq!(
            ReminderTiming::classify(-20 * MINUTE_MILLIS),
            ReminderTiming::Stale
        );
    }

    #[test]
    fn trigger_time_tolerance() {
        assert!(is_same_trigger_time(1000, 1000));
        assert!(is_same_trigger_time(1000, 1999));
        assert!(is_same_trigger_time(1999, 1000));
        assert!(!is_same_trigger_time(1000, 2000));
        assert!(!is_same_trigger_time(0, 60 * 1000));
    }
}
