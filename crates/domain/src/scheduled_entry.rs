use crate::{
    notification::DeliveryHandle, reminder::ReminderInstance, shared::entity::Entity,
    timing::is_same_trigger_time,
};

/// Bookkeeping of what is currently scheduled, or already handled, for a reminder id.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEntry {
    pub reminder_id: String,
    /// The timestamp in millis the reminder is currently scheduled for
    pub trigger_ts: i64,
    /// Last known meeting link. Used to detect that the same reminder changed content.
    pub meeting_link: Option<String>,
    /// `None` means that the reminder already fired or was escalated directly.
    /// The entry is then only kept to avoid firing it again.
    pub handle: Option<DeliveryHandle>,
}

impl Entity for ScheduledEntry {
    fn id(&self) -> &str {
        &self.reminder_id
    }
}

impl ScheduledEntry {
    pub fn scheduled(reminder: &ReminderInstance, handle: DeliveryHandle) -> Self {
        Self {
            reminder_id: reminder.id.clone(),
            trigger_ts: reminder.remind_at,
            meeting_link: reminder.meeting_link.clone(),
            handle: Some(handle),
        }
    }

    pub fn handled(reminder: &ReminderInstance) -> Self {
        Self {
            reminder_id: reminder.id.clone(),
            trigger_ts: reminder.remind_at,
            meeting_link: reminder.meeting_link.clone(),
            handle: None,
        }
    }

    pub fn is_handled(&self) -> bool {
        self.handle.is_none()
    }

    /// Whether the reminder describes the same scheduled intent as this entry
    pub fn matches(&self, reminder: &ReminderInstance) -> bool {
        is_same_trigger_time(self.trigger_ts, reminder.remind_at)
            && self.meeting_link == reminder.meeting_link
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test::reminder_factory;

    #[test]
    fn matches_same_intent() {
        let reminder = reminder_factory("r1", 100_000);
        let entry = ScheduledEntry::scheduled(&reminder, DeliveryHandle::new("h1"));
        assert!(entry.matches(&reminder));

        let mut jittered = reminder.clone();
        jittered.remind_at += 400;
        assert!(entry.matches(&jittered));
    }

    #[test]
    fn detects_changed_time_or_link() {
        let reminder = reminder_factory("r1", 100_000);
        let entry = ScheduledEntry::scheduled(&reminder, DeliveryHandle::new("h1"));

        let mut moved = reminder.clone();
        moved.remind_at += 60 * 1000;
        assert!(!entry.matches(&moved));

        let mut new_link = reminder.clone();
        new_link.meeting_link = Some("https://meet.example.com/new".into());
        assert!(!entry.matches(&new_link));
    }

    #[test]
    fn handled_entry_has_no_handle() {
        let reminder = reminder_factory("r1", 100_000);
        assert!(ScheduledEntry::handled(&reminder).is_handled());
        assert!(!ScheduledEntry::scheduled(&reminder, DeliveryHandle::new("h")).is_handled());
    }
}
