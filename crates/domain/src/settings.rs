use thiserror::Error;

/// The backend reminds 30 minutes before an event when a user has not configured anything
pub const DEFAULT_REMINDER_OFFSET_MINUTES: i64 = 30;
pub const MAX_REMINDER_OFFSET_MINUTES: i64 = 60 * 24;
pub const DEFAULT_ALARM_SOUND: &str = "default";

#[derive(Error, Debug, PartialEq)]
pub enum InvalidOffsetsError {
    #[error("Reminder offset {0} is out of range, must be between 0 and {max} minutes", max = MAX_REMINDER_OFFSET_MINUTES)]
    OutOfRange(i64),
}

/// Ordered list of minutes before an event at which the user wants to be reminded.
/// An empty list means no reminders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderOffsets(Vec<i64>);

impl ReminderOffsets {
    /// Validates the offsets and removes duplicates while keeping the order
    pub fn new(offsets: Vec<i64>) -> Result<Self, InvalidOffsetsError> {
        let mut deduped: Vec<i64> = Vec::with_capacity(offsets.len());
        for offset in offsets {
            if !(0..=MAX_REMINDER_OFFSET_MINUTES).contains(&offset) {
                return Err(InvalidOffsetsError::OutOfRange(offset));
            }
            if !deduped.contains(&offset) {
                deduped.push(offset);
            }
        }
        Ok(Self(deduped))
    }

    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn minutes(&self) -> &[i64] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<i64> {
        self.0
    }
}

impl Default for ReminderOffsets {
    fn default() -> Self {
        Self(vec![DEFAULT_REMINDER_OFFSET_MINUTES])
    }
}

/// Global reminder settings of a user
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderSettings {
    pub user_id: String,
    pub reminder_offsets: ReminderOffsets,
    pub default_alarm_sound: String,
    pub morning_mode_enabled: bool,
    pub morning_mode_sound: String,
}

impl ReminderSettings {
    pub fn new(user_id: String) -> Self {
        Self {
            user_id,
            reminder_offsets: Default::default(),
            default_alarm_sound: DEFAULT_ALARM_SOUND.into(),
            morning_mode_enabled: false,
            morning_mode_sound: DEFAULT_ALARM_SOUND.into(),
        }
    }
}

/// Per event override of the reminder offsets.
///
/// Not having an override and overriding with an empty list are different things:
/// the first inherits the global settings, the second disables reminders for the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventReminderOverride {
    Inherit,
    Custom(ReminderOffsets),
}

impl EventReminderOverride {
    pub fn from_offsets(offsets: Option<Vec<i64>>) -> Result<Self, InvalidOffsetsError> {
        match offsets {
            None => Ok(Self::Inherit),
            Some(offsets) => ReminderOffsets::new(offsets).map(Self::Custom),
        }
    }

    pub fn offsets(&self) -> Option<&ReminderOffsets> {
        match self {
            Self::Inherit => None,
            Self::Custom(offsets) => Some(offsets),
        }
    }

    /// The offsets that apply to the event given the global settings
    pub fn effective<'a>(&'a self, global: &'a ReminderOffsets) -> &'a ReminderOffsets {
        match self {
            Self::Inherit => global,
            Self::Custom(offsets) => offsets,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validates_offsets() {
        assert!(ReminderOffsets::new(vec![0, 10, 1440]).is_ok());
        assert_eq!(
            ReminderOffsets::new(vec![10, -1]),
            Err(InvalidOffsetsError::OutOfRange(-1))
        );
        assert_eq!(
            ReminderOffsets::new(vec![1441]),
            Err(InvalidOffsetsError::OutOfRange(1441))
        );
    }

    #[test]
    fn dedups_offsets_keeping_order() {
        let offsets = ReminderOffsets::new(vec![30, 10, 30, 5, 10]).unwrap();
        assert_eq!(offsets.minutes(), &[30, 10, 5]);
    }

    #[test]
    fn default_offsets() {
        assert_eq!(ReminderOffsets::default().minutes(), &[30]);
        assert!(ReminderOffsets::none().is_empty());
        assert_eq!(
            ReminderSettings::new("u1".into()).reminder_offsets.minutes(),
            &[30]
        );
    }

    #[test]
    fn empty_override_differs_from_absent_override() {
        let global = ReminderOffsets::new(vec![15]).unwrap();

        let inherit = EventReminderOverride::from_offsets(None).unwrap();
        assert_eq!(inherit.effective(&global).minutes(), &[15]);
        assert!(inherit.offsets().is_none());

        let disabled = EventReminderOverride::from_offsets(Some(vec![])).unwrap();
        assert!(disabled.effective(&global).is_empty());
        assert!(disabled.offsets().is_some());

        let custom = EventReminderOverride::from_offsets(Some(vec![5, 60])).unwrap();
        assert_eq!(custom.effective(&global).minutes(), &[5, 60]);
    }
}
