use calarm_domain::{Alarm, TriggerOutcome};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlarmDTO {
    pub id: String,
    pub title: String,
    pub body: String,
    pub account_email: String,
    pub event_id: Option<String>,
    pub sound: Option<String>,
    pub event_start_time: Option<i64>,
    pub meeting_link: Option<String>,
    pub trigger_time: i64,
    /// Start of the event, or the trigger time if the start is unknown
    pub display_time: i64,
    pub snoozed: bool,
}

impl AlarmDTO {
    pub fn new(alarm: Alarm) -> Self {
        Self {
            display_time: alarm.display_time(),
            snoozed: alarm.is_snoozed_copy(),
            id: alarm.id,
            title: alarm.title,
            body: alarm.body,
            account_email: alarm.account_email,
            event_id: alarm.event_id,
            sound: alarm.sound,
            event_start_time: alarm.event_start_time,
            meeting_link: alarm.meeting_link,
            trigger_time: alarm.trigger_time,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TriggerOutcomeDTO {
    /// The alarm is now the current alarm
    Ringing,
    /// The alarm waits behind the current alarm
    Queued,
    AlreadyQueued,
    AlreadyProcessed,
}

impl TriggerOutcomeDTO {
    pub fn new(outcome: TriggerOutcome) -> Self {
        match outcome {
            TriggerOutcome::Enqueued {
                started_ringing: true,
            } => Self::Ringing,
            TriggerOutcome::Enqueued {
                started_ringing: false,
            } => Self::Queued,
            TriggerOutcome::AlreadyQueued => Self::AlreadyQueued,
            TriggerOutcome::AlreadyProcessed => Self::AlreadyProcessed,
        }
    }
}
