use crate::dtos::AlarmDTO;
use serde::{Deserialize, Serialize};

pub mod get_alarms {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub current: Option<AlarmDTO>,
        /// Every queued alarm including the current one, in trigger order
        pub queue: Vec<AlarmDTO>,
        pub ringing: bool,
        pub audible: bool,
    }
}

pub mod stop_alarm {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub stopped: AlarmDTO,
        /// The alarm that is ringing now, if more alarms were queued
        pub current: Option<AlarmDTO>,
    }
}

pub mod snooze_alarm {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub snoozed: AlarmDTO,
        /// Id of the alarm that will ring when the snooze is over
        pub snooze_id: String,
        pub snoozed_until: i64,
        pub current: Option<AlarmDTO>,
    }
}
