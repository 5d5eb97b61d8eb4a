use crate::dtos::{ScheduledEntryDTO, SyncSummaryDTO};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub summary: SyncSummaryDTO,
}

pub mod sync_reminders {
    use super::*;

    pub type APIResponse = SyncResponse;
}

pub mod refresh_reminders {
    use super::*;

    pub type APIResponse = SyncResponse;
}

pub mod get_scheduled_reminders {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub entries: Vec<ScheduledEntryDTO>,
    }
}

pub mod cancel_all_reminders {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub cancelled: usize,
    }
}
