use crate::dtos::SyncSummaryDTO;
use serde::{Deserialize, Serialize};

pub mod start_session {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: String,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub user_id: String,
        /// Result of the sync that runs right after signing in
        pub sync: SyncSummaryDTO,
    }
}

pub mod end_session {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub user_id: Option<String>,
        /// Number of scheduled reminders that were cancelled
        pub cancelled: usize,
    }
}
