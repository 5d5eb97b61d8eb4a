use crate::{APIResponse, BaseClient};
use calarm_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn sync(&self) -> APIResponse<sync_reminders::APIResponse> {
        self.base
            .post((), "reminders/sync".into(), StatusCode::OK)
            .await
    }

    pub async fn refresh(&self) -> APIResponse<refresh_reminders::APIResponse> {
        self.base
            .post((), "reminders/refresh".into(), StatusCode::OK)
            .await
    }

    pub async fn scheduled(&self) -> APIResponse<get_scheduled_reminders::APIResponse> {
        self.base
            .get("reminders/scheduled".into(), StatusCode::OK)
            .await
    }

    pub async fn cancel_all(&self) -> APIResponse<cancel_all_reminders::APIResponse> {
        self.base
            .delete("reminders/scheduled".into(), StatusCode::OK)
            .await
    }
}
