use crate::{APIResponse, BaseClient};
use calarm_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AlarmClient {
    base: Arc<BaseClient>,
}

impl AlarmClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get(&self) -> APIResponse<get_alarms::APIResponse> {
        self.base.get("alarms".into(), StatusCode::OK).await
    }

    pub async fn stop(&self) -> APIResponse<stop_alarm::APIResponse> {
        self.base
            .post((), "alarms/stop".into(), StatusCode::OK)
            .await
    }

    pub async fn snooze(&self) -> APIResponse<snooze_alarm::APIResponse> {
        self.base
            .post((), "alarms/snooze".into(), StatusCode::OK)
            .await
    }
}
