use crate::{APIResponse, BaseClient};
use calarm_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct SettingsClient {
    base: Arc<BaseClient>,
}

pub type UpdateSettingsInput = update_settings::RequestBody;

pub struct UpdateEventSettingsInput {
    pub event_id: String,
    pub reminder_offsets: Vec<i64>,
}

impl SettingsClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get(&self) -> APIResponse<get_settings::APIResponse> {
        self.base.get("settings".into(), StatusCode::OK).await
    }

    pub async fn update(
        &self,
        input: UpdateSettingsInput,
    ) -> APIResponse<update_settings::APIResponse> {
        self.base
            .put(input, "settings".into(), StatusCode::OK)
            .await
    }

    pub async fn get_event(&self, event_id: &str) -> APIResponse<get_event_settings::APIResponse> {
        self.base
            .get(format!("events/{}/settings", event_id), StatusCode::OK)
            .await
    }

    pub async fn update_event(
        &self,
        input: UpdateEventSettingsInput,
    ) -> APIResponse<update_event_settings::APIResponse> {
        let body = update_event_settings::RequestBody {
            reminder_offsets: input.reminder_offsets,
        };
        self.base
            .put(
                body,
                format!("events/{}/settings", input.event_id),
                StatusCode::OK,
            )
            .await
    }
}
