use crate::{APIResponse, BaseClient};
use calarm_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Reports a notification that was shown while the app was in the foreground
    pub async fn delivered(
        &self,
        notification: notification_delivered::RequestBody,
    ) -> APIResponse<notification_delivered::APIResponse> {
        self.base
            .post(
                notification,
                "notifications/delivered".into(),
                StatusCode::OK,
            )
            .await
    }

    /// Reports a notification the user tapped on
    pub async fn tapped(
        &self,
        notification: notification_tapped::RequestBody,
    ) -> APIResponse<notification_tapped::APIResponse> {
        self.base
            .post(notification, "notifications/tapped".into(), StatusCode::OK)
            .await
    }
}
