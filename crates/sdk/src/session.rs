use crate::{APIResponse, BaseClient};
use calarm_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct SessionClient {
    base: Arc<BaseClient>,
}

impl SessionClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn start<T: Into<String>>(
        &self,
        user_id: T,
    ) -> APIResponse<start_session::APIResponse> {
        let body = start_session::RequestBody {
            user_id: user_id.into(),
        };
        self.base.post(body, "session".into(), StatusCode::OK).await
    }

    pub async fn end(&self) -> APIResponse<end_session::APIResponse> {
        self.base.delete("session".into(), StatusCode::OK).await
    }
}
