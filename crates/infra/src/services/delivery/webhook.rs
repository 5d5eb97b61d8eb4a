use super::IDeliveryScheduler;
use crate::config::DeliveryWebhookConfig;
use calarm_domain::{DeliveryHandle, NotificationRequest};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::error;

const WEBHOOK_KEY_HEADER: &str = "calarm-webhook-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookNotificationPayload<'a> {
    id: &'a str,
    account_email: &'a str,
    event_start_time: Option<i64>,
    meeting_link: Option<&'a str>,
    snoozed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookNotificationRequest<'a> {
    title: &'a str,
    body: &'a str,
    trigger_ts: i64,
    payload: WebhookNotificationPayload<'a>,
}

impl<'a> WebhookNotificationRequest<'a> {
    fn new(req: &'a NotificationRequest) -> Self {
        Self {
            title: &req.title,
            body: &req.body,
            trigger_ts: req.trigger_ts,
            payload: WebhookNotificationPayload {
                id: &req.payload.id,
                account_email: &req.payload.account_email,
                event_start_time: req.payload.event_start_time,
                meeting_link: req.payload.meeting_link.as_deref(),
                snoozed: req.payload.snoozed,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct WebhookScheduledResponse {
    handle: String,
}

/// Hands notifications over to the host platform which delivers them natively.
/// The host reports deliveries back through the control api.
pub struct WebhookDeliveryScheduler {
    client: Client,
    url: String,
    key: String,
}

impl WebhookDeliveryScheduler {
    pub fn new(config: &DeliveryWebhookConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.url.trim_end_matches('/').to_string(),
            key: config.key.clone(),
        }
    }

    async fn send(&self, method: &str, req: RequestBuilder) -> anyhow::Result<reqwest::Response> {
        match req.header(WEBHOOK_KEY_HEADER, &self.key).send().await {
            Ok(res) => res.error_for_status().map_err(|e| {
                error!(
                    "[Unexpected Response] Delivery webhook {} error. Error message: {:?}",
                    method, e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] Delivery webhook {} error. Error message: {:?}",
                    method, e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }
}

#[async_trait::async_trait]
impl IDeliveryScheduler for WebhookDeliveryScheduler {
    async fn schedule_at(&self, request: NotificationRequest) -> anyhow::Result<DeliveryHandle> {
        let body = WebhookNotificationRequest::new(&request);
        let res = self
            .send(
                "POST",
                self.client
                    .post(format!("{}/notifications", self.url))
                    .json(&body),
            )
            .await?;
        let res = res.json::<WebhookScheduledResponse>().await.map_err(|e| {
            error!(
                "[Unexpected Response] Delivery webhook POST error. Error message: {:?}",
                e
            );
            anyhow::Error::new(e)
        })?;
        Ok(DeliveryHandle::new(res.handle))
    }

    async fn cancel(&self, handle: &DeliveryHandle) {
        let _ = self
            .send(
                "DELETE",
                self.client
                    .delete(format!("{}/notifications/{}", self.url, handle)),
            )
            .await;
    }

    async fn cancel_all(&self) {
        let _ = self
            .send(
                "DELETE",
                self.client.delete(format!("{}/notifications", self.url)),
            )
            .await;
    }
}
