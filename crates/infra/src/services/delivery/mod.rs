mod inmemory;
mod timer;
mod webhook;

use calarm_domain::{DeliveryEvent, DeliveryHandle, NotificationRequest};
pub use inmemory::InMemoryDeliveryScheduler;
use std::sync::Mutex;
pub use timer::TimerDeliveryScheduler;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::warn;
pub use webhook::WebhookDeliveryScheduler;

/// The primitive that shows a notification at a later point in time
#[async_trait::async_trait]
pub trait IDeliveryScheduler: Send + Sync {
    async fn schedule_at(&self, request: NotificationRequest) -> anyhow::Result<DeliveryHandle>;
    /// Best effort, unknown handles are ignored
    async fn cancel(&self, handle: &DeliveryHandle);
    async fn cancel_all(&self);
}

/// Channel of delivery events produced inside the process. Consumed by a single listener.
pub struct DeliveryInbox {
    sender: UnboundedSender<DeliveryEvent>,
    receiver: Mutex<Option<UnboundedReceiver<DeliveryEvent>>>,
}

impl DeliveryInbox {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            sender,
            receiver: Mutex::new(Some(receiver)),
        }
    }

    pub fn sender(&self) -> UnboundedSender<DeliveryEvent> {
        self.sender.clone()
    }

    pub fn publish(&self, event: DeliveryEvent) {
        if self.sender.send(event).is_err() {
            warn!("Delivery inbox is closed, dropping delivery event");
        }
    }

    /// Hands out the receiving end. Only the first caller gets it.
    pub fn take_receiver(&self) -> Option<UnboundedReceiver<DeliveryEvent>> {
        self.receiver
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }
}

impl Default for DeliveryInbox {
    fn default() -> Self {
        Self::new()
    }
}
