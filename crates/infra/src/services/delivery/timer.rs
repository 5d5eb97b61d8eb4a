use super::IDeliveryScheduler;
use crate::system::ISys;
use calarm_domain::{DeliveryEvent, DeliveryHandle, NotificationRequest};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

type Timers = Arc<Mutex<HashMap<DeliveryHandle, JoinHandle<()>>>>;

fn lock(timers: &Timers) -> MutexGuard<'_, HashMap<DeliveryHandle, JoinHandle<()>>> {
    timers.lock().unwrap_or_else(|e| e.into_inner())
}

/// Delivers notifications with in-process timers. Delivered notifications end up
/// in the delivery inbox.
pub struct TimerDeliveryScheduler {
    sys: Arc<dyn ISys>,
    outbox: UnboundedSender<DeliveryEvent>,
    timers: Timers,
}

impl TimerDeliveryScheduler {
    pub fn new(sys: Arc<dyn ISys>, outbox: UnboundedSender<DeliveryEvent>) -> Self {
        Self {
            sys,
            outbox,
            timers: Default::default(),
        }
    }

    /// Number of notifications waiting to be delivered
    pub fn pending(&self) -> usize {
        lock(&self.timers).len()
    }
}

#[async_trait::async_trait]
impl IDeliveryScheduler for TimerDeliveryScheduler {
    async fn schedule_at(&self, request: NotificationRequest) -> anyhow::Result<DeliveryHandle> {
        let handle = DeliveryHandle::new(Uuid::new_v4().to_string());
        let delay_millis = (request.trigger_ts - self.sys.get_timestamp_millis()).max(0) as u64;
        debug!(
            "Scheduling notification for alarm: {} in {} ms",
            request.payload.id, delay_millis
        );

        let timers = Arc::clone(&self.timers);
        let outbox = self.outbox.clone();
        let task_handle = handle.clone();
        // The timer is registered before the task is able to remove itself
        let mut pending = lock(&self.timers);
        let task = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_millis)).await;
            lock(&timers).remove(&task_handle);
            if outbox.send(DeliveryEvent::Delivered(request.into())).is_err() {
                warn!("Delivery inbox is closed, dropping delivered notification");
            }
        });
        pending.insert(handle.clone(), task);

        Ok(handle)
    }

    async fn cancel(&self, handle: &DeliveryHandle) {
        if let Some(task) = lock(&self.timers).remove(handle) {
            task.abort();
        }
    }

    async fn cancel_all(&self) {
        for (_, task) in lock(&self.timers).drain() {
            task.abort();
        }
    }
}
