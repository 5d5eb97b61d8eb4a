use super::IDeliveryScheduler;
use calarm_domain::{DeliveryHandle, NotificationRequest};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Deliveries {
    scheduled: Vec<(DeliveryHandle, NotificationRequest)>,
    cancelled: Vec<DeliveryHandle>,
    cancel_all_calls: usize,
    failing: bool,
    next_handle: usize,
}

/// Records everything it is asked to do and never delivers anything. Useful for testing.
#[derive(Default)]
pub struct InMemoryDeliveryScheduler {
    state: Mutex<Deliveries>,
}

impl InMemoryDeliveryScheduler {
    pub fn new() -> Self {
        Default::default()
    }

    fn lock(&self) -> MutexGuard<'_, Deliveries> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Makes `schedule_at` fail like a platform refusing to schedule would
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Requests that are scheduled and not cancelled
    pub fn active(&self) -> Vec<(DeliveryHandle, NotificationRequest)> {
        let state = self.lock();
        state
            .scheduled
            .iter()
            .filter(|(h, _)| !state.cancelled.contains(h))
            .cloned()
            .collect()
    }

    pub fn scheduled(&self) -> Vec<(DeliveryHandle, NotificationRequest)> {
        self.lock().scheduled.clone()
    }

    pub fn cancelled(&self) -> Vec<DeliveryHandle> {
        self.lock().cancelled.clone()
    }

    pub fn cancel_all_calls(&self) -> usize {
        self.lock().cancel_all_calls
    }
}

#[async_trait::async_trait]
impl IDeliveryScheduler for InMemoryDeliveryScheduler {
    async fn schedule_at(&self, request: NotificationRequest) -> anyhow::Result<DeliveryHandle> {
        let mut state = self.lock();
        if state.failing {
            anyhow::bail!("Unable to schedule notification for: {}", request.payload.id);
        }
        state.next_handle += 1;
        let handle = DeliveryHandle::new(format!("handle-{}", state.next_handle));
        state.scheduled.push((handle.clone(), request));
        Ok(handle)
    }

    async fn cancel(&self, handle: &DeliveryHandle) {
        self.lock().cancelled.push(handle.clone());
    }

    async fn cancel_all(&self) {
        let mut state = self.lock();
        state.cancel_all_calls += 1;
        let handles = state
            .scheduled
            .iter()
            .map(|(h, _)| h.clone())
            .collect::<Vec<_>>();
        for handle in handles {
            if !state.cancelled.contains(&handle) {
                state.cancelled.push(handle);
            }
        }
    }
}
