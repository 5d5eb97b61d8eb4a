use super::{snooze_alarm::SnoozeAlarmUseCase, stop_alarm::StopAlarmUseCase};
use crate::shared::usecase::{Subscriber, UseCase};
use calarm_infra::{CalarmContext, ProcessedAlarm};
use tracing::warn;

/// Writes the ids of alarms the user dealt with through to the processed store
pub struct PersistProcessedAlarm;

impl PersistProcessedAlarm {
    async fn persist(alarm_id: &str, ctx: &CalarmContext) {
        let processed = ProcessedAlarm {
            alarm_id: alarm_id.to_string(),
            processed_at: ctx.sys.get_timestamp_millis(),
        };
        if let Err(e) = ctx.repos.processed_alarms.insert(&processed).await {
            warn!(
                "Unable to persist processed alarm: {}. Error: {:?}",
                alarm_id, e
            );
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Subscriber<StopAlarmUseCase> for PersistProcessedAlarm {
    async fn notify(&self, e: &<StopAlarmUseCase as UseCase>::Response, ctx: &CalarmContext) {
        Self::persist(&e.stopped.id, ctx).await;
    }
}

#[async_trait::async_trait(?Send)]
impl Subscriber<SnoozeAlarmUseCase> for PersistProcessedAlarm {
    async fn notify(&self, e: &<SnoozeAlarmUseCase as UseCase>::Response, ctx: &CalarmContext) {
        Self::persist(&e.snoozed.id, ctx).await;
    }
}
