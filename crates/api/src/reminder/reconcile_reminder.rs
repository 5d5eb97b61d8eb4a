use crate::alarm::trigger_alarm::TriggerAlarmUseCase;
use crate::shared::usecase::{execute, UseCase};
use calarm_domain::{
    Alarm, ReminderInstance, ReminderTiming, ScheduleOutcome, ScheduledEntry, TriggerOutcome,
};
use calarm_infra::{CalarmContext, ProcessedAlarm, SaveResult};
use tracing::{error, info, warn};

/// Makes sure that a single reminder is scheduled exactly once, or rings right away
/// when it became due recently.
#[derive(Debug)]
pub struct ReconcileReminderUseCase {
    pub reminder: ReminderInstance,
    /// Generation of the scheduled entries read before the sync started. Nothing is
    /// written if all schedules were cancelled since then.
    pub generation: u64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    /// Nothing was recorded, so the next sync tries again
    SchedulingFailed(String),
    /// All schedules were cancelled while this reminder was being reconciled
    Cancelled,
}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SchedulingFailed(e) => write!(f, "Scheduling failed: {}", e),
            Self::Cancelled => write!(f, "Cancelled while reconciling"),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ReconcileReminderUseCase {
    type Response = ScheduleOutcome;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();
        let existing = ctx.repos.scheduled_entries.find(&self.reminder.id).await;

        match self.reminder.timing(now) {
            ReminderTiming::Stale => Ok(ScheduleOutcome::DiscardedStale),
            ReminderTiming::Future => self.schedule(existing, ctx).await,
            ReminderTiming::RecentlyDue => {
                self.fire_immediately(existing, now, ctx).await
            }
        }
    }
}

impl ReconcileReminderUseCase {
    async fn schedule(
        &self,
        existing: Option<ScheduledEntry>,
        ctx: &CalarmContext,
    ) -> Result<ScheduleOutcome, UseCaseError> {
        let reminder = &self.reminder;
        if let Some(entry) = &existing {
            if entry.matches(reminder) {
                return Ok(ScheduleOutcome::SkippedDuplicate);
            }
            if let Some(handle) = &entry.handle {
                ctx.delivery.cancel(handle).await;
            }
        }

        let notification = reminder.notification(&ctx.config.timezone);
        let handle = match ctx.delivery.schedule_at(notification).await {
            Ok(handle) => handle,
            Err(e) => {
                error!(
                    "Failed to schedule reminder: {}. Error: {:?}",
                    reminder.id, e
                );
                if existing.is_some() {
                    // The previous schedule was cancelled, so the entry must not claim it anymore
                    ctx.repos.scheduled_entries.delete(&reminder.id).await;
                }
                return Err(UseCaseError::SchedulingFailed(e.to_string()));
            }
        };

        let entry = ScheduledEntry::scheduled(reminder, handle.clone());
        match ctx
            .repos
            .scheduled_entries
            .save_if_generation(&entry, self.generation)
            .await
        {
            SaveResult::Outdated => {
                ctx.delivery.cancel(&handle).await;
                Err(UseCaseError::Cancelled)
            }
            SaveResult::Saved { replaced } => {
                // A concurrent sync might have scheduled the same reminder in the meantime
                let previous_handle = existing.as_ref().and_then(|e| e.handle.as_ref());
                if let Some(concurrent) = replaced.and_then(|e| e.handle) {
                    if Some(&concurrent) != previous_handle {
                        ctx.delivery.cancel(&concurrent).await;
                    }
                }
                info!(
                    "Reminder: {} scheduled at: {}",
                    reminder.id, reminder.remind_at
                );
                Ok(if existing.is_some() {
                    ScheduleOutcome::Rescheduled
                } else {
                    ScheduleOutcome::Scheduled
                })
            }
        }
    }

    async fn fire_immediately(
        &self,
        existing: Option<ScheduledEntry>,
        now: i64,
        ctx: &CalarmContext,
    ) -> Result<ScheduleOutcome, UseCaseError> {
        let reminder = &self.reminder;
        if existing.is_some() {
            return Ok(ScheduleOutcome::SkippedDuplicate);
        }

        let entry = ScheduledEntry::handled(reminder);
        match ctx
            .repos
            .scheduled_entries
            .save_if_generation(&entry, self.generation)
            .await
        {
            SaveResult::Outdated => return Err(UseCaseError::Cancelled),
            SaveResult::Saved {
                replaced: Some(_), ..
            } => return Ok(ScheduleOutcome::SkippedDuplicate),
            SaveResult::Saved { replaced: None } => (),
        }

        // Escalated before a restart
        if ctx.alarms.is_processed(&reminder.id) {
            return Ok(ScheduleOutcome::SkippedDuplicate);
        }

        info!("Reminder: {} is due, ringing right away", reminder.id);
        let alarm = Alarm::missed_reminder(reminder, now, &ctx.config.timezone);
        let outcome = execute(TriggerAlarmUseCase { alarm }, ctx)
            .await
            .unwrap_or(TriggerOutcome::AlreadyQueued);
        if let TriggerOutcome::Enqueued { .. } = outcome {
            let processed = ProcessedAlarm {
                alarm_id: reminder.id.clone(),
                processed_at: now,
            };
            if let Err(e) = ctx.repos.processed_alarms.insert(&processed).await {
                warn!(
                    "Unable to remember escalated reminder: {}. Error: {:?}",
                    reminder.id, e
                );
            }
        }

        Ok(ScheduleOutcome::FiredImmediately)
    }
}
