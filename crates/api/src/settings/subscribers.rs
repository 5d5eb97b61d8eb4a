use super::{
    update_event_settings::UpdateEventSettingsUseCase, update_settings::UpdateSettingsUseCase,
};
use crate::reminder::sync_reminders::{SyncRemindersUseCase, SyncTrigger};
use crate::shared::usecase::{execute, Subscriber, UseCase};
use calarm_infra::CalarmContext;

/// Changed offsets change the upcoming reminders, so they are synced right away
pub struct SyncRemindersOnSettingsChange;

impl SyncRemindersOnSettingsChange {
    async fn sync(ctx: &CalarmContext) {
        if let Some(user_id) = ctx.session.user_id() {
            let usecase = SyncRemindersUseCase {
                user_id,
                trigger: SyncTrigger::OnDemand,
            };
            let _ = execute(usecase, ctx).await;
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateSettingsUseCase> for SyncRemindersOnSettingsChange {
    async fn notify(&self, _: &<UpdateSettingsUseCase as UseCase>::Response, ctx: &CalarmContext) {
        Self::sync(ctx).await;
    }
}

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateEventSettingsUseCase> for SyncRemindersOnSettingsChange {
    async fn notify(
        &self,
        _: &<UpdateEventSettingsUseCase as UseCase>::Response,
        ctx: &CalarmContext,
    ) {
        Self::sync(ctx).await;
    }
}
