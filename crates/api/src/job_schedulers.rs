use crate::{
    notification::handle_delivery_event::HandleDeliveryEventUseCase,
    reminder::sync_reminders::{SyncRemindersUseCase, SyncTrigger},
    shared::usecase::execute,
};
use actix_web::rt::time::interval;
use calarm_infra::CalarmContext;
use std::time::Duration;
use tracing::{info, warn};

/// Periodically syncs the reminders of the signed in user. The first tick happens
/// right away, which is the sync on startup.
pub fn start_sync_job(ctx: CalarmContext) {
    actix_web::rt::spawn(async move {
        let period = ctx.config.effective_sync_interval_secs();
        info!("Syncing reminders every {} seconds", period);
        let mut interval = interval(Duration::from_secs(period));
        loop {
            interval.tick().await;

            let user_id = match ctx.session.user_id() {
                Some(user_id) => user_id,
                None => continue,
            };
            let usecase = SyncRemindersUseCase {
                user_id,
                trigger: SyncTrigger::Periodic,
            };
            let _ = execute(usecase, &ctx).await;
        }
    });
}

/// Turns notifications delivered by the in-process timers into alarms
pub fn start_delivery_listener(ctx: CalarmContext) {
    let mut receiver = match ctx.inbox.take_receiver() {
        Some(receiver) => receiver,
        None => {
            warn!("The delivery listener was already started");
            return;
        }
    };
    actix_web::rt::spawn(async move {
        while let Some(event) = receiver.recv().await {
            let _ = execute(HandleDeliveryEventUseCase { event }, &ctx).await;
        }
    });
}
