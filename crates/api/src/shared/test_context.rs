use calarm_infra::{
    delivery::InMemoryDeliveryScheduler,
    player::{AlarmPlayer, PlayerLog, RecordingSound, RecordingVibrator},
    reminder_backend::InMemoryReminderBackend,
    AlarmRuntime, CalarmContext, MockSys,
};
use std::sync::Arc;

/// Sun Feb 21 2021 09:00:00 UTC
pub const NOW: i64 = 1613898000000;
pub const MINUTE: i64 = 1000 * 60;

pub struct TestContext {
    pub ctx: CalarmContext,
    pub sys: Arc<MockSys>,
    pub backend: Arc<InMemoryReminderBackend>,
    pub delivery: Arc<InMemoryDeliveryScheduler>,
    pub player: PlayerLog,
}

/// Context with a fixed clock, recording doubles and a signed in user "u1"
pub fn setup_test_context() -> TestContext {
    let sys = Arc::new(MockSys::new(NOW));
    let backend = Arc::new(InMemoryReminderBackend::new());
    let delivery = Arc::new(InMemoryDeliveryScheduler::new());
    let player = PlayerLog::new();

    let mut ctx = CalarmContext::create_inmemory_with_sys(sys.clone());
    ctx.config.timezone = calarm_domain::Tz::UTC;
    ctx.config.snooze_millis = 5 * MINUTE;
    ctx.backend = backend.clone();
    ctx.delivery = delivery.clone();
    ctx.alarms = Arc::new(AlarmRuntime::new(
        AlarmPlayer::new(
            Box::new(RecordingSound::new(player.clone())),
            Box::new(RecordingVibrator::new(player.clone())),
        ),
        vec![],
    ));
    ctx.session.start("u1".into());

    TestContext {
        ctx,
        sys,
        backend,
        delivery,
        player,
    }
}

pub fn reminder(id: &str, remind_at: i64) -> calarm_domain::ReminderInstance {
    calarm_domain::ReminderInstance {
        id: id.into(),
        event_id: id.split('_').next().unwrap_or(id).into(),
        title: "Standup".into(),
        account_email: "me@example.com".into(),
        meeting_link: None,
        sound: None,
        start_ts: remind_at + 10 * MINUTE,
        remind_at,
        minutes_before: Some(10),
        trigger_immediately: false,
    }
}
