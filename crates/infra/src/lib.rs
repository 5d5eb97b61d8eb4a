mod alarms;
mod config;
mod repos;
mod services;
mod session;
mod system;

pub use alarms::{AlarmRuntime, AlarmSnapshot};
pub use config::{Config, DeliveryWebhookConfig};
pub use repos::{
    FileProcessedAlarmRepo, IProcessedAlarmRepo, IScheduledEntryRepo,
    InMemoryProcessedAlarmRepo, InMemoryScheduledEntryRepo, ProcessedAlarm, Repos, SaveResult,
};
pub use services::*;
pub use session::Session;
use std::sync::Arc;
pub use system::{ISys, MockSys, RealSys};
use tracing::{info, warn};

use services::delivery::{
    DeliveryInbox, IDeliveryScheduler, TimerDeliveryScheduler, WebhookDeliveryScheduler,
};
use services::player::AlarmPlayer;
use services::reminder_backend::{IReminderBackend, ReminderBackendRestApi};

#[derive(Clone)]
pub struct CalarmContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub backend: Arc<dyn IReminderBackend>,
    pub delivery: Arc<dyn IDeliveryScheduler>,
    /// Delivery events produced by in-process timers
    pub inbox: Arc<DeliveryInbox>,
    pub alarms: Arc<AlarmRuntime>,
    pub session: Arc<Session>,
}

fn create_delivery(
    config: &Config,
    sys: Arc<dyn ISys>,
    inbox: &DeliveryInbox,
) -> Arc<dyn IDeliveryScheduler> {
    match &config.delivery_webhook {
        Some(webhook) => {
            info!("Delivering notifications through the host at {}", webhook.url);
            Arc::new(WebhookDeliveryScheduler::new(webhook))
        }
        None => Arc::new(TimerDeliveryScheduler::new(sys, inbox.sender())),
    }
}

fn create_player(config: &Config) -> AlarmPlayer {
    #[cfg(feature = "rodio-sound")]
    {
        if let Some(path) = &config.alarm_sound_path {
            match services::player::RodioSound::new(path) {
                Ok(sound) => {
                    let vibrator = Box::new(services::player::NoVibration {});
                    return AlarmPlayer::new(Box::new(sound), vibrator);
                }
                Err(e) => warn!(
                    "Unable to load the alarm sound, alarms will be silent. Error: {:?}",
                    e
                ),
            }
        }
    }
    #[cfg(not(feature = "rodio-sound"))]
    {
        if config.alarm_sound_path.is_some() {
            warn!("CALARM_ALARM_SOUND is set but the rodio-sound feature is not enabled, alarms will be silent.");
        }
    }
    AlarmPlayer::silent()
}

impl CalarmContext {
    async fn create(config: Config) -> anyhow::Result<Self> {
        let sys: Arc<dyn ISys> = Arc::new(RealSys {});
        let repos = Repos::create(&config, sys.clone()).await?;
        let processed = repos
            .processed_alarms
            .find_all()
            .await?
            .into_iter()
            .map(|p| p.alarm_id)
            .collect::<Vec<_>>();
        info!("Restored {} processed alarms", processed.len());

        let inbox = Arc::new(DeliveryInbox::new());
        let delivery = create_delivery(&config, sys.clone(), &inbox);
        let alarms = Arc::new(AlarmRuntime::new(create_player(&config), processed));
        Ok(Self {
            repos,
            backend: Arc::new(ReminderBackendRestApi::new(config.backend_url.clone())),
            delivery,
            inbox,
            alarms,
            session: Arc::new(Session::new(config.user_id.clone())),
            config,
            sys,
        })
    }

    /// Context with in-memory repos, in-process delivery and a silent player
    pub fn create_inmemory() -> Self {
        Self::create_inmemory_with_sys(Arc::new(RealSys {}))
    }

    pub fn create_inmemory_with_sys(sys: Arc<dyn ISys>) -> Self {
        let config = Config::new();
        let inbox = Arc::new(DeliveryInbox::new());
        Self {
            repos: Repos::create_inmemory(),
            backend: Arc::new(ReminderBackendRestApi::new(config.backend_url.clone())),
            delivery: Arc::new(TimerDeliveryScheduler::new(sys.clone(), inbox.sender())),
            inbox,
            alarms: Arc::new(AlarmRuntime::new(AlarmPlayer::silent(), vec![])),
            session: Arc::new(Session::new(None)),
            config,
            sys,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<CalarmContext> {
    CalarmContext::create(Config::new()).await
}
