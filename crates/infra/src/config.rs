use calarm_domain::Tz;
use calarm_utils::create_random_secret;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Where to forward notification requests when the host platform owns delivery
#[derive(Debug, Clone)]
pub struct DeliveryWebhookConfig {
    pub url: String,
    /// Sent in the `calarm-webhook-key` header
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Key that clients of the control api have to provide in the `x-api-key` header
    pub api_key: String,
    /// Port for the application to run on
    pub port: usize,
    /// Base url of the backend that computes upcoming reminders
    pub backend_url: String,
    /// User to start a session for on startup
    pub user_id: Option<String>,
    /// Period of the foreground sync
    pub sync_interval_secs: u64,
    /// When set the coarse `background_sync_interval_secs` period is used instead
    pub low_power: bool,
    pub background_sync_interval_secs: u64,
    pub snooze_millis: i64,
    /// Timezone used when rendering times in alarm bodies
    pub timezone: Tz,
    /// Native delivery through the host. In-process timers are used when absent.
    pub delivery_webhook: Option<DeliveryWebhookConfig>,
    /// File that persists processed alarm ids across restarts
    pub processed_store_path: Option<PathBuf>,
    pub processed_ttl_millis: i64,
    /// Audio file that is looped while an alarm rings
    pub alarm_sound_path: Option<PathBuf>,
}

fn env_or_default<T: FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default value: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn new() -> Self {
        let api_key = match optional_env("CALARM_API_KEY") {
            Some(key) => key,
            None => {
                info!("Did not find CALARM_API_KEY environment variable. Going to create one.");
                let key = create_random_secret(16);
                info!("Api key for the control api was generated and set to: {}", key);
                key
            }
        };

        let delivery_webhook = match (
            optional_env("CALARM_DELIVERY_WEBHOOK_URL"),
            optional_env("CALARM_DELIVERY_WEBHOOK_KEY"),
        ) {
            (Some(url), Some(key)) => Some(DeliveryWebhookConfig { url, key }),
            (Some(_), None) => {
                warn!("CALARM_DELIVERY_WEBHOOK_URL is set without CALARM_DELIVERY_WEBHOOK_KEY, falling back to in-process delivery.");
                None
            }
            _ => None,
        };

        let timezone = match optional_env("CALARM_TIMEZONE") {
            Some(tz) => tz.parse::<Tz>().unwrap_or_else(|_| {
                warn!(
                    "The given CALARM_TIMEZONE: {} is not valid, falling back to UTC.",
                    tz
                );
                Tz::UTC
            }),
            None => Tz::UTC,
        };

        let snooze_minutes: i64 = env_or_default("CALARM_SNOOZE_MINUTES", 5);
        let processed_ttl_hours: i64 = env_or_default("CALARM_PROCESSED_TTL_HOURS", 24);

        Self {
            api_key,
            port: env_or_default("PORT", 5000),
            backend_url: optional_env("CALARM_BACKEND_URL")
                .unwrap_or_else(|| "http://localhost:8000".into()),
            user_id: optional_env("CALARM_USER_ID"),
            sync_interval_secs: env_or_default("CALARM_SYNC_INTERVAL_SECS", 60),
            low_power: env_or_default("CALARM_LOW_POWER", false),
            background_sync_interval_secs: env_or_default(
                "CALARM_BACKGROUND_SYNC_INTERVAL_SECS",
                60 * 15,
            ),
            snooze_millis: snooze_minutes.max(1) * 1000 * 60,
            timezone,
            delivery_webhook,
            processed_store_path: optional_env("CALARM_PROCESSED_STORE").map(PathBuf::from),
            processed_ttl_millis: processed_ttl_hours.max(1) * 1000 * 60 * 60,
            alarm_sound_path: optional_env("CALARM_ALARM_SOUND").map(PathBuf::from),
        }
    }

    /// The period of the periodic sync given the power mode
    pub fn effective_sync_interval_secs(&self) -> u64 {
        let secs = if self.low_power {
            self.background_sync_interval_secs
        } else {
            self.sync_interval_secs
        };
        secs.max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
