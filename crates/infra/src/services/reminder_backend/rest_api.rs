use super::IReminderBackend;
use calarm_domain::{
    date::{parse_timestamp_millis, MINUTE_MILLIS},
    EventReminderOverride, ReminderInstance, ReminderOffsets, ReminderSettings,
    DEFAULT_ALARM_SOUND, UNKNOWN_ACCOUNT_EMAIL,
};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

#[derive(Debug, Deserialize)]
pub struct BackendReminder {
    pub id: String,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub start_time: Option<String>,
    pub reminder_time: String,
    #[serde(default)]
    pub minutes_before: Option<i64>,
    #[serde(default)]
    pub sound: Option<String>,
    #[serde(default)]
    pub account_email: Option<String>,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub trigger_immediately: bool,
}

impl BackendReminder {
    /// `None` if the reminder time can not be understood
    fn into_domain(self) -> Option<ReminderInstance> {
        let remind_at = parse_timestamp_millis(&self.reminder_time)?;
        // All day events come with a plain date as start time
        let start_ts = self
            .start_time
            .as_deref()
            .and_then(parse_timestamp_millis)
            .unwrap_or_else(|| remind_at + self.minutes_before.unwrap_or(0) * MINUTE_MILLIS);
        Some(ReminderInstance {
            event_id: self.event_id.unwrap_or_else(|| self.id.clone()),
            id: self.id,
            title: self.title.unwrap_or_default(),
            account_email: self
                .account_email
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| UNKNOWN_ACCOUNT_EMAIL.into()),
            meeting_link: self.meeting_link.filter(|l| !l.is_empty()),
            sound: self.sound,
            start_ts,
            remind_at,
            minutes_before: self.minutes_before,
            trigger_immediately: self.trigger_immediately,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpcomingRemindersResponse {
    /// Decoded one by one so that a malformed reminder does not hide the others
    #[serde(default)]
    pub reminders: Vec<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

fn default_sound() -> String {
    DEFAULT_ALARM_SOUND.into()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BackendSettings {
    pub user_id: String,
    #[serde(default)]
    pub global_reminder_offset_minutes: Option<i64>,
    #[serde(default)]
    pub reminder_offsets: Option<Vec<i64>>,
    #[serde(default = "default_sound")]
    pub default_alarm_sound: String,
    #[serde(default)]
    pub morning_mode_enabled: Option<bool>,
    #[serde(default)]
    pub morning_mode_sound: Option<String>,
}

impl BackendSettings {
    fn into_domain(self) -> ReminderSettings {
        let offsets = match self.reminder_offsets {
            Some(offsets) if !offsets.is_empty() => Some(offsets),
            _ => self.global_reminder_offset_minutes.map(|o| vec![o]),
        };
        let reminder_offsets = match offsets.map(ReminderOffsets::new) {
            Some(Ok(offsets)) => offsets,
            Some(Err(e)) => {
                warn!(
                    "Backend returned invalid reminder offsets for user: {}, using the defaults. Error: {}",
                    self.user_id, e
                );
                ReminderOffsets::default()
            }
            None => ReminderOffsets::default(),
        };
        ReminderSettings {
            user_id: self.user_id,
            reminder_offsets,
            default_alarm_sound: self.default_alarm_sound,
            morning_mode_enabled: self.morning_mode_enabled.unwrap_or(false),
            morning_mode_sound: self.morning_mode_sound.unwrap_or_else(default_sound),
        }
    }

    fn from_domain(settings: &ReminderSettings) -> Self {
        let offsets = settings.reminder_offsets.minutes().to_vec();
        Self {
            user_id: settings.user_id.clone(),
            global_reminder_offset_minutes: Some(
                offsets
                    .first()
                    .copied()
                    .unwrap_or(calarm_domain::DEFAULT_REMINDER_OFFSET_MINUTES),
            ),
            reminder_offsets: Some(offsets),
            default_alarm_sound: settings.default_alarm_sound.clone(),
            morning_mode_enabled: Some(settings.morning_mode_enabled),
            morning_mode_sound: Some(settings.morning_mode_sound.clone()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BackendEventSettings {
    #[serde(default)]
    pub reminder_offsets: Option<Vec<i64>>,
}

pub struct ReminderBackendRestApi {
    client: Client,
    base_url: String,
}

impl ReminderBackendRestApi {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/reminders/{}", self.base_url, path)
    }

    async fn send<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        req: RequestBuilder,
    ) -> anyhow::Result<T> {
        match req.send().await {
            Ok(res) => {
                let res = res.error_for_status().map_err(|e| {
                    error!(
                        "[Unexpected Response] Reminder backend {} error. Error message: {:?}",
                        method, e
                    );
                    anyhow::Error::new(e)
                })?;
                res.json::<T>().await.map_err(|e| {
                    error!(
                        "[Unexpected Response] Reminder backend {} error. Error message: {:?}",
                        method, e
                    );
                    anyhow::Error::new(e)
                })
            }
            Err(e) => {
                error!(
                    "[Network Error] Reminder backend {} error. Error message: {:?}",
                    method, e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }

    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> anyhow::Result<T> {
        self.send("GET", self.client.get(self.url(path)).query(query))
            .await
    }

    async fn put<T: for<'de> Deserialize<'de>>(
        &self,
        body: &impl Serialize,
        path: &str,
        query: &[(&str, &str)],
    ) -> anyhow::Result<T> {
        self.send(
            "PUT",
            self.client.put(self.url(path)).query(query).json(body),
        )
        .await
    }
}

#[async_trait::async_trait]
impl IReminderBackend for ReminderBackendRestApi {
    async fn upcoming_reminders(&self, user_id: &str) -> anyhow::Result<Vec<ReminderInstance>> {
        let res: UpcomingRemindersResponse =
            self.get("upcoming", &[("user_id", user_id)]).await?;
        if let Some(e) = res.error {
            warn!("Reminder backend reported an error for upcoming reminders: {}", e);
        }
        let reminders = res
            .reminders
            .into_iter()
            .filter_map(|r| {
                let r = match serde_json::from_value::<BackendReminder>(r) {
                    Ok(r) => r,
                    Err(e) => {
                        warn!("Skipping malformed reminder. Error: {}", e);
                        return None;
                    }
                };
                let id = r.id.clone();
                let reminder = r.into_domain();
                if reminder.is_none() {
                    warn!("Skipping reminder: {} with an invalid reminder time", id);
                }
                reminder
            })
            .collect();
        Ok(reminders)
    }

    async fn settings(&self, user_id: &str) -> anyhow::Result<ReminderSettings> {
        let res: BackendSettings = self.get("settings", &[("user_id", user_id)]).await?;
        Ok(res.into_domain())
    }

    async fn update_settings(
        &self,
        settings: &ReminderSettings,
    ) -> anyhow::Result<ReminderSettings> {
        let body = BackendSettings::from_domain(settings);
        // The backend answers with an empty object when nothing was written
        let res: serde_json::Value = self.put(&body, "settings", &[]).await?;
        match serde_json::from_value::<BackendSettings>(res) {
            Ok(saved) => Ok(saved.into_domain()),
            Err(_) => Ok(settings.clone()),
        }
    }

    async fn event_settings(&self, event_id: &str) -> anyhow::Result<EventReminderOverride> {
        let res: serde_json::Value = self.get(&format!("events/{}", event_id), &[]).await?;
        // Unknown events are answered with an empty list
        if res.is_array() {
            return Ok(EventReminderOverride::Inherit);
        }
        let res: BackendEventSettings = serde_json::from_value(res)?;
        Ok(EventReminderOverride::from_offsets(res.reminder_offsets)?)
    }

    async fn update_event_settings(
        &self,
        user_id: &str,
        event_id: &str,
        offsets: &ReminderOffsets,
    ) -> anyhow::Result<EventReminderOverride> {
        let body = BackendEventSettings {
            reminder_offsets: Some(offsets.minutes().to_vec()),
        };
        let res: BackendEventSettings = self
            .put(&body, &format!("events/{}", event_id), &[("user_id", user_id)])
            .await?;
        Ok(EventReminderOverride::from_offsets(res.reminder_offsets)?)
    }
}
