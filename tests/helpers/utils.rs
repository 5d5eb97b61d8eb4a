use chrono::{Duration, Utc};
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// A reminder as the backend returns it, due `remind_in_secs` from now
pub fn backend_reminder(id: &str, title: &str, remind_in_secs: i64) -> Value {
    let reminder_time = Utc::now() + Duration::seconds(remind_in_secs);
    let start_time = reminder_time + Duration::minutes(10);
    json!({
        "id": id,
        "event_id": id.split('_').next().unwrap_or(id),
        "title": title,
        "start_time": start_time.to_rfc3339(),
        "reminder_time": reminder_time.to_rfc3339(),
        "minutes_before": 10,
        "sound": "default",
        "account_id": "acc1",
        "account_email": "me@example.com",
        "meeting_link": null,
        "trigger_immediately": false
    })
}

pub async fn mock_upcoming(backend: &MockServer, user_id: &str, reminders: Vec<Value>) {
    backend.reset().await;
    Mock::given(method("GET"))
        .and(path("/reminders/upcoming"))
        .and(query_param("user_id", user_id))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reminders": reminders,
            "settings": {}
        })))
        .mount(backend)
        .await;
}

pub async fn mock_backend_down(backend: &MockServer) {
    backend.reset().await;
    Mock::given(method("GET"))
        .and(path("/reminders/upcoming"))
        .respond_with(ResponseTemplate::new(500))
        .mount(backend)
        .await;
}
