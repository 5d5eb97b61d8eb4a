mod helpers;

use calarm_sdk::{
    APIError, CalarmSDK, NotificationDataDTO, NotificationEventBody, StatusCode,
    TriggerOutcomeDTO, UpdateEventSettingsInput,
};
use helpers::setup::spawn_app;
use helpers::utils::{backend_reminder, mock_backend_down, mock_upcoming};
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, ResponseTemplate,
};

fn assert_status<T: std::fmt::Debug>(res: Result<T, APIError>, expected: StatusCode) {
    match res {
        Err(APIError::UnexpectedStatusCode(status)) => assert_eq!(status, expected),
        other => panic!("Expected status code {} got {:?}", expected, other),
    }
}

fn notification(id: &str, title: &str) -> NotificationEventBody {
    NotificationEventBody {
        title: Some(title.into()),
        body: Some(format!("{} starts at 09:00", title)),
        data: NotificationDataDTO {
            id: Some(id.into()),
            account_email: Some("me@example.com".into()),
            event_start_time: Some(1613898000000),
            meeting_link: None,
            snoozed: None,
        },
    }
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    let status = sdk.status.check_health().await.unwrap();
    assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
}

#[actix_web::main]
#[test]
async fn test_requires_api_key() {
    let (_, _, address) = spawn_app().await;
    let sdk = CalarmSDK::new(address.clone(), "wrong-key");
    assert_status(sdk.alarm.get().await, StatusCode::UNAUTHORIZED);
    // Health stays public
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_sync_requires_session() {
    let (_, sdk, _) = spawn_app().await;
    assert_status(sdk.reminder.sync().await, StatusCode::BAD_REQUEST);
    assert_status(sdk.settings.get().await, StatusCode::BAD_REQUEST);
}

#[actix_web::main]
#[test]
async fn test_session_schedules_and_escalates() {
    let (app, sdk, _) = spawn_app().await;
    mock_upcoming(
        &app.backend,
        "u1",
        vec![
            backend_reminder("evt1_10", "Standup", 5 * 60),
            backend_reminder("evt2_10", "Planning", -3 * 60),
            backend_reminder("evt3_10", "Retro", -20 * 60),
        ],
    )
    .await;

    let res = sdk.session.start("u1").await.unwrap();
    assert_eq!(res.user_id, "u1");
    assert!(res.sync.backend_reachable);
    assert_eq!(res.sync.fetched, 3);
    assert_eq!(res.sync.scheduled, 1);
    assert_eq!(res.sync.fired_immediately, 1);
    assert_eq!(res.sync.discarded_stale, 1);

    let alarms = sdk.alarm.get().await.unwrap();
    let current = alarms.current.unwrap();
    assert_eq!(current.id, "evt2_10");
    assert_eq!(current.title, "Missed Reminder: Planning");
    assert!(alarms.ringing);

    let scheduled = sdk.reminder.scheduled().await.unwrap();
    assert_eq!(scheduled.entries.len(), 2);
    assert_eq!(
        scheduled.entries.iter().filter(|e| e.handled).count(),
        1
    );

    // Syncing again changes nothing
    let res = sdk.reminder.sync().await.unwrap();
    assert_eq!(res.summary.skipped_duplicate, 2);
    assert_eq!(res.summary.discarded_stale, 1);
    assert_eq!(sdk.alarm.get().await.unwrap().queue.len(), 1);

    let stopped = sdk.alarm.stop().await.unwrap();
    assert_eq!(stopped.stopped.id, "evt2_10");
    assert!(stopped.current.is_none());
    assert_status(sdk.alarm.stop().await, StatusCode::CONFLICT);

    let res = sdk.session.end().await.unwrap();
    assert_eq!(res.user_id, Some("u1".to_string()));
    assert_eq!(res.cancelled, 2);
    assert!(sdk.reminder.scheduled().await.unwrap().entries.is_empty());
}

#[actix_web::main]
#[test]
async fn test_backend_down_keeps_schedules() {
    let (app, sdk, _) = spawn_app().await;
    mock_upcoming(
        &app.backend,
        "u1",
        vec![backend_reminder("evt1_10", "Standup", 30 * 60)],
    )
    .await;
    sdk.session.start("u1").await.unwrap();

    mock_backend_down(&app.backend).await;
    let res = sdk.reminder.sync().await.unwrap();
    assert!(!res.summary.backend_reachable);
    assert_eq!(res.summary.fetched, 0);
    assert_eq!(sdk.reminder.scheduled().await.unwrap().entries.len(), 1);
}

#[actix_web::main]
#[test]
async fn test_force_refresh_reschedules() {
    let (app, sdk, _) = spawn_app().await;
    mock_upcoming(
        &app.backend,
        "u1",
        vec![backend_reminder("evt1_10", "Standup", 30 * 60)],
    )
    .await;
    sdk.session.start("u1").await.unwrap();
    let before = sdk.reminder.scheduled().await.unwrap().entries;

    let res = sdk.reminder.refresh().await.unwrap();
    assert_eq!(res.summary.scheduled, 1);
    let after = sdk.reminder.scheduled().await.unwrap().entries;
    assert_eq!(after.len(), 1);
    assert_ne!(before[0].handle, after[0].handle);

    assert_eq!(sdk.reminder.cancel_all().await.unwrap().cancelled, 1);
    assert!(sdk.reminder.scheduled().await.unwrap().entries.is_empty());
}

#[actix_web::main]
#[test]
async fn test_delivered_and_tapped_ring_once() {
    let (_, sdk, _) = spawn_app().await;

    let res = sdk
        .notification
        .delivered(notification("evt1_10", "Standup"))
        .await
        .unwrap();
    assert_eq!(res.alarm_id, "evt1_10");
    assert_eq!(res.outcome, TriggerOutcomeDTO::Ringing);

    let res = sdk
        .notification
        .tapped(notification("evt1_10", "Standup"))
        .await
        .unwrap();
    assert_eq!(res.outcome, TriggerOutcomeDTO::AlreadyQueued);

    let res = sdk
        .notification
        .tapped(notification("evt2_10", "Planning"))
        .await
        .unwrap();
    assert_eq!(res.outcome, TriggerOutcomeDTO::Queued);

    let alarms = sdk.alarm.get().await.unwrap();
    assert_eq!(alarms.queue.len(), 2);
    assert_eq!(alarms.current.unwrap().id, "evt1_10");

    sdk.alarm.stop().await.unwrap();
    let res = sdk
        .notification
        .delivered(notification("evt1_10", "Standup"))
        .await
        .unwrap();
    assert_eq!(res.outcome, TriggerOutcomeDTO::AlreadyProcessed);
}

#[actix_web::main]
#[test]
async fn test_rejects_notification_without_id() {
    let (_, sdk, _) = spawn_app().await;
    let mut body = notification("", "Standup");
    body.data.id = None;
    assert_status(
        sdk.notification.delivered(body).await,
        StatusCode::BAD_REQUEST,
    );
    assert!(sdk.alarm.get().await.unwrap().current.is_none());
}

#[actix_web::main]
#[test]
async fn test_snooze() {
    let (_, sdk, _) = spawn_app().await;
    assert_status(sdk.alarm.snooze().await, StatusCode::CONFLICT);

    sdk.notification
        .delivered(notification("evt1_10", "Standup"))
        .await
        .unwrap();
    let res = sdk.alarm.snooze().await.unwrap();
    assert_eq!(res.snoozed.id, "evt1_10");
    assert!(res.snooze_id.starts_with("evt1_10"));
    assert_ne!(res.snooze_id, "evt1_10");
    assert!(res.current.is_none());

    let alarms = sdk.alarm.get().await.unwrap();
    assert!(alarms.current.is_none());
    assert!(!alarms.ringing);
}

#[actix_web::main]
#[test]
async fn test_in_process_delivery_rings() {
    let (app, sdk, _) = spawn_app().await;
    mock_upcoming(
        &app.backend,
        "u1",
        vec![backend_reminder("evt1_10", "Standup", 2)],
    )
    .await;
    let res = sdk.session.start("u1").await.unwrap();
    assert_eq!(res.sync.scheduled, 1);

    let mut current = None;
    for _ in 0..50 {
        current = sdk.alarm.get().await.unwrap().current;
        if current.is_some() {
            break;
        }
        actix_web::rt::time::sleep(Duration::from_millis(100)).await;
    }
    let current = current.expect("Expected the reminder to ring");
    assert_eq!(current.id, "evt1_10");
    assert_eq!(current.title, "Standup");
}

#[actix_web::main]
#[test]
async fn test_settings_proxy() {
    let (app, sdk, _) = spawn_app().await;
    mock_upcoming(&app.backend, "u1", vec![]).await;
    Mock::given(method("GET"))
        .and(path("/reminders/settings"))
        .and(query_param("user_id", "u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "u1",
            "global_reminder_offset_minutes": 15,
            "default_alarm_sound": "chime",
            "morning_mode_enabled": false
        })))
        .mount(&app.backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/reminders/events/evt1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.backend)
        .await;
    sdk.session.start("u1").await.unwrap();

    let settings = sdk.settings.get().await.unwrap().settings;
    assert_eq!(settings.reminder_offsets, vec![15]);
    assert_eq!(settings.default_alarm_sound, "chime");

    let event = sdk.settings.get_event("evt1").await.unwrap().settings;
    assert_eq!(event.event_id, "evt1");
    assert!(event.reminder_offsets.is_none());

    let res = sdk
        .settings
        .update_event(UpdateEventSettingsInput {
            event_id: "evt1".into(),
            reminder_offsets: vec![-1],
        })
        .await;
    assert_status(res, StatusCode::BAD_REQUEST);
}

#[actix_web::main]
#[test]
async fn test_settings_backend_unavailable() {
    let (app, sdk, _) = spawn_app().await;
    mock_upcoming(&app.backend, "u1", vec![]).await;
    sdk.session.start("u1").await.unwrap();

    // Nothing is mounted for the settings routes, so the backend answers 404
    assert_status(sdk.settings.get().await, StatusCode::BAD_GATEWAY);
}
