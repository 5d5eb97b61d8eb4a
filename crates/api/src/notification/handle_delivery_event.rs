use crate::alarm::trigger_alarm::TriggerAlarmUseCase;
use crate::error::CalarmError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calarm_api_structs::{
    dtos::TriggerOutcomeDTO, NotificationEventBody, NotificationEventResponse,
};
use calarm_domain::{
    Alarm, DeliveredNotification, DeliveryEvent, RawNotification, TriggerOutcome,
};
use calarm_infra::CalarmContext;

fn parse_notification(body: NotificationEventBody) -> Result<DeliveredNotification, CalarmError> {
    DeliveredNotification::try_from(RawNotification::from(body))
        .map_err(|e| CalarmError::BadClientData(e.to_string()))
}

async fn handle(event: DeliveryEvent, ctx: &CalarmContext) -> Result<HttpResponse, CalarmError> {
    let alarm_id = event.notification().payload.id.clone();
    execute(HandleDeliveryEventUseCase { event }, ctx)
        .await
        .map(|outcome| {
            HttpResponse::Ok().json(NotificationEventResponse {
                alarm_id,
                outcome: TriggerOutcomeDTO::new(outcome),
            })
        })
        .map_err(|_| CalarmError::InternalError)
}

pub async fn notification_delivered_controller(
    http_req: HttpRequest,
    body: web::Json<NotificationEventBody>,
    ctx: web::Data<CalarmContext>,
) -> Result<HttpResponse, CalarmError> {
    protect_route(&http_req, &ctx)?;
    let notification = parse_notification(body.0)?;

    handle(DeliveryEvent::Delivered(notification), &ctx).await
}

pub async fn notification_tapped_controller(
    http_req: HttpRequest,
    body: web::Json<NotificationEventBody>,
    ctx: web::Data<CalarmContext>,
) -> Result<HttpResponse, CalarmError> {
    protect_route(&http_req, &ctx)?;
    let notification = parse_notification(body.0)?;

    handle(DeliveryEvent::Tapped(notification), &ctx).await
}

/// Turns a delivered or tapped notification into an alarm. Both ways of learning
/// about a notification can happen for the same reminder, the alarm queue makes
/// sure it only rings once.
#[derive(Debug)]
pub struct HandleDeliveryEventUseCase {
    pub event: DeliveryEvent,
}

#[async_trait::async_trait(?Send)]
impl UseCase for HandleDeliveryEventUseCase {
    type Response = TriggerOutcome;

    type Errors = ();

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();
        let alarm = Alarm::from_notification(self.event.notification().clone(), now);
        execute(TriggerAlarmUseCase { alarm }, ctx).await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_context::{reminder, setup_test_context, NOW};
    use calarm_api_structs::NotificationDataDTO;

    fn delivered(id: &str) -> DeliveredNotification {
        DeliveredNotification::from(reminder(id, NOW).notification(&calarm_domain::Tz::UTC))
    }

    #[actix_web::main]
    #[test]
    async fn delivered_and_tapped_ring_once() {
        let t = setup_test_context();

        let first = execute(
            HandleDeliveryEventUseCase {
                event: DeliveryEvent::Delivered(delivered("r1")),
            },
            &t.ctx,
        )
        .await;
        let second = execute(
            HandleDeliveryEventUseCase {
                event: DeliveryEvent::Tapped(delivered("r1")),
            },
            &t.ctx,
        )
        .await;

        assert_eq!(
            first,
            Ok(TriggerOutcome::Enqueued {
                started_ringing: true
            })
        );
        assert_eq!(second, Ok(TriggerOutcome::AlreadyQueued));
        let alarm = t.ctx.alarms.current().unwrap();
        assert_eq!(alarm.title, "Standup");
        assert_eq!(alarm.body, "Standup starts at 09:10");
        assert_eq!(alarm.trigger_time, NOW);
    }

    #[test]
    fn rejects_notification_without_id() {
        let body = NotificationEventBody {
            title: Some("Standup".into()),
            body: None,
            data: NotificationDataDTO::default(),
        };
        assert!(matches!(
            parse_notification(body),
            Err(CalarmError::BadClientData(_))
        ));
    }

    #[test]
    fn fills_in_defaults() {
        let body = NotificationEventBody {
            title: None,
            body: None,
            data: NotificationDataDTO {
                id: Some("evt_10".into()),
                ..Default::default()
            },
        };
        let notification = parse_notification(body).unwrap();
        assert_eq!(notification.title, "Alarm");
        assert_eq!(notification.body, "");
        assert_eq!(notification.payload.account_email, "Unknown");
    }
}
