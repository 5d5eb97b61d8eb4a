use super::subscribers::PersistProcessedAlarm;
use crate::error::CalarmError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calarm_api_structs::{dtos::AlarmDTO, snooze_alarm::APIResponse};
use calarm_domain::Alarm;
use calarm_infra::CalarmContext;
use tracing::{error, info};

fn handle_error(e: UseCaseError) -> CalarmError {
    match e {
        UseCaseError::NotRinging => {
            CalarmError::Conflict("There is no alarm ringing at the moment".into())
        }
        UseCaseError::SchedulingFailed => CalarmError::InternalError,
    }
}

pub async fn snooze_alarm_controller(
    http_req: HttpRequest,
    ctx: web::Data<CalarmContext>,
) -> Result<HttpResponse, CalarmError> {
    protect_route(&http_req, &ctx)?;

    execute(SnoozeAlarmUseCase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                snoozed: AlarmDTO::new(res.snoozed),
                snooze_id: res.snooze_id,
                snoozed_until: res.snoozed_until,
                current: res.current.map(AlarmDTO::new),
            })
        })
        .map_err(handle_error)
}

/// Silences the current alarm and schedules a copy of it to ring again after the
/// snooze interval
#[derive(Debug)]
pub struct SnoozeAlarmUseCase;

#[derive(Debug)]
pub struct SnoozedAlarmResponse {
    pub snoozed: Alarm,
    pub snooze_id: String,
    pub snoozed_until: i64,
    pub current: Option<Alarm>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotRinging,
    /// The alarm keeps ringing so that it is not lost
    SchedulingFailed,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SnoozeAlarmUseCase {
    type Response = SnoozedAlarmResponse;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        let alarm = ctx.alarms.current().ok_or(UseCaseError::NotRinging)?;
        let now = ctx.sys.get_timestamp_millis();
        let notification = alarm.snooze_notification(now, ctx.config.snooze_millis);
        let snooze_id = notification.payload.id.clone();
        let snoozed_until = notification.trigger_ts;

        let handle = match ctx.delivery.schedule_at(notification).await {
            Ok(handle) => handle,
            Err(e) => {
                error!("Unable to snooze alarm: {}. Error: {:?}", alarm.id, e);
                return Err(UseCaseError::SchedulingFailed);
            }
        };

        // The user might have stopped it while the snooze was being scheduled
        if ctx.alarms.stop_if_current(&alarm.id).is_none() {
            info!("Alarm: {} was stopped before the snooze completed", alarm.id);
            ctx.delivery.cancel(&handle).await;
            return Err(UseCaseError::NotRinging);
        }
        info!("Alarm: {} snoozed until: {}", alarm.id, snoozed_until);

        Ok(SnoozedAlarmResponse {
            snoozed: alarm,
            snooze_id,
            snoozed_until,
            current: ctx.alarms.current(),
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(PersistProcessedAlarm)]
    }
}
