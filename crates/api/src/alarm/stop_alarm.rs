use super::subscribers::PersistProcessedAlarm;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use crate::error::CalarmError;
use actix_web::{web, HttpRequest, HttpResponse};
use calarm_api_structs::{dtos::AlarmDTO, stop_alarm::APIResponse};
use calarm_domain::Alarm;
use calarm_infra::CalarmContext;

fn handle_error(e: UseCaseError) -> CalarmError {
    match e {
        UseCaseError::NotRinging => {
            CalarmError::Conflict("There is no alarm ringing at the moment".into())
        }
    }
}

pub async fn stop_alarm_controller(
    http_req: HttpRequest,
    ctx: web::Data<CalarmContext>,
) -> Result<HttpResponse, CalarmError> {
    protect_route(&http_req, &ctx)?;

    execute(StopAlarmUseCase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                stopped: AlarmDTO::new(res.stopped),
                current: res.current.map(AlarmDTO::new),
            })
        })
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct StopAlarmUseCase;

#[derive(Debug)]
pub struct StoppedAlarmResponse {
    pub stopped: Alarm,
    /// The next queued alarm which is ringing now
    pub current: Option<Alarm>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotRinging,
}

#[async_trait::async_trait(?Send)]
impl UseCase for StopAlarmUseCase {
    type Response = StoppedAlarmResponse;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        let stopped = ctx.alarms.stop().ok_or(UseCaseError::NotRinging)?;
        Ok(StoppedAlarmResponse {
            stopped: stopped.alarm,
            current: ctx.alarms.current(),
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(PersistProcessedAlarm)]
    }
}
