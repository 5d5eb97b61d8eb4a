use crate::error::CalarmError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calarm_api_structs::{dtos::AlarmDTO, get_alarms::APIResponse};
use calarm_infra::{AlarmSnapshot, CalarmContext};

pub async fn get_alarms_controller(
    http_req: HttpRequest,
    ctx: web::Data<CalarmContext>,
) -> Result<HttpResponse, CalarmError> {
    protect_route(&http_req, &ctx)?;

    execute(GetAlarmsUseCase, &ctx)
        .await
        .map(|snapshot| {
            HttpResponse::Ok().json(APIResponse {
                current: snapshot.current.map(AlarmDTO::new),
                queue: snapshot.queue.into_iter().map(AlarmDTO::new).collect(),
                ringing: snapshot.ringing,
                audible: snapshot.audible,
            })
        })
        .map_err(|_| CalarmError::InternalError)
}

#[derive(Debug)]
struct GetAlarmsUseCase;

#[async_trait::async_trait(?Send)]
impl UseCase for GetAlarmsUseCase {
    type Response = AlarmSnapshot;

    type Errors = ();

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        Ok(ctx.alarms.snapshot())
    }
}
