use crate::error::CalarmError;
use crate::reminder::CancelAllRemindersUseCase;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calarm_api_structs::end_session::APIResponse;
use calarm_infra::CalarmContext;
use tracing::info;

pub async fn end_session_controller(
    http_req: HttpRequest,
    ctx: web::Data<CalarmContext>,
) -> Result<HttpResponse, CalarmError> {
    protect_route(&http_req, &ctx)?;

    execute(EndSessionUseCase, &ctx)
        .await
        .map(|(user_id, cancelled)| HttpResponse::Ok().json(APIResponse { user_id, cancelled }))
        .map_err(|_| CalarmError::InternalError)
}

/// Signs the user out. Nothing scheduled for them is delivered afterwards,
/// snoozed alarms included.
#[derive(Debug)]
pub struct EndSessionUseCase;

#[async_trait::async_trait(?Send)]
impl UseCase for EndSessionUseCase {
    type Response = (Option<String>, usize);

    type Errors = ();

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        let user_id = ctx.session.end();
        let cancelled = execute(CancelAllRemindersUseCase, ctx).await?;
        ctx.delivery.cancel_all().await;
        info!("Session of user: {:?} ended", user_id);
        Ok((user_id, cancelled))
    }
}
