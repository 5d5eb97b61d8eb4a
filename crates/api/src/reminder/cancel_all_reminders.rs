use crate::error::CalarmError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calarm_api_structs::cancel_all_reminders::APIResponse;
use calarm_infra::CalarmContext;
use tracing::info;

pub async fn cancel_all_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<CalarmContext>,
) -> Result<HttpResponse, CalarmError> {
    protect_route(&http_req, &ctx)?;

    execute(CancelAllRemindersUseCase, &ctx)
        .await
        .map(|cancelled| HttpResponse::Ok().json(APIResponse { cancelled }))
        .map_err(|_| CalarmError::InternalError)
}

/// Forgets every scheduled entry and cancels their pending notifications.
///
/// Clearing the entries bumps their generation, so a sync that is in flight
/// cannot write its schedules back afterwards.
#[derive(Debug)]
pub struct CancelAllRemindersUseCase;

#[async_trait::async_trait(?Send)]
impl UseCase for CancelAllRemindersUseCase {
    /// Number of entries that were removed
    type Response = usize;

    type Errors = ();

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        let entries = ctx.repos.scheduled_entries.delete_all().await;
        for handle in entries.iter().filter_map(|e| e.handle.as_ref()) {
            ctx.delivery.cancel(handle).await;
        }
        info!("Cancelled {} scheduled reminders", entries.len());
        Ok(entries.len())
    }
}
