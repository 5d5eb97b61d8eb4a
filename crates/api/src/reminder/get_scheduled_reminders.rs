use crate::error::CalarmError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calarm_api_structs::{dtos::ScheduledEntryDTO, get_scheduled_reminders::APIResponse};
use calarm_domain::ScheduledEntry;
use calarm_infra::CalarmContext;

pub async fn get_scheduled_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<CalarmContext>,
) -> Result<HttpResponse, CalarmError> {
    protect_route(&http_req, &ctx)?;

    execute(GetScheduledRemindersUseCase, &ctx)
        .await
        .map(|entries| {
            HttpResponse::Ok().json(APIResponse {
                entries: entries.into_iter().map(ScheduledEntryDTO::new).collect(),
            })
        })
        .map_err(|_| CalarmError::InternalError)
}

#[derive(Debug)]
struct GetScheduledRemindersUseCase;

#[async_trait::async_trait(?Send)]
impl UseCase for GetScheduledRemindersUseCase {
    type Response = Vec<ScheduledEntry>;

    type Errors = ();

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        let mut entries = ctx.repos.scheduled_entries.find_all().await;
        entries.sort_by_key(|e| e.trigger_ts);
        Ok(entries)
    }
}
