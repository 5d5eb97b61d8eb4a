use crate::error::CalarmError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calarm_api_structs::{dtos::EventReminderSettingsDTO, get_event_settings::*};
use calarm_domain::EventReminderOverride;
use calarm_infra::CalarmContext;
use tracing::error;

fn handle_error(e: UseCaseError) -> CalarmError {
    match e {
        UseCaseError::BackendUnavailable(event_id) => CalarmError::BackendUnavailable(format!(
            "Unable to fetch the reminder settings of event: {}",
            event_id
        )),
    }
}

pub async fn get_event_settings_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<CalarmContext>,
) -> Result<HttpResponse, CalarmError> {
    protect_route(&http_req, &ctx)?;

    let event_id = path.into_inner().event_id;
    let usecase = GetEventSettingsUseCase {
        event_id: event_id.clone(),
    };
    execute(usecase, &ctx)
        .await
        .map(|settings| {
            HttpResponse::Ok().json(APIResponse {
                settings: EventReminderSettingsDTO::new(event_id, settings),
            })
        })
        .map_err(handle_error)
}

#[derive(Debug)]
struct GetEventSettingsUseCase {
    pub event_id: String,
}

#[derive(Debug)]
enum UseCaseError {
    BackendUnavailable(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventSettingsUseCase {
    type Response = EventReminderOverride;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        ctx.backend.event_settings(&self.event_id).await.map_err(|e| {
            error!(
                "Unable to fetch settings of event: {}. Error: {:?}",
                self.event_id, e
            );
            UseCaseError::BackendUnavailable(self.event_id.clone())
        })
    }
}
