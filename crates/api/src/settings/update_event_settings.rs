use super::subscribers::SyncRemindersOnSettingsChange;
use crate::error::CalarmError;
use crate::shared::{
    auth::{protect_route, require_session},
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calarm_api_structs::{dtos::EventReminderSettingsDTO, update_event_settings::*};
use calarm_domain::{EventReminderOverride, InvalidOffsetsError, ReminderOffsets};
use calarm_infra::CalarmContext;
use tracing::error;

fn handle_error(e: UseCaseError) -> CalarmError {
    match e {
        UseCaseError::InvalidOffsets(e) => CalarmError::BadClientData(e.to_string()),
        UseCaseError::BackendUnavailable(event_id) => CalarmError::BackendUnavailable(format!(
            "Unable to update the reminder settings of event: {}",
            event_id
        )),
    }
}

pub async fn update_event_settings_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<CalarmContext>,
) -> Result<HttpResponse, CalarmError> {
    protect_route(&http_req, &ctx)?;
    let user_id = require_session(&ctx)?;

    let event_id = path.into_inner().event_id;
    let usecase = UpdateEventSettingsUseCase {
        user_id,
        event_id: event_id.clone(),
        reminder_offsets: body.0.reminder_offsets,
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

/// Overrides the reminder offsets of a single event. An empty list turns its
/// reminders off.
#[derive(Debug)]
pub struct UpdateEventSettingsUseCase {
    pub user_id: String,
    pub event_id: String,
    pub reminder_offsets: Vec<i64>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidOffsets(InvalidOffsetsError),
    BackendUnavailable(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEventSettingsUseCase {
    type Response = EventReminderOverride;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        let offsets = ReminderOffsets::new(std::mem::take(&mut self.reminder_offsets))
            .map_err(UseCaseError::InvalidOffsets)?;

        ctx.backend
            .update_event_settings(&self.user_id, &self.event_id, &offsets)
            .await
            .map_err(|e| {
                error!(
                    "Unable to update settings of event: {}. Error: {:?}",
                    self.event_id, e
                );
                UseCaseError::BackendUnavailable(self.event_id.clone())
            })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncRemindersOnSettingsChange)]
    }
}
