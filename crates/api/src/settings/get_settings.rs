use crate::error::CalarmError;
use crate::shared::{
    auth::{protect_route, require_session},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calarm_api_structs::{dtos::ReminderSettingsDTO, get_settings::APIResponse};
use calarm_domain::ReminderSettings;
use calarm_infra::CalarmContext;
use tracing::error;

fn handle_error(e: UseCaseError) -> CalarmError {
    match e {
        UseCaseError::BackendUnavailable => CalarmError::BackendUnavailable(
            "Unable to fetch the reminder settings".into(),
        ),
    }
}

pub async fn get_settings_controller(
    http_req: HttpRequest,
    ctx: web::Data<CalarmContext>,
) -> Result<HttpResponse, CalarmError> {
    protect_route(&http_req, &ctx)?;
    let user_id = require_session(&ctx)?;

    execute(GetSettingsUseCase { user_id }, &ctx)
        .await
        .map(|settings| {
            HttpResponse::Ok().json(APIResponse {
                settings: ReminderSettingsDTO::new(settings),
            })
        })
        .map_err(handle_error)
}

#[derive(Debug)]
struct GetSettingsUseCase {
    pub user_id: String,
}

#[derive(Debug)]
enum UseCaseError {
    BackendUnavailable,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSettingsUseCase {
    type Response = ReminderSettings;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        ctx.backend.settings(&self.user_id).await.map_err(|e| {
            error!("Unable to fetch settings of user: {}. Error: {:?}", self.user_id, e);
            UseCaseError::BackendUnavailable
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_context::setup_test_context;

    #[actix_web::main]
    #[test]
    async fn defaults_for_new_users() {
        let t = setup_test_context();
        let settings = execute(GetSettingsUseCase { user_id: "u1".into() }, &t.ctx)
            .await
            .unwrap();
        assert_eq!(settings.reminder_offsets.minutes(), &[30]);

        t.backend.set_unavailable(true);
        assert!(execute(GetSettingsUseCase { user_id: "u1".into() }, &t.ctx)
            .await
            .is_err());
    }
}
