use super::subscribers::SyncRemindersOnSettingsChange;
use crate::error::CalarmError;
use crate::shared::{
    auth::{protect_route, require_session},
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calarm_api_structs::{dtos::ReminderSettingsDTO, update_settings::*};
use calarm_domain::{InvalidOffsetsError, ReminderOffsets, ReminderSettings};
use calarm_infra::CalarmContext;
use tracing::error;

fn handle_error(e: UseCaseError) -> CalarmError {
    match e {
        UseCaseError::InvalidOffsets(e) => CalarmError::BadClientData(e.to_string()),
        UseCaseError::BackendUnavailable => CalarmError::BackendUnavailable(
            "Unable to update the reminder settings".into(),
        ),
    }
}

pub async fn update_settings_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<CalarmContext>,
) -> Result<HttpResponse, CalarmError> {
    protect_route(&http_req, &ctx)?;
    let user_id = require_session(&ctx)?;

    let body = body.0;
    let usecase = UpdateSettingsUseCase {
        user_id,
        reminder_offsets: body.reminder_offsets,
        default_alarm_sound: body.default_alarm_sound,
        morning_mode_enabled: body.morning_mode_enabled,
        morning_mode_sound: body.morning_mode_sound,
    };
    execute(usecase, &ctx)
        .await
        .map(|settings| {
            HttpResponse::Ok().json(APIResponse {
                settings: ReminderSettingsDTO::new(settings),
            })
        })
        .map_err(handle_error)
}

fn backend_error(user_id: &str, e: anyhow::Error) -> UseCaseError {
    error!(
        "Unable to update settings of user: {}. Error: {:?}",
        user_id, e
    );
    UseCaseError::BackendUnavailable
}

/// Updates the global settings of the user. Fields that are `None` keep their value.
#[derive(Debug)]
pub struct UpdateSettingsUseCase {
    pub user_id: String,
    pub reminder_offsets: Option<Vec<i64>>,
    pub default_alarm_sound: Option<String>,
    pub morning_mode_enabled: Option<bool>,
    pub morning_mode_sound: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidOffsets(InvalidOffsetsError),
    BackendUnavailable,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateSettingsUseCase {
    type Response = ReminderSettings;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        let offsets = self
            .reminder_offsets
            .take()
            .map(ReminderOffsets::new)
            .transpose()
            .map_err(UseCaseError::InvalidOffsets)?;

        let mut settings = ctx
            .backend
            .settings(&self.user_id)
            .await
            .map_err(|e| backend_error(&self.user_id, e))?;
        if let Some(offsets) = offsets {
            settings.reminder_offsets = offsets;
        }
        if let Some(sound) = self.default_alarm_sound.take() {
            settings.default_alarm_sound = sound;
        }
        if let Some(enabled) = self.morning_mode_enabled {
            settings.morning_mode_enabled = enabled;
        }
        if let Some(sound) = self.morning_mode_sound.take() {
            settings.morning_mode_sound = sound;
        }

        ctx.backend
            .update_settings(&settings)
            .await
            .map_err(|e| backend_error(&self.user_id, e))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncRemindersOnSettingsChange)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_context::setup_test_context;

    fn usecase(offsets: Option<Vec<i64>>) -> UpdateSettingsUseCase {
        UpdateSettingsUseCase {
            user_id: "u1".into(),
            reminder_offsets: offsets,
            default_alarm_sound: None,
            morning_mode_enabled: Some(true),
            morning_mode_sound: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn merges_and_syncs() {
        let t = setup_test_context();

        let settings = execute(usecase(Some(vec![10, 5, 10])), &t.ctx)
            .await
            .unwrap();
        assert_eq!(settings.reminder_offsets.minutes(), &[10, 5]);
        assert!(settings.morning_mode_enabled);
        assert_eq!(t.backend.upcoming_calls(), 1);

        let settings = execute(usecase(None), &t.ctx).await.unwrap();
        assert_eq!(settings.reminder_offsets.minutes(), &[10, 5]);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_offsets() {
        let t = setup_test_context();
        let res = execute(usecase(Some(vec![10, -5])), &t.ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidOffsets(InvalidOffsetsError::OutOfRange(-5))
        );
        assert_eq!(t.backend.upcoming_calls(), 0);
    }
}
