use crate::error::CalarmError;
use crate::reminder::{
    sync_reminders::{SyncReport, SyncRemindersUseCase, SyncTrigger},
    CancelAllRemindersUseCase,
};
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calarm_api_structs::start_session::*;
use calarm_infra::CalarmContext;
use tracing::info;

fn handle_error(e: UseCaseError) -> CalarmError {
    match e {
        UseCaseError::EmptyUserId => {
            CalarmError::BadClientData("A user id is required to start a session".into())
        }
    }
}

pub async fn start_session_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<CalarmContext>,
) -> Result<HttpResponse, CalarmError> {
    protect_route(&http_req, &ctx)?;

    let usecase = StartSessionUseCase {
        user_id: body.0.user_id,
    };
    execute(usecase, &ctx)
        .await
        .map(|(user_id, report)| {
            HttpResponse::Ok().json(APIResponse {
                user_id,
                sync: report.summary(),
            })
        })
        .map_err(handle_error)
}

/// Signs a user in and syncs their reminders right away. Schedules of a
/// previously signed in user are cancelled first.
#[derive(Debug)]
pub struct StartSessionUseCase {
    pub user_id: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyUserId,
}

#[async_trait::async_trait(?Send)]
impl UseCase for StartSessionUseCase {
    type Response = (String, SyncReport);

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        let user_id = self.user_id.trim().to_string();
        if user_id.is_empty() {
            return Err(UseCaseError::EmptyUserId);
        }

        let previous = ctx.session.start(user_id.clone());
        if let Some(previous) = previous.filter(|previous| previous != &user_id) {
            info!("User: {} replaces the session of user: {}", user_id, previous);
            let _ = execute(CancelAllRemindersUseCase, ctx).await;
        }

        let usecase = SyncRemindersUseCase {
            user_id: user_id.clone(),
            trigger: SyncTrigger::SessionStarted,
        };
        let report = execute(usecase, ctx)
            .await
            .unwrap_or_else(|_| SyncReport::unreachable());
        Ok((user_id, report))
    }
}
