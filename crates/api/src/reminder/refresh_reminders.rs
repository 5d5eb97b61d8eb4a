use super::{
    cancel_all_reminders::CancelAllRemindersUseCase,
    sync_reminders::{SyncReport, SyncRemindersUseCase, SyncTrigger},
};
use crate::error::CalarmError;
use crate::shared::{
    auth::{protect_route, require_session},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calarm_api_structs::refresh_reminders::APIResponse;
use calarm_infra::CalarmContext;

pub async fn refresh_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<CalarmContext>,
) -> Result<HttpResponse, CalarmError> {
    protect_route(&http_req, &ctx)?;
    let user_id = require_session(&ctx)?;

    execute(RefreshRemindersUseCase { user_id }, &ctx)
        .await
        .map(|report| {
            HttpResponse::Ok().json(APIResponse {
                summary: report.summary(),
            })
        })
        .map_err(|_| CalarmError::InternalError)
}

/// Starts over from what the backend returns: every schedule is cancelled before syncing
#[derive(Debug)]
pub struct RefreshRemindersUseCase {
    pub user_id: String,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RefreshRemindersUseCase {
    type Response = SyncReport;

    type Errors = ();

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        execute(CancelAllRemindersUseCase, ctx).await?;
        let usecase = SyncRemindersUseCase {
            user_id: self.user_id.clone(),
            trigger: SyncTrigger::ForceRefresh,
        };
        execute(usecase, ctx).await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_context::{reminder, setup_test_context, MINUTE, NOW};
    use calarm_domain::ScheduleOutcome;

    #[actix_web::main]
    #[test]
    async fn reschedules_everything() {
        let t = setup_test_context();
        t.backend.set_reminders(vec![reminder("r1", NOW + 5 * MINUTE)]);

        for _ in 0..2 {
            let report = execute(
                RefreshRemindersUseCase {
                    user_id: "u1".into(),
                },
                &t.ctx,
            )
            .await
            .unwrap();
            assert_eq!(
                report.results[0].outcome.as_ref().copied(),
                Ok(ScheduleOutcome::Scheduled)
            );
        }
        assert_eq!(t.delivery.scheduled().len(), 2);
        assert_eq!(t.delivery.active().len(), 1);
    }
}
