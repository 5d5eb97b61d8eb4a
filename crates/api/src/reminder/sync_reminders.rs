use super::reconcile_reminder::{self, ReconcileReminderUseCase};
use crate::error::CalarmError;
use crate::shared::{
    auth::{protect_route, require_session},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use calarm_api_structs::{
    dtos::{ReminderSyncResultDTO, SyncSummaryDTO},
    sync_reminders::APIResponse,
};
use calarm_domain::{ScheduleOutcome, STALE_WINDOW_MILLIS};
use calarm_infra::CalarmContext;
use tracing::{error, info, warn};

pub async fn sync_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<CalarmContext>,
) -> Result<HttpResponse, CalarmError> {
    protect_route(&http_req, &ctx)?;
    let user_id = require_session(&ctx)?;

    let usecase = SyncRemindersUseCase {
        user_id,
        trigger: SyncTrigger::OnDemand,
    };
    execute(usecase, &ctx)
        .await
        .map(|report| {
            HttpResponse::Ok().json(APIResponse {
                summary: report.summary(),
            })
        })
        .map_err(|_| CalarmError::InternalError)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncTrigger {
    SessionStarted,
    Periodic,
    OnDemand,
    ForceRefresh,
}

#[derive(Debug)]
pub struct ReminderSyncResult {
    pub reminder_id: String,
    pub outcome: Result<ScheduleOutcome, reconcile_reminder::UseCaseError>,
}

#[derive(Debug)]
pub struct SyncReport {
    pub backend_reachable: bool,
    /// Reminders returned by the backend, some of them might not have been reconciled
    pub fetched: usize,
    pub results: Vec<ReminderSyncResult>,
}

impl SyncReport {
    pub fn unreachable() -> Self {
        Self {
            backend_reachable: false,
            fetched: 0,
            results: Vec::new(),
        }
    }

    pub fn summary(&self) -> SyncSummaryDTO {
        let results = self
            .results
            .iter()
            .map(|r| ReminderSyncResultDTO {
                reminder_id: r.reminder_id.clone(),
                outcome: r.outcome.as_ref().ok().copied(),
                error: r.outcome.as_ref().err().map(|e| e.to_string()),
            })
            .collect();
        SyncSummaryDTO::new(self.backend_reachable, self.fetched, results)
    }
}

/// Fetches the upcoming reminders of the user and reconciles every one of them
/// with what is scheduled locally.
///
/// An unreachable backend leaves everything as it is. Reminders the backend no longer
/// returns are not cancelled, they either fire or are pruned once they are stale.
#[derive(Debug)]
pub struct SyncRemindersUseCase {
    pub user_id: String,
    pub trigger: SyncTrigger,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SyncRemindersUseCase {
    type Response = SyncReport;

    type Errors = ();

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        let generation = ctx.repos.scheduled_entries.generation().await;
        let reminders = match ctx.backend.upcoming_reminders(&self.user_id).await {
            Ok(reminders) => reminders,
            Err(e) => {
                error!(
                    "Unable to fetch upcoming reminders for user: {}. Error: {:?}",
                    self.user_id, e
                );
                return Ok(SyncReport::unreachable());
            }
        };
        info!(
            "Reconciling {} reminders for user: {} ({:?})",
            reminders.len(),
            self.user_id,
            self.trigger
        );

        let fetched = reminders.len();
        let mut results = Vec::with_capacity(fetched);
        for reminder in reminders {
            if ctx.session.user_id().as_deref() != Some(self.user_id.as_str()) {
                warn!("Session of user: {} ended during sync", self.user_id);
                break;
            }
            let reminder_id = reminder.id.clone();
            let usecase = ReconcileReminderUseCase {
                reminder,
                generation,
            };
            let outcome = execute(usecase, ctx).await;
            results.push(ReminderSyncResult {
                reminder_id,
                outcome,
            });
        }

        let now = ctx.sys.get_timestamp_millis();
        let pruned = ctx
            .repos
            .scheduled_entries
            .delete_triggered_before(now - STALE_WINDOW_MILLIS)
            .await;
        if !pruned.is_empty() {
            info!("Pruned {} past scheduled entries", pruned.len());
        }

        Ok(SyncReport {
            backend_reachable: true,
            fetched,
            results,
        })
    }
}
