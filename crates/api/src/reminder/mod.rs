mod cancel_all_reminders;
mod get_scheduled_reminders;
mod reconcile_reminder;
mod refresh_reminders;
pub mod sync_reminders;

use actix_web::web;
use cancel_all_reminders::cancel_all_reminders_controller;
use get_scheduled_reminders::get_scheduled_reminders_controller;
use refresh_reminders::refresh_reminders_controller;
use sync_reminders::sync_reminders_controller;

pub use cancel_all_reminders::CancelAllRemindersUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders/sync", web::post().to(sync_reminders_controller));
    cfg.route(
        "/reminders/refresh",
        web::post().to(refresh_reminders_controller),
    );
    cfg.route(
        "/reminders/scheduled",
        web::get().to(get_scheduled_reminders_controller),
    );
    cfg.route(
        "/reminders/scheduled",
        web::delete().to(cancel_all_reminders_controller),
    );
}
