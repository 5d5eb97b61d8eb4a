mod get_event_settings;
mod get_settings;
mod subscribers;
mod update_event_settings;
mod update_settings;

use actix_web::web;
use get_event_settings::get_event_settings_controller;
use get_settings::get_settings_controller;
use update_event_settings::update_event_settings_controller;
use update_settings::update_settings_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/settings", web::get().to(get_settings_controller));
    cfg.route("/settings", web::put().to(update_settings_controller));
    cfg.route(
        "/events/{event_id}/settings",
        web::get().to(get_event_settings_controller),
    );
    cfg.route(
        "/events/{event_id}/settings",
        web::put().to(update_event_settings_controller),
    );
}
