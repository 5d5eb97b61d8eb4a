mod end_session;
mod start_session;

use actix_web::web;
use end_session::end_session_controller;
use start_session::start_session_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/session", web::post().to(start_session_controller));
    cfg.route("/session", web::delete().to(end_session_controller));
}
