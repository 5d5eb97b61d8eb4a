mod get_alarms;
mod snooze_alarm;
mod stop_alarm;
mod subscribers;
pub mod trigger_alarm;

use actix_web::web;
use get_alarms::get_alarms_controller;
use snooze_alarm::snooze_alarm_controller;
use stop_alarm::stop_alarm_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/alarms", web::get().to(get_alarms_controller));
    cfg.route("/alarms/stop", web::post().to(stop_alarm_controller));
    cfg.route("/alarms/snooze", web::post().to(snooze_alarm_controller));
}
