pub mod handle_delivery_event;

use actix_web::web;
use handle_delivery_event::{notification_delivered_controller, notification_tapped_controller};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications/delivered",
        web::post().to(notification_delivered_controller),
    );
    cfg.route(
        "/notifications/tapped",
        web::post().to(notification_tapped_controller),
    );
}
