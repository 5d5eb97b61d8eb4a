mod alarm;
mod error;
mod job_schedulers;
mod notification;
mod reminder;
mod session;
mod settings;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use calarm_infra::CalarmContext;
use job_schedulers::{start_delivery_listener, start_sync_job};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    alarm::configure_routes(cfg);
    notification::configure_routes(cfg);
    reminder::configure_routes(cfg);
    session::configure_routes(cfg);
    settings::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: CalarmContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: CalarmContext) {
        start_delivery_listener(context.clone());
        start_sync_job(context);
    }

    async fn configure_server(context: CalarmContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        // Only local clients control the engine
        let address = format!("127.0.0.1:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
