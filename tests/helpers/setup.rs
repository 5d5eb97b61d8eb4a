use calarm_api::Application;
use calarm_infra::{reminder_backend::ReminderBackendRestApi, CalarmContext, Config};
use calarm_sdk::CalarmSDK;
use std::sync::Arc;
use wiremock::MockServer;

pub const API_KEY: &str = "calarm-test-key";

pub struct TestApp {
    pub config: Config,
    /// Stands in for the reminder backend
    pub backend: MockServer,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, CalarmSDK, String) {
    let backend = MockServer::start().await;

    let mut ctx = CalarmContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.api_key = API_KEY.into();
    ctx.config.backend_url = backend.uri();
    ctx.backend = Arc::new(ReminderBackendRestApi::new(backend.uri()));

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { config, backend };
    let sdk = CalarmSDK::new(address.clone(), API_KEY);
    (app, sdk, address)
}
