mod telemetry;

use calarm_api::Application;
use calarm_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("calarm".into(), "info".into());
    init_subscriber(subscriber)?;

    let context = setup_context().await?;

    let app = Application::new(context).await?;
    app.start().await?;
    Ok(())
}
