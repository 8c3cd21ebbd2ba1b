use todo_handler::{config::Config, startup, telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_subscriber(env!("CARGO_PKG_NAME"))?;
    let config = Config::from_env()?;
    startup::run(config).await
}
