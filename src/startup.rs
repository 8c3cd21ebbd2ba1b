use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;

use crate::api;
use crate::config::Config;
use crate::repository::database::{Database, TodoStore};

/// Connects to the database and serves until shutdown. Connection failures are
/// returned so the caller decides whether to exit or retry.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let database = Database::connect(&config.database).context("failed to connect to the database")?;
    let store: Arc<dyn TodoStore> = Arc::new(database);
    let app_data = web::Data::from(store);

    tracing::info!(host = %config.host, port = config.port, "starting server");
    HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .configure(api::config)
            .default_service(web::route().to(api::not_found))
            .wrap(Logger::default())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}
