//! Aidtrack
//!
//! Main application entry point

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use tracing::{info, warn};

use aidtrack::{
    api,
    config::Settings,
    database::{
        connection::{create_pool, health_check, run_migrations},
        DatabaseService, PoolConfig,
    },
    services::ServiceFactory,
    utils::logging,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Environment variables must be in place before configuration loads;
    // a missing .env file falls back to the system environment.
    dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the debug flag raises the default level.
    let mut logging_config = settings.logging.clone();
    if settings.server.debug && logging_config.level == "info" {
        logging_config.level = "debug".to_string();
    }
    let _logging_guard = logging::init_logging(&logging_config)?;

    info!("Starting Aidtrack server...");

    // Initialize database connection
    info!("Connecting to database...");
    let pool_config = PoolConfig {
        url: settings.database.url(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        ..PoolConfig::default()
    };
    let db_pool = create_pool(&pool_config).await?;

    // Run database migrations
    run_migrations(&db_pool).await?;
    health_check(&db_pool).await?;

    // Initialize services
    info!("Initializing services...");
    let database_service = DatabaseService::new(db_pool);
    let services = ServiceFactory::new(database_service);
    let services_data = web::Data::new(services);

    let session_config = settings.session.clone();
    if !session_config.cookie_secure {
        warn!("Session cookies are configured without the Secure flag");
    }

    let bind_addr = (settings.server.host.clone(), settings.server.port);
    info!("Listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .app_data(services_data.clone())
            .wrap(middleware::Logger::default())
            .wrap(api::session_middleware(&session_config))
            .configure(api::configure)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
