use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use f1_analytics_api::config::{LoggingSettings, Settings};
use f1_analytics_api::error::not_found;
use f1_analytics_api::{configure_routes, AppState, ErgastClient, UpstreamConfig};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting F1 Analytics API...");

    let upstream_config = UpstreamConfig::from(settings.upstream.clone());
    info!(
        "Ergast API at {} (timeout: {:?}, max retries: {})",
        upstream_config.base_url, upstream_config.timeout, upstream_config.max_retries
    );

    let upstream = match ErgastClient::new(upstream_config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create Ergast client: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    let app_state = AppState::new(upstream);

    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting HTTP server on {}:{}", host, port);

    let mut server = HttpServer::new(move || {
        // Wide-open CORS; restrict origins before exposing publicly
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(configure_routes)
            .default_service(web::to(not_found))
    });

    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    server.bind((host, port))?.run().await
}
