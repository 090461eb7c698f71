mod models;
mod handlers;
mod routes;
mod docs;
mod config;
mod db;
mod services;
mod state;
mod views;

use config::Config;
use db::dblists::ListsDb;
use routes::create_app;
use state::AppState;
use tracing::{info, error, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use std::panic;

#[tokio::main]
async fn main() {

    // Set panic hook for better error messages
    panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
    }));

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Default to info level, but allow debug for our app
            "superlists=debug,tower_http=debug,axum::rejection=trace,info".into()
        }))
        .init();

    info!("Starting server...");

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        warn!("Using default configuration");
        Config::default()
    });

    // The lists live in the database, so there is nothing to serve without it
    let db = match ListsDb::new(&config.db_url, config.db_max_connections).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database '{}': {}", config.db_url, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = db.init_schema().await {
        error!("Failed to initialize database schema: {}", e);
        std::process::exit(1);
    }
    info!("Database initialized successfully");

    let with_swagger = !config.is_production();
    let app_routes = create_app(AppState::new(db), with_swagger);

    // Start the HTTP server
    let listener = tokio::net::TcpListener::bind(config.server_address())
        .await
        .unwrap_or_else(|_| panic!("Failed to bind to {}", config.server_address()));

    info!("🚀 Server running on http://{}", config.server_address());
    if with_swagger {
        info!("📚 Swagger UI available at http://{}/swagger", config.server_address());
    }

    axum::serve(listener, app_routes)
        .await
        .expect("Server failed to start");
}
