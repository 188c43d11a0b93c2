use std::time::Duration;

use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, EnvFilter};
use portfolio_api::{
    build_notifier,
    graceful_shutdown::shutdown_signal,
    routes::configure_routes,
    settings::AppConfig,
    shared_repos::SharedRepositories,
    AppState,
};

const LIMITER_EVICTION_INTERVAL: Duration = Duration::from_secs(300);

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if config.is_production() {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}

fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        cors.allow_any_origin()
    } else {
        origins.iter().fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);
    tracing::info!("Loaded configuration: {:?}", config);

    let repos = match SharedRepositories::connect(&config).await {
        Ok(repos) => repos,
        Err(e) => {
            tracing::error!("Failed to initialise the record store: {:#}", e);
            std::process::exit(1);
        }
    };

    let app_state = web::Data::new(AppState::new(&config, repos, build_notifier(&config)));
    app_state.submission_limiter.spawn_eviction(LIMITER_EVICTION_INTERVAL);

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "🚀 Starting {} v{} on {} ({} store)",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        app_state.store_backend
    );

    let cors_origins = config.cors_origins();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(build_cors(&cors_origins))
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
