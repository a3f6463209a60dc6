use relay_server::{
    ServerError, build_page_router, build_producer_router, build_subscriber_router, logger,
};
use relay_ws::{RelayState, ShutdownCoordinator};

use std::error::Error;
use std::net::SocketAddr;

use axum::Router;
use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = relay_config::Config::load()?;
    config.validate()?;

    let log_file_path = config.log_file_path()?;
    if let Some(log_dir) = log_file_path.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(log_dir).map_err(|e| ServerError::Io {
            path: log_dir.to_path_buf(),
            source: e,
        })?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting relay-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let shutdown = ShutdownCoordinator::new();
    let state = RelayState::from_config(&config, shutdown.clone());

    // All three listeners are bound before anything is served
    let producer_listener = bind("producer", &config.producer_addr()).await?;
    let subscriber_listener = bind("subscriber", &config.subscriber_addr()).await?;
    let http_listener = bind("http", &config.http_addr()).await?;

    let page_path = config.page_path()?;
    if !page_path.exists() {
        warn!("Viewer page {} not found, GET / will return 404", page_path.display());
    }

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    info!("Relay ready to accept connections");
    tokio::try_join!(
        serve(
            "producer",
            producer_listener,
            build_producer_router(state.clone()),
            shutdown.clone(),
        ),
        serve(
            "subscriber",
            subscriber_listener,
            build_subscriber_router(state.clone()),
            shutdown.clone(),
        ),
        serve(
            "http",
            http_listener,
            build_page_router(state, page_path),
            shutdown.clone(),
        ),
    )?;

    info!("Graceful shutdown complete");
    Ok(())
}

async fn bind(listener: &'static str, addr: &str) -> Result<TcpListener, ServerError> {
    let bound = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            listener,
            addr: addr.to_string(),
            source,
        })?;

    // Actual address matters when port is 0
    match bound.local_addr() {
        Ok(actual) => info!("{} listener on {}", listener, actual),
        Err(e) => error!("{} listener address unavailable: {}", listener, e),
    }

    Ok(bound)
}

async fn serve(
    listener: &'static str,
    tcp: TcpListener,
    app: Router,
    shutdown: ShutdownCoordinator,
) -> Result<(), ServerError> {
    axum::serve(
        tcp,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown.subscribe_guard().wait().await;
        info!("{} listener stopped accepting", listener);
    })
    .await
    .map_err(|source| ServerError::Serve { listener, source })
}
