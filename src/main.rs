//! Binary entrypoint wiring the REST surface, the session gate and the
//! MongoDB store supervisor.

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use tokio::net::TcpListener;
use tokio::time::sleep;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hoops_back::{
    config::AppConfig,
    dao::{
        league_store::mongodb::{MongoConfig, MongoLeagueStore},
        remote::{RemoteConfig, RemoteLeagueClient},
    },
    routes,
    services::auth_service::InMemoryCredentials,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();

    let verifier = Arc::new(InMemoryCredentials::new(config.accounts.clone()));
    let remote = build_remote_client(&config);
    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .connect_timeout(config.http_timeout)
        .build()
        .context("building HTTP client")?;

    let app_state = AppState::new(config.clone(), verifier, remote, http);

    tokio::spawn(run_store_supervisor(app_state.clone()));
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state, &config);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Build the remote domain API client when a base URL is configured.
fn build_remote_client(config: &AppConfig) -> Option<Arc<RemoteLeagueClient>> {
    let base_url = config.remote_api_url.as_deref()?;
    let remote_config = RemoteConfig {
        base_url: base_url.to_owned(),
        timeout: config.http_timeout,
    };

    match RemoteLeagueClient::new(remote_config) {
        Ok(client) => {
            info!(url = base_url, "remote API configured; trying it before local storage");
            Some(Arc::new(client))
        }
        Err(err) => {
            warn!(error = %err, "failed to build remote API client; running local-only");
            None
        }
    }
}

/// Supervises the MongoDB connection by retrying in the background and toggling
/// degraded mode when connectivity changes.
async fn run_store_supervisor(state: SharedState) {
    let initial_delay_ms = 1000;
    let mut delay = Duration::from_millis(initial_delay_ms);
    let max_delay = Duration::from_secs(10);

    loop {
        if let Some(store) = state.store().await {
            match store.health_check().await {
                Ok(_) => {
                    // Healthy connection: reset the retry backoff and avoid
                    // hammering the database with pings.
                    delay = Duration::from_millis(initial_delay_ms);
                    sleep(Duration::from_secs(5)).await;
                }
                Err(err) => {
                    // Existing connection failed: try to revive it in place,
                    // dropping to degraded mode when that fails too.
                    warn!(error = %err, "storage ping failed; attempting reconnect");
                    if let Err(reconnect_err) = store.try_reconnect().await {
                        warn!(error = %reconnect_err, "reconnect failed; entering degraded mode");
                        state.clear_store().await;
                    }
                    sleep(delay).await;
                    delay = (delay * 2).min(max_delay);
                }
            }
            continue;
        }

        let config = state.config();
        match MongoConfig::from_uri(&config.mongo_uri, config.mongo_db.as_deref()).await {
            Ok(mongo_config) => match MongoLeagueStore::connect(mongo_config).await {
                Ok(store) => {
                    // Fresh connection and indexes ready: install it and leave
                    // degraded mode.
                    info!("connected to MongoDB; leaving degraded mode");
                    state.install_store(Arc::new(store)).await;
                    delay = Duration::from_millis(initial_delay_ms);
                }
                Err(err) => {
                    // Could not reach MongoDB: wait and retry with
                    // exponential backoff.
                    warn!(error = %err, "MongoDB connection attempt failed");
                    sleep(delay).await;
                    delay = (delay * 2).min(max_delay);
                }
            },
            Err(err) => {
                warn!(error = %err, "invalid MongoDB configuration; retrying");
                sleep(delay).await;
                delay = (delay * 2).min(max_delay);
            }
        }
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState, config: &AppConfig) -> Router<()> {
    routes::router(state)
        .layer(build_cors(config))
        .layer(TraceLayer::new_for_http())
}

/// Credentialed CORS for the one configured development origin.
fn build_cors(config: &AppConfig) -> CorsLayer {
    match config.cors_allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::COOKIE])
            .allow_credentials(true),
        Err(err) => {
            warn!(
                origin = %config.cors_allowed_origin,
                error = %err,
                "invalid CORS origin; cross-origin calls disabled"
            );
            CorsLayer::new()
        }
    }
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
