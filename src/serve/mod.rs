mod etag_middleware;
mod health;
mod html;
mod routes;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tracing::{debug, error, info};

use crate::{clients::ClientShares, env::EnvConfig, log, penalties::PenaltyCalculator};

pub use health::ServeHealth;

pub type StateExtension = Extension<Arc<State>>;

pub struct State {
    pub calculator: PenaltyCalculator,
    pub health: ServeHealth,
}

impl State {
    pub fn new(client_shares: ClientShares) -> Self {
        let health = ServeHealth::new(&client_shares);
        Self {
            calculator: PenaltyCalculator::new(client_shares),
            health,
        }
    }
}

pub fn router(state: Arc<State>) -> Router {
    Router::new()
        .route("/", get(routes::index).post(routes::calculate_form))
        .route("/api/v1/penalties", post(routes::calculate_json))
        .route("/api/v1/client-shares", get(routes::client_shares))
        .route("/healthz", get(routes::healthz))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(etag_middleware::middleware_fn))
                .layer(CompressionLayer::new())
                .layer(Extension(state)),
        )
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received, stopping server");
}

pub async fn start_server() -> anyhow::Result<()> {
    let env_config = EnvConfig::from_env().context("failed to read server config from env")?;

    log::init(&env_config);

    let client_shares = match &env_config.client_shares_path {
        Some(path) => ClientShares::from_file(path)
            .with_context(|| format!("failed to load client shares from {}", path.display()))?,
        None => {
            debug!("no CLIENT_SHARES_PATH set, using built-in client shares");
            ClientShares::default()
        }
    };

    let shared_state = Arc::new(State::new(client_shares));
    let app = router(shared_state);

    let socket_addr = SocketAddr::from((env_config.bind_address(), env_config.port));
    info!(%socket_addr, "server listening");

    axum::Server::bind(&socket_addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    Ok(())
}
