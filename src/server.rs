use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::Method,
    routing::{get, post},
    Router,
};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::dispatcher;
use crate::platform::{telegram, BotApi, OutboundAction};
use crate::relay;
use crate::response::ResponseEnvelope;

/// Shared, read-only application state
pub struct AppState {
    pub config: Config,
    pub api: Arc<dyn BotApi>,
}

impl AppState {
    pub fn new(config: Config, api: Arc<dyn BotApi>) -> Self {
        Self { config, api }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/webhook", post(webhook))
        .route("/score", post(score).options(score))
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
}

/// Serve both endpoints until the process is stopped.
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let addr = state.config.server.listen_addr.clone();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}

async fn score(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> ResponseEnvelope {
    relay::submit(&method, &body, &state.config, state.api.as_ref()).await
}

async fn webhook(State(state): State<Arc<AppState>>, body: Bytes) -> ResponseEnvelope {
    if body.is_empty() {
        return ResponseEnvelope::text(400, "Invalid request body");
    }

    let missing = state.config.missing_settings();
    if !missing.is_empty() {
        error!("Required settings are not set: {}", missing.join(", "));
        return ResponseEnvelope::text(500, "Server configuration error");
    }

    let update = match telegram::parse_update(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!("Failed to parse update: {}", e);
            return ResponseEnvelope::text(400, "Invalid update format");
        }
    };

    if let Some(action) = dispatcher::dispatch(&update, &state.config.game) {
        execute_logged(state.api.as_ref(), &action).await;
    }

    ResponseEnvelope::text(200, "OK")
}

/// Run an action for the webhook. Failures stop here: they are logged and
/// the platform still gets 200 so it does not redeliver the update.
async fn execute_logged(api: &dyn BotApi, action: &OutboundAction) {
    if let Err(e) = api.execute(action).await {
        error!("Error handling update ({}): {}", action.method(), e);
    }
}
