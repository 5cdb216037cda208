use axum::http::Method;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::RelayError;
use crate::platform::{BotApi, OutboundAction};
use crate::response::ResponseEnvelope;

/// Score reported by the client-side game. Absent and `null` fields become
/// their zero value and are rejected by [`ScoreSubmission::validate`].
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub message_id: Option<String>,
}

impl ScoreSubmission {
    pub fn parse(raw: &[u8]) -> Result<Self, RelayError> {
        serde_json::from_slice(raw).map_err(RelayError::InvalidBody)
    }

    /// Reshape into a `setGameScore` call. A score of 0 counts as missing.
    pub fn validate(self) -> Result<OutboundAction, RelayError> {
        let user_id = self.user_id.unwrap_or_default();
        let score = self.score.unwrap_or_default();
        let message_id = self.message_id.unwrap_or_default();

        if user_id.is_empty() || score == 0 || message_id.is_empty() {
            warn!(
                "Missing fields: user_id={:?}, score={}, message_id={:?}",
                user_id, score, message_id
            );
            return Err(RelayError::MissingFields);
        }

        Ok(OutboundAction::SetGameScore {
            user_id,
            score,
            inline_message_id: message_id,
        })
    }
}

/// Handle one request on the score endpoint. Every path yields exactly one
/// envelope and at most one upstream call.
pub async fn submit(
    method: &Method,
    raw: &[u8],
    config: &Config,
    api: &dyn BotApi,
) -> ResponseEnvelope {
    info!(
        "Received score request. Method: {}. Body length: {}",
        method,
        raw.len()
    );

    if *method == Method::OPTIONS {
        return ResponseEnvelope::preflight();
    }

    match relay(raw, config, api).await {
        Ok(()) => ResponseEnvelope::success(),
        Err(e) => {
            match &e {
                RelayError::Configuration(cause) => error!("{}", cause),
                RelayError::InvalidBody(cause) => warn!("Error decoding body: {}", cause),
                RelayError::MissingFields => {}
                RelayError::Upstream(cause) => error!("Error updating score: {}", cause),
            }
            ResponseEnvelope::error(e.status_code(), &e.to_string())
        }
    }
}

async fn relay(raw: &[u8], config: &Config, api: &dyn BotApi) -> Result<(), RelayError> {
    if config.bot_token().is_none() {
        return Err(RelayError::Configuration("TELEGRAM_BOT_TOKEN is not set"));
    }

    let action = ScoreSubmission::parse(raw)?.validate()?;
    api.execute(&action).await?;

    if let OutboundAction::SetGameScore { user_id, score, .. } = &action {
        info!("Successfully updated score {} for user {}", score, user_id);
    }
    Ok(())
}
