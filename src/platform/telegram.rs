use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, InlineQueryId, InlineQueryResult, InlineQueryResultGame,
};
use tracing::{debug, info, warn};
use url::Url;

use super::{BotApi, CallbackQuery, CommandMessage, InboundUpdate, InlineQuery, OutboundAction};
use crate::config::TelegramConfig;
use crate::error::ApiError;

// Only the fields the bot reacts to; everything else in the update is ignored.

#[derive(Debug, Deserialize)]
struct RawUpdate {
    #[serde(default)]
    message: Option<RawMessage>,
    #[serde(default)]
    inline_query: Option<RawInlineQuery>,
    #[serde(default)]
    callback_query: Option<RawCallbackQuery>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    chat: RawChat,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawChat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct RawInlineQuery {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RawCallbackQuery {
    id: String,
    from: RawUser,
    #[serde(default)]
    inline_message_id: Option<String>,
    #[serde(default)]
    game_short_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id: u64,
}

/// Parse a webhook body and classify it by which field is populated.
/// A text message wins over an inline query, which wins over a callback query.
pub fn parse_update(raw: &[u8]) -> Result<InboundUpdate, serde_json::Error> {
    let update: RawUpdate = serde_json::from_slice(raw)?;

    if let Some(message) = update.message {
        if let Some(text) = message.text.filter(|t| !t.is_empty()) {
            return Ok(InboundUpdate::CommandMessage(CommandMessage {
                chat_id: message.chat.id,
                text,
            }));
        }
    }

    if let Some(query) = update.inline_query {
        return Ok(InboundUpdate::InlineQuery(InlineQuery { query_id: query.id }));
    }

    if let Some(query) = update.callback_query {
        return Ok(InboundUpdate::CallbackQuery(CallbackQuery {
            query_id: query.id,
            from_user_id: query.from.id,
            inline_message_id: query.inline_message_id.unwrap_or_default(),
            game_short_name: query.game_short_name.unwrap_or_default(),
        }));
    }

    Ok(InboundUpdate::Unhandled)
}

#[derive(Debug, Serialize)]
struct SetGameScoreRequest<'a> {
    inline_message_id: &'a str,
    user_id: &'a str,
    score: i64,
}

/// Bot API client: teloxide for the chat actions, a direct JSON call for
/// `setGameScore` so the user id is forwarded exactly as the game sent it.
pub struct TelegramClient {
    bot: Bot,
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig, timeout: std::time::Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let api_url: Url = config
            .api_url
            .parse()
            .with_context(|| format!("Invalid Bot API URL: {}", config.api_url))?;

        let bot = Bot::with_client(config.bot_token.clone(), http.clone()).set_api_url(api_url);

        Ok(Self {
            bot,
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.bot_token.clone(),
        })
    }

    /// Point the platform at our webhook endpoint.
    pub async fn register_webhook(&self, webhook_url: &str) -> Result<(), ApiError> {
        let url = parse_url(webhook_url)?;
        self.bot.set_webhook(url).await?;
        info!("Webhook registered");
        Ok(())
    }

    async fn set_game_score(
        &self,
        user_id: &str,
        score: i64,
        inline_message_id: &str,
    ) -> Result<(), ApiError> {
        let url = format!("{}/bot{}/setGameScore", self.api_url, self.token);
        let request = SetGameScoreRequest {
            inline_message_id,
            user_id,
            score,
        };

        let response = self.http.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Failed to read setGameScore error body: {}", e.without_url());
                    status.canonical_reason().unwrap_or_default().to_string()
                }
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

fn parse_url(raw: &str) -> Result<Url, ApiError> {
    Url::parse(raw).map_err(|source| ApiError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

#[async_trait]
impl BotApi for TelegramClient {
    async fn execute(&self, action: &OutboundAction) -> Result<(), ApiError> {
        debug!("Calling Bot API method {}", action.method());

        match action {
            OutboundAction::SendWelcomeMessage { chat_id, text } => {
                self.bot.send_message(ChatId(*chat_id), text.clone()).await?;
            }
            OutboundAction::LaunchGamePrompt {
                chat_id,
                game_short_name,
            } => {
                self.bot
                    .send_game(ChatId(*chat_id), game_short_name.clone())
                    .await?;
            }
            OutboundAction::AnswerInlineWithGame {
                query_id,
                game_short_name,
            } => {
                let result = InlineQueryResult::Game(InlineQueryResultGame::new(
                    game_short_name.clone(),
                    game_short_name.clone(),
                ));
                self.bot
                    .answer_inline_query(InlineQueryId(query_id.clone()), vec![result])
                    .await?;
            }
            OutboundAction::AnswerCallbackWithUrl { query_id, url } => {
                let url = parse_url(url)?;
                self.bot
                    .answer_callback_query(CallbackQueryId(query_id.clone()))
                    .url(url)
                    .await?;
            }
            OutboundAction::SetGameScore {
                user_id,
                score,
                inline_message_id,
            } => {
                self.set_game_score(user_id, *score, inline_message_id)
                    .await?;
            }
        }

        Ok(())
    }
}
