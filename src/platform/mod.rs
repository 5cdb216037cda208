pub mod telegram;

#[cfg(test)]
pub mod stub;

use async_trait::async_trait;

use crate::error::ApiError;

/// One inbound platform update, classified once at the parse boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundUpdate {
    CommandMessage(CommandMessage),
    InlineQuery(InlineQuery),
    CallbackQuery(CallbackQuery),
    Unhandled,
}

/// A text message; `text` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMessage {
    pub chat_id: i64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineQuery {
    pub query_id: String,
}

/// A game-button click. `inline_message_id` is empty when the game was
/// posted as a regular chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackQuery {
    pub query_id: String,
    pub from_user_id: u64,
    pub inline_message_id: String,
    pub game_short_name: String,
}

/// A single call against the Bot API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundAction {
    SendWelcomeMessage {
        chat_id: i64,
        text: String,
    },
    LaunchGamePrompt {
        chat_id: i64,
        game_short_name: String,
    },
    AnswerInlineWithGame {
        query_id: String,
        game_short_name: String,
    },
    AnswerCallbackWithUrl {
        query_id: String,
        url: String,
    },
    SetGameScore {
        user_id: String,
        score: i64,
        inline_message_id: String,
    },
}

impl OutboundAction {
    /// Bot API method name, for logging.
    pub fn method(&self) -> &'static str {
        match self {
            OutboundAction::SendWelcomeMessage { .. } => "sendMessage",
            OutboundAction::LaunchGamePrompt { .. } => "sendGame",
            OutboundAction::AnswerInlineWithGame { .. } => "answerInlineQuery",
            OutboundAction::AnswerCallbackWithUrl { .. } => "answerCallbackQuery",
            OutboundAction::SetGameScore { .. } => "setGameScore",
        }
    }
}

/// Executes outbound actions against the platform.
#[async_trait]
pub trait BotApi: Send + Sync {
    async fn execute(&self, action: &OutboundAction) -> Result<(), ApiError>;
}
