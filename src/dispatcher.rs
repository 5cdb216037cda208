use tracing::debug;

use crate::config::GameConfig;
use crate::handlers::{callback_query, commands, inline_query};
use crate::platform::{InboundUpdate, OutboundAction};

/// Route one update to its handler. Returns `None` when the update needs no
/// reply, which is not an error.
pub fn dispatch(update: &InboundUpdate, game: &GameConfig) -> Option<OutboundAction> {
    match update {
        InboundUpdate::CommandMessage(message) => {
            debug!("Message in chat {}: {}", message.chat_id, message.text);
            commands::handle(message, game)
        }
        InboundUpdate::InlineQuery(query) => {
            debug!("Inline query {}", query.query_id);
            Some(inline_query::handle(query, game))
        }
        InboundUpdate::CallbackQuery(query) if query.game_short_name == game.short_name => {
            debug!(
                "Game callback {} from user {}",
                query.query_id, query.from_user_id
            );
            Some(callback_query::handle(query, game))
        }
        InboundUpdate::CallbackQuery(query) => {
            debug!(
                "Ignoring callback for game '{}'",
                query.game_short_name
            );
            None
        }
        InboundUpdate::Unhandled => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{CallbackQuery, CommandMessage, InlineQuery};

    fn game() -> GameConfig {
        GameConfig {
            url: "https://g.example".to_string(),
            ..GameConfig::default()
        }
    }

    fn callback(game_short_name: &str) -> InboundUpdate {
        InboundUpdate::CallbackQuery(CallbackQuery {
            query_id: "cb".to_string(),
            from_user_id: 7,
            inline_message_id: "xyz".to_string(),
            game_short_name: game_short_name.to_string(),
        })
    }

    fn text(text: &str) -> InboundUpdate {
        InboundUpdate::CommandMessage(CommandMessage {
            chat_id: 1,
            text: text.to_string(),
        })
    }

    #[test]
    fn test_matching_callback_redirects() {
        assert_eq!(
            dispatch(&callback("snake4d"), &game()),
            Some(OutboundAction::AnswerCallbackWithUrl {
                query_id: "cb".to_string(),
                url: "https://g.example#userId=7&messageId=xyz".to_string(),
            })
        );
    }

    #[test]
    fn test_foreign_callback_is_ignored() {
        assert_eq!(dispatch(&callback("other-game"), &game()), None);
        assert_eq!(dispatch(&callback(""), &game()), None);
    }

    #[test]
    fn test_commands() {
        assert!(matches!(
            dispatch(&text("/start"), &game()),
            Some(OutboundAction::SendWelcomeMessage { chat_id: 1, .. })
        ));
        assert!(matches!(
            dispatch(&text("/game"), &game()),
            Some(OutboundAction::LaunchGamePrompt { chat_id: 1, .. })
        ));
        assert_eq!(dispatch(&text("good game"), &game()), None);
    }

    #[test]
    fn test_inline_query_always_answered() {
        let update = InboundUpdate::InlineQuery(InlineQuery {
            query_id: "iq".to_string(),
        });
        assert_eq!(
            dispatch(&update, &game()),
            Some(OutboundAction::AnswerInlineWithGame {
                query_id: "iq".to_string(),
                game_short_name: "snake4d".to_string(),
            })
        );
    }

    #[test]
    fn test_unhandled_produces_nothing() {
        assert_eq!(dispatch(&InboundUpdate::Unhandled, &game()), None);
    }
}
