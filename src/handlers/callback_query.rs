use crate::config::GameConfig;
use crate::platform::{CallbackQuery, OutboundAction};

/// Launch URL for the client-side game. The fragment carries the player and
/// the inline message so the game can submit its score without asking us.
pub fn launch_url(game_url: &str, from_user_id: u64, inline_message_id: &str) -> String {
    format!(
        "{}#userId={}&messageId={}",
        game_url, from_user_id, inline_message_id
    )
}

/// Redirect the player to the game. No alert text is shown.
pub fn handle(query: &CallbackQuery, game: &GameConfig) -> OutboundAction {
    OutboundAction::AnswerCallbackWithUrl {
        query_id: query.query_id.clone(),
        url: launch_url(&game.url, query.from_user_id, &query.inline_message_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_url_format() {
        assert_eq!(
            launch_url("https://g.example", 7, "xyz"),
            "https://g.example#userId=7&messageId=xyz"
        );
    }

    #[test]
    fn test_handle_uses_configured_url() {
        let game = GameConfig {
            url: "https://snake4d.example".to_string(),
            ..GameConfig::default()
        };
        let query = CallbackQuery {
            query_id: "cb-9".to_string(),
            from_user_id: 123456789,
            inline_message_id: "AAQ-x_1".to_string(),
            game_short_name: "snake4d".to_string(),
        };
        assert_eq!(
            handle(&query, &game),
            OutboundAction::AnswerCallbackWithUrl {
                query_id: "cb-9".to_string(),
                url: "https://snake4d.example#userId=123456789&messageId=AAQ-x_1".to_string(),
            }
        );
    }
}
