use crate::config::GameConfig;
use crate::platform::{InlineQuery, OutboundAction};

/// Every inline query is answered with the one game result.
pub fn handle(query: &InlineQuery, game: &GameConfig) -> OutboundAction {
    OutboundAction::AnswerInlineWithGame {
        query_id: query.query_id.clone(),
        game_short_name: game.short_name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_with_configured_game() {
        let query = InlineQuery {
            query_id: "q-1".to_string(),
        };
        assert_eq!(
            handle(&query, &GameConfig::default()),
            OutboundAction::AnswerInlineWithGame {
                query_id: "q-1".to_string(),
                game_short_name: "snake4d".to_string(),
            }
        );
    }
}
