use crate::config::GameConfig;
use crate::platform::{CommandMessage, OutboundAction};

/// `/start` greets, `/game` posts the game; any other text is ignored.
pub fn handle(message: &CommandMessage, game: &GameConfig) -> Option<OutboundAction> {
    match message.text.as_str() {
        "/start" => Some(OutboundAction::SendWelcomeMessage {
            chat_id: message.chat_id,
            text: game.welcome_text.clone(),
        }),
        "/game" => Some(OutboundAction::LaunchGamePrompt {
            chat_id: message.chat_id,
            game_short_name: game.short_name.clone(),
        }),
        _ => None,
    }
}
