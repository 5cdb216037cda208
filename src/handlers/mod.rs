//! Action producers for the three update kinds the bot reacts to.
//! Each is pure: it only decides which Bot API call to make.

pub mod callback_query;
pub mod commands;
pub mod inline_query;
