mod action;
mod analysis_channel;
mod author;
mod event;
mod followup;
mod message;
mod session;
mod slash_commands;
mod stage;

pub use action::*;
pub use analysis_channel::*;
pub use author::*;
pub use event::*;
pub use followup::*;
pub use message::*;
pub use session::*;
pub use slash_commands::*;
pub use stage::*;
