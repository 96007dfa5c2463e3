mod actions;
mod conversation;
mod events;
mod followup;

pub use actions::*;
pub use conversation::*;
pub use events::*;
pub use followup::*;
