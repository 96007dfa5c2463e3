//! Terminal chat client for the Carenova symptom checker.
//!
//! A conversation walks through three stages: the user describes symptoms,
//! answers generated follow-up questions, and reads the analysis pushed back
//! over the chat socket. The state machine lives in [`domain`], rendering in
//! [`presentation`], and [`application`] wires both to stdin, stdout and the
//! network.

pub mod application;
pub mod configuration;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::ui::start_loop;
pub use configuration::{Config, ConfigKey};
pub use domain::models::{Action, Author, Event, Message, Stage};
pub use domain::services::{Conversation, ConversationProps, LoopControl};
