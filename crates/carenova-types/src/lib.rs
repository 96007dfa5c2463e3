//! Type definitions for the Carenova chat protocol
//!
//! This crate is the shared contract between the symptom-guidance backend and its
//! clients. It covers the request/response pair used to generate follow-up
//! questions, the request sent over the chat socket, and the typed messages the
//! backend pushes back while it analyses a conversation.
//!
//! ## Example
//!
//! ```rust
//! use carenova_types::ServerMessage;
//!
//! let message = ServerMessage::from_json(r#"{"type":"thinking","content":"Analyzing..."}"#).unwrap();
//!
//! assert_eq!(message.kind(), "thinking");
//! ```

pub mod analysis;
pub mod error;
pub mod events;
pub mod requests;

pub use analysis::*;
pub use error::*;
pub use events::*;
pub use requests::*;
