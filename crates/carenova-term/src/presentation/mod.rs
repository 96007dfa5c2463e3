//! Presentation layer.
//!
//! Everything the conversation shows goes through the [`View`] trait. Rendering
//! functions only see what they are given, never the conversation state itself.

mod format;
mod terminal;
#[cfg(test)]
pub mod testing;

use anyhow::Result;
use carenova_types::AnalysisResult;

pub use format::*;
pub use terminal::TerminalView;

use crate::domain::models::{Message, Prompt, Stage};

pub trait View {
    /// Append a chat bubble.
    fn show_message(&mut self, message: &Message) -> Result<()>;
    /// Make `stage` the only visible stage.
    fn set_stage(&mut self, stage: Stage) -> Result<()>;
    fn show_spinner(&mut self, show: bool) -> Result<()>;
    fn set_connection_status(&mut self, connected: bool) -> Result<()>;
    fn render_questions(&mut self, questions: &[String]) -> Result<()>;
    /// Remove rendered questions. Append-only views may keep them in the
    /// scrollback; `reset_messages` marks where the new transcript starts.
    fn clear_questions(&mut self) -> Result<()>;
    fn show_followup_submit(&mut self, show: bool) -> Result<()>;
    fn render_analysis(&mut self, result: &AnalysisResult) -> Result<()>;
    /// Remove a rendered analysis. Same contract as `clear_questions`.
    fn clear_analysis(&mut self) -> Result<()>;
    /// Replace the whole transcript with `messages`. Views that cannot erase
    /// earlier output must separate it visibly from what follows.
    fn reset_messages(&mut self, messages: &[Message]) -> Result<()>;
    /// Blocking, user-facing warning. Does not become part of the transcript.
    fn alert(&mut self, text: &str) -> Result<()>;
    fn focus_input(&mut self, prompt: &Prompt) -> Result<()>;
}
