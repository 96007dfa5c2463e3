use anyhow::Result;
use carenova_types::AnalysisResult;

use super::View;
use crate::domain::models::{Message, Prompt, Stage};

#[derive(Clone, Debug, PartialEq)]
pub enum ViewCall {
    Message(Message),
    Stage(Stage),
    Spinner(bool),
    Connection(bool),
    Questions(Vec<String>),
    ClearQuestions,
    FollowupSubmit(bool),
    Analysis(AnalysisResult),
    ClearAnalysis,
    ResetMessages(Vec<Message>),
    Alert(String),
    Focus(Prompt),
}

/// View double that records every call in order.
#[derive(Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
}

impl RecordingView {
    pub fn messages(&self) -> Vec<&Message> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ViewCall::Message(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn alerts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ViewCall::Alert(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &ViewCall) -> usize {
        self.calls.iter().filter(|call| *call == wanted).count()
    }

    pub fn last_questions(&self) -> Option<&Vec<String>> {
        self.calls.iter().rev().find_map(|call| match call {
            ViewCall::Questions(questions) => Some(questions),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl View for RecordingView {
    fn show_message(&mut self, message: &Message) -> Result<()> {
        self.calls.push(ViewCall::Message(message.clone()));
        Ok(())
    }

    fn set_stage(&mut self, stage: Stage) -> Result<()> {
        self.calls.push(ViewCall::Stage(stage));
        Ok(())
    }

    fn show_spinner(&mut self, show: bool) -> Result<()> {
        self.calls.push(ViewCall::Spinner(show));
        Ok(())
    }

    fn set_connection_status(&mut self, connected: bool) -> Result<()> {
        self.calls.push(ViewCall::Connection(connected));
        Ok(())
    }

    fn render_questions(&mut self, questions: &[String]) -> Result<()> {
        self.calls.push(ViewCall::Questions(questions.to_vec()));
        Ok(())
    }

    fn clear_questions(&mut self) -> Result<()> {
        self.calls.push(ViewCall::ClearQuestions);
        Ok(())
    }

    fn show_followup_submit(&mut self, show: bool) -> Result<()> {
        self.calls.push(ViewCall::FollowupSubmit(show));
        Ok(())
    }

    fn render_analysis(&mut self, result: &AnalysisResult) -> Result<()> {
        self.calls.push(ViewCall::Analysis(result.clone()));
        Ok(())
    }

    fn clear_analysis(&mut self) -> Result<()> {
        self.calls.push(ViewCall::ClearAnalysis);
        Ok(())
    }

    fn reset_messages(&mut self, messages: &[Message]) -> Result<()> {
        self.calls.push(ViewCall::ResetMessages(messages.to_vec()));
        Ok(())
    }

    fn alert(&mut self, text: &str) -> Result<()> {
        self.calls.push(ViewCall::Alert(text.to_string()));
        Ok(())
    }

    fn focus_input(&mut self, prompt: &Prompt) -> Result<()> {
        self.calls.push(ViewCall::Focus(prompt.clone()));
        Ok(())
    }
}
