#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use carenova_client::SocketEvent;
use carenova_types::{AnalysisRequest, AnalysisResult, ServerMessage};
use tokio::sync::mpsc;

use crate::domain::models::{
    help_text, Action, Event, FollowupQuestions, Message, Prompt, SessionId, SlashCommand, Stage,
};
use crate::presentation::View;

pub const MIN_SYMPTOM_LENGTH: usize = 5;

#[derive(Clone, Copy, Debug)]
pub struct ConversationProps {
    pub reload_delay: Duration,
    pub focus_delay: Duration,
}

impl Default for ConversationProps {
    fn default() -> ConversationProps {
        ConversationProps {
            reload_delay: Duration::from_millis(2000),
            focus_delay: Duration::from_millis(100),
        }
    }
}

/// What the UI loop should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    /// Tear the session down and start a fresh one.
    Reload,
    Quit,
}

#[derive(Debug, Default)]
pub struct ConversationState {
    pub session_id: SessionId,
    pub stage: Stage,
    pub initial_symptoms: String,
    pub followup_questions: Vec<String>,
    /// Index-aligned with `followup_questions`; empty strings are unanswered.
    pub followup_answers: Vec<String>,
    pub analysis_result: Option<AnalysisResult>,
    pub connected: bool,
    pub busy: bool,
    /// Bumped on every reset so late results of an earlier cycle are dropped.
    pub cycle: u64,
    pub awaiting_questions: bool,
    pub analysis_requested: bool,
    /// Next answer slot a typed line fills.
    pub answer_cursor: usize,
}

/// The conversation controller: owns the state and the view, and turns events
/// into view updates and actions.
pub struct Conversation<V: View> {
    state: ConversationState,
    view: V,
    action_tx: mpsc::UnboundedSender<Action>,
    props: ConversationProps,
}

impl<V: View> Conversation<V> {
    pub fn new(
        view: V,
        action_tx: mpsc::UnboundedSender<Action>,
        props: ConversationProps,
    ) -> Conversation<V> {
        Conversation {
            state: ConversationState::default(),
            view,
            action_tx,
            props,
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn start(&mut self) -> Result<()> {
        tracing::info!(session_id = %self.state.session_id, "starting conversation");
        self.view.reset_messages(&Message::greeting())?;
        self.view.set_connection_status(self.state.connected)?;
        self.dispatch(Action::CheckHealth)?;
        self.enter_stage(Stage::Initial)
    }

    pub fn handle_event(&mut self, event: Event) -> Result<LoopControl> {
        match event {
            Event::Input(line) => return self.handle_input(&line),
            Event::InputClosed | Event::KeyboardCTRLC => return Ok(LoopControl::Quit),
            Event::Reload => return Ok(LoopControl::Reload),
            Event::Socket(socket_event) => self.handle_socket_event(socket_event)?,
            Event::FollowupQuestionsLoaded { cycle, questions } => {
                self.questions_loaded(cycle, questions)?
            }
            Event::AnalysisSendFailed(err) => {
                tracing::error!(error = %err, "analysis request could not be sent");
                self.state.analysis_requested = false;
                self.set_connected(false)?;
                self.reload_after_disconnect()?;
            }
            Event::BackendUnhealthy(reason) => {
                self.view.show_message(&Message::error(&format!(
                    "Hey, it looks like the Carenova server isn't fully available, so the guidance may be limited.<br><br>{reason}"
                )))?;
            }
            Event::FocusInput => {
                let prompt = self.current_prompt();
                self.view.focus_input(&prompt)?;
            }
        }

        Ok(LoopControl::Continue)
    }

    pub fn current_prompt(&self) -> Prompt {
        match self.state.stage {
            Stage::Initial if !self.state.awaiting_questions => Prompt::Symptoms,
            Stage::Followup if !self.state.analysis_requested => {
                match self.state.followup_questions.get(self.state.answer_cursor) {
                    Some(question) => Prompt::Answer {
                        index: self.state.answer_cursor,
                        total: self.state.followup_questions.len(),
                        question: question.clone(),
                    },
                    None => Prompt::Commands,
                }
            }
            _ => Prompt::Commands,
        }
    }

    /// Initial → Followup, first half: validate and ask for questions.
    pub fn submit_symptoms(&mut self, text: &str) -> Result<()> {
        if self.state.stage != Stage::Initial {
            tracing::warn!(stage = %self.state.stage, "symptoms submitted outside the initial stage");
            return Ok(());
        }

        if self.state.awaiting_questions {
            return self
                .view
                .alert("Still generating follow-up questions, hang tight.");
        }

        let symptoms = text.trim();
        if symptoms.chars().count() < MIN_SYMPTOM_LENGTH {
            return self
                .view
                .alert("Please describe your symptoms in at least 5 characters.");
        }

        self.state.initial_symptoms = symptoms.to_string();
        self.view.show_message(&Message::user(symptoms))?;
        self.view.show_message(&Message::bot(
            "Thank you for sharing 🤍<br><br><em>Let me generate some follow-up questions...</em>",
        ))?;
        self.view
            .show_message(&Message::status("📝 Generating follow-up questions..."))?;
        self.set_busy(true)?;

        self.state.awaiting_questions = true;
        self.dispatch(Action::FetchFollowupQuestions {
            cycle: self.state.cycle,
            symptoms: symptoms.to_string(),
        })
    }

    /// Initial → Followup, second half: show whichever question set arrived.
    pub fn questions_loaded(&mut self, cycle: u64, loaded: FollowupQuestions) -> Result<()> {
        if cycle != self.state.cycle || !self.state.awaiting_questions {
            tracing::debug!(
                cycle,
                current = self.state.cycle,
                "dropping stale follow-up questions"
            );
            return Ok(());
        }

        self.state.awaiting_questions = false;
        self.set_busy(false)?;

        if loaded.is_fallback() {
            self.view.show_message(&Message::error(
                "❌ Failed to generate questions. Using defaults...",
            ))?;
        }

        self.enter_stage(Stage::Followup)?;
        self.render_questions(loaded.questions)?;

        let prompt = self.current_prompt();
        self.view.focus_input(&prompt)
    }

    fn render_questions(&mut self, questions: Vec<String>) -> Result<()> {
        self.view.clear_questions()?;
        self.state.followup_answers = vec![String::new(); questions.len()];
        self.state.answer_cursor = 0;
        self.state.followup_questions = questions;
        self.view.render_questions(&self.state.followup_questions)?;
        self.view.show_followup_submit(true)
    }

    /// Store an answer. Returns false when there is no such question.
    pub fn update_answer(&mut self, index: usize, text: &str) -> bool {
        if self.state.stage != Stage::Followup {
            return false;
        }

        match self.state.followup_answers.get_mut(index) {
            Some(slot) => {
                *slot = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Followup → Results, first half: every answer must be filled in.
    pub fn submit_followups(&mut self) -> Result<()> {
        if self.state.stage != Stage::Followup {
            tracing::warn!(stage = %self.state.stage, "follow-ups submitted outside the follow-up stage");
            return Ok(());
        }

        if self.state.analysis_requested {
            return self
                .view
                .show_message(&Message::status("Still analyzing your answers..."));
        }

        if let Some(missing) = self
            .state
            .followup_answers
            .iter()
            .position(|answer| answer.trim().is_empty())
        {
            self.view
                .alert("Please answer all questions before proceeding.")?;
            self.state.answer_cursor = missing;
            let prompt = self.current_prompt();
            return self.view.focus_input(&prompt);
        }

        for answer in &self.state.followup_answers {
            self.view.show_message(&Message::user(answer))?;
        }

        self.send_analysis_request()
    }

    pub fn reset(&mut self) -> Result<()> {
        tracing::info!(session_id = %self.state.session_id, "resetting conversation");
        self.dispatch(Action::CancelTimers)?;

        self.state = ConversationState {
            connected: self.state.connected,
            cycle: self.state.cycle + 1,
            ..Default::default()
        };

        self.view.reset_messages(&Message::greeting())?;
        self.view.clear_questions()?;
        self.view.show_followup_submit(false)?;
        self.view.clear_analysis()?;
        self.view.show_spinner(false)?;
        self.enter_stage(Stage::Initial)
    }

    fn send_analysis_request(&mut self) -> Result<()> {
        if !self.state.connected {
            return self.reload_after_disconnect();
        }

        let request = AnalysisRequest {
            session_id: self.state.session_id.to_string(),
            initial_symptoms: self.state.initial_symptoms.clone(),
            followup_answers: self.state.followup_answers.clone(),
        };

        tracing::info!(
            session_id = %request.session_id,
            answers = request.followup_answers.len(),
            "sending analysis request"
        );
        self.state.analysis_requested = true;
        self.state.answer_cursor = self.state.followup_answers.len();
        self.dispatch(Action::SendAnalysis(request))
    }

    fn reload_after_disconnect(&mut self) -> Result<()> {
        self.view
            .show_message(&Message::error("❌ Server disconnected. Reloading..."))?;
        self.dispatch(Action::ScheduleReload(self.props.reload_delay))
    }

    fn handle_input(&mut self, line: &str) -> Result<LoopControl> {
        if let Some(command) = SlashCommand::parse(line) {
            return self.handle_command(command);
        }

        match self.state.stage {
            Stage::Initial => self.submit_symptoms(line)?,
            Stage::Followup => self.answer_next(line)?,
            Stage::Results => self
                .view
                .alert("Your results are ready. Type /reset to start a new conversation.")?,
        }

        Ok(LoopControl::Continue)
    }

    fn handle_command(&mut self, command: SlashCommand) -> Result<LoopControl> {
        match command {
            SlashCommand::Quit => return Ok(LoopControl::Quit),
            SlashCommand::Reset => self.reset()?,
            SlashCommand::Submit => self.submit_followups()?,
            SlashCommand::Answer { number, text } => {
                if !self.update_answer(number - 1, &text) {
                    self.view
                        .alert(&format!("There is no question {number} to answer."))?;
                }
            }
            SlashCommand::Help => self.view.show_message(&Message::bot(&help_text()))?,
            SlashCommand::Status => {
                let connection = if self.state.connected {
                    "connected"
                } else {
                    "disconnected"
                };
                self.view.show_message(&Message::status(&format!(
                    "Session: {}<br>Stage: {}<br>Connection: {}",
                    self.state.session_id, self.state.stage, connection
                )))?;
            }
            SlashCommand::Invalid(usage) => self.view.alert(&usage)?,
            SlashCommand::Unknown(name) => self.view.alert(&format!(
                "Unknown command /{name}. Type /help for a list of commands."
            ))?,
        }

        Ok(LoopControl::Continue)
    }

    fn answer_next(&mut self, line: &str) -> Result<()> {
        if self.state.analysis_requested {
            return self
                .view
                .show_message(&Message::status("Still analyzing your answers..."));
        }

        let index = self.state.answer_cursor;
        let total = self.state.followup_answers.len();
        if index >= total {
            return self.view.alert(
                "All questions have answers. Use /answer NUMBER TEXT to change one, or /submit.",
            );
        }

        self.update_answer(index, line);
        self.state.answer_cursor = index + 1;

        if self.state.answer_cursor < total {
            let prompt = self.current_prompt();
            return self.view.focus_input(&prompt);
        }

        self.submit_followups()
    }

    fn handle_socket_event(&mut self, event: SocketEvent) -> Result<()> {
        match event {
            SocketEvent::Opened => {
                tracing::info!("chat socket connected");
                self.set_connected(true)
            }
            SocketEvent::Message(message) => self.handle_server_message(message),
            SocketEvent::Unrecognized { kind } => {
                tracing::warn!(kind = %kind, "ignoring unrecognized server message");
                Ok(())
            }
            SocketEvent::Malformed(err) => {
                tracing::warn!(error = %err, "ignoring malformed server message");
                Ok(())
            }
            SocketEvent::Error(err) => {
                tracing::error!(error = %err, "chat socket error");
                self.view.show_message(&Message::error(
                    "❌ <strong>Connection Error</strong><br>Failed to connect to server. Please check if the server is running.",
                ))?;
                self.set_connected(false)?;
                self.abandon_pending_analysis()
            }
            SocketEvent::Closed => {
                tracing::info!("chat socket disconnected");
                self.set_connected(false)?;
                self.abandon_pending_analysis()
            }
        }
    }

    /// The socket went away while an analysis was outstanding; no result will
    /// arrive on it, so the next `/submit` takes the disconnected path.
    fn abandon_pending_analysis(&mut self) -> Result<()> {
        if !self.state.analysis_requested {
            return Ok(());
        }

        tracing::warn!(session_id = %self.state.session_id, "connection lost while waiting for analysis");
        self.state.analysis_requested = false;
        self.set_busy(false)?;
        self.view.show_message(&Message::error(
            "❌ Connection lost before your results arrived. Type /submit to try again.",
        ))
    }

    fn handle_server_message(&mut self, message: ServerMessage) -> Result<()> {
        match message {
            ServerMessage::Thinking { content } => {
                self.view.show_message(&Message::bot(&content))?;
                self.set_busy(true)
            }
            ServerMessage::Analysis { data } => {
                if self.state.stage != Stage::Followup {
                    tracing::warn!(stage = %self.state.stage, "dropping analysis outside the follow-up stage");
                    return Ok(());
                }

                self.set_busy(false)?;
                self.state.analysis_requested = false;
                self.view.render_analysis(&data)?;
                self.state.analysis_result = Some(data);
                self.enter_stage(Stage::Results)
            }
            ServerMessage::Error { message } => {
                self.set_busy(false)?;
                self.state.analysis_requested = false;
                self.view.show_message(&Message::error(&format!(
                    "❌ <strong>Error</strong><br>{message}"
                )))
            }
        }
    }

    fn enter_stage(&mut self, stage: Stage) -> Result<()> {
        tracing::debug!(from = %self.state.stage, to = %stage, "changing stage");
        self.state.stage = stage;
        self.view.set_stage(stage)?;

        if stage == Stage::Initial {
            self.dispatch(Action::ScheduleFocus(self.props.focus_delay))?;
        }

        Ok(())
    }

    fn set_busy(&mut self, busy: bool) -> Result<()> {
        self.state.busy = busy;
        self.view.show_spinner(busy)
    }

    fn set_connected(&mut self, connected: bool) -> Result<()> {
        self.state.connected = connected;
        self.view.set_connection_status(connected)
    }

    fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx.send(action)?;
        Ok(())
    }
}
