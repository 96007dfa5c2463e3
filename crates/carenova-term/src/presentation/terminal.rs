use std::io::Write;

use anyhow::Result;
use carenova_types::AnalysisResult;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use yansi::Paint;

use super::format::{
    connection_label, format_analysis, format_message, prompt_label, stage_title,
};
use super::View;
use crate::domain::models::{Message, Prompt, Stage};

const NEW_CONVERSATION_RULE: &str = "──────── new conversation ────────";

/// Line-oriented renderer writing to a terminal (or any writer).
pub struct TerminalView<W: Write> {
    out: W,
    spinner: bool,
    clear_screen: bool,
    written: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> TerminalView<W> {
        TerminalView {
            out,
            spinner: false,
            clear_screen: true,
            written: false,
        }
    }

    /// Keep previous output on reset instead of clearing the screen.
    pub fn without_clear_screen(mut self) -> TerminalView<W> {
        self.clear_screen = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) -> Result<()> {
        self.written = true;
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> View for TerminalView<W> {
    fn show_message(&mut self, message: &Message) -> Result<()> {
        let formatted = format_message(message);
        self.line(&formatted)
    }

    fn set_stage(&mut self, stage: Stage) -> Result<()> {
        let title = format!("── {} ──", stage_title(stage));
        self.line("")?;
        self.line(&Paint::new(title).bold().to_string())
    }

    fn show_spinner(&mut self, show: bool) -> Result<()> {
        if show && !self.spinner {
            self.line(&Paint::new("⏳ Working on it...").dimmed().to_string())?;
        }
        self.spinner = show;
        Ok(())
    }

    fn set_connection_status(&mut self, connected: bool) -> Result<()> {
        let label = connection_label(connected);
        self.line(&label)
    }

    fn render_questions(&mut self, questions: &[String]) -> Result<()> {
        for (i, question) in questions.iter().enumerate() {
            self.line(&format!("  {}. {}", i + 1, question))?;
        }
        Ok(())
    }

    fn clear_questions(&mut self) -> Result<()> {
        Ok(())
    }

    fn show_followup_submit(&mut self, show: bool) -> Result<()> {
        if show {
            self.line(
                &Paint::new("Answer each question in turn, or use /answer NUMBER TEXT and /submit.")
                    .dimmed()
                    .to_string(),
            )?;
        }
        Ok(())
    }

    fn render_analysis(&mut self, result: &AnalysisResult) -> Result<()> {
        for line in format_analysis(result) {
            self.line(&line)?;
        }
        Ok(())
    }

    fn clear_analysis(&mut self) -> Result<()> {
        Ok(())
    }

    fn reset_messages(&mut self, messages: &[Message]) -> Result<()> {
        if self.clear_screen {
            execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        } else if self.written {
            self.line("")?;
            self.line(&Paint::new(NEW_CONVERSATION_RULE).dimmed().to_string())?;
        }
        self.spinner = false;
        for message in messages {
            self.show_message(message)?;
        }
        Ok(())
    }

    fn alert(&mut self, text: &str) -> Result<()> {
        self.line(&Paint::yellow(format!("⚠ {text}")).bold().to_string())
    }

    fn focus_input(&mut self, prompt: &Prompt) -> Result<()> {
        if let Some(label) = prompt_label(prompt) {
            self.line(&Paint::new(format!("› {label}")).bold().to_string())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(view: TerminalView<Vec<u8>>) -> String {
        String::from_utf8(view.into_inner()).unwrap()
    }

    #[test]
    fn it_prints_spinner_once_per_busy_period() {
        let mut view = TerminalView::new(Vec::new()).without_clear_screen();
        view.show_spinner(true).unwrap();
        view.show_spinner(true).unwrap();
        view.show_spinner(false).unwrap();
        view.show_spinner(true).unwrap();

        assert_eq!(output(view).matches("Working on it").count(), 2);
    }

    #[test]
    fn it_renders_numbered_questions() {
        let mut view = TerminalView::new(Vec::new());
        view.render_questions(&["How long?".to_string(), "Any fever?".to_string()])
            .unwrap();

        let text = output(view);
        assert!(text.contains("1. How long?"));
        assert!(text.contains("2. Any fever?"));
    }

    #[test]
    fn it_prints_greeting_on_reset() {
        let mut view = TerminalView::new(Vec::new()).without_clear_screen();
        view.reset_messages(&Message::greeting()).unwrap();
        view.focus_input(&Prompt::Symptoms).unwrap();

        let text = output(view);
        assert!(text.contains("Hi, I'm Carenova"));
        assert!(text.contains("How are you feeling?"));
        assert!(!text.contains("new conversation"));
    }

    #[test]
    fn it_separates_old_output_when_not_clearing_screen() {
        let mut view = TerminalView::new(Vec::new()).without_clear_screen();
        view.reset_messages(&Message::greeting()).unwrap();
        view.render_questions(&["How long?".to_string()]).unwrap();
        view.clear_questions().unwrap();
        view.clear_analysis().unwrap();
        view.reset_messages(&Message::greeting()).unwrap();

        let text = output(view);
        let rule = text.find("new conversation").unwrap();
        assert_eq!(text.matches("new conversation").count(), 1);
        assert!(text.find("1. How long?").unwrap() < rule);
        assert!(text[rule..].contains("Hi, I'm Carenova"));
    }
}
