#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Status,
    Reset,
    Quit,
    Submit,
    /// Replace the answer to question `number` (1-based).
    Answer { number: usize, text: String },
    Invalid(String),
    Unknown(String),
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let text = text.trim();
        if !text.starts_with('/') {
            return None;
        }

        let mut parts = text[1..].splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default().to_lowercase();
        let rest = parts.next().unwrap_or_default().trim();

        let command = match name.as_str() {
            "help" | "h" => SlashCommand::Help,
            "status" | "s" => SlashCommand::Status,
            "reset" | "r" => SlashCommand::Reset,
            "quit" | "exit" | "q" => SlashCommand::Quit,
            "submit" => SlashCommand::Submit,
            "answer" | "a" => {
                let mut args = rest.splitn(2, char::is_whitespace);
                match args.next().and_then(|n| n.parse::<usize>().ok()) {
                    Some(number) if number > 0 => SlashCommand::Answer {
                        number,
                        text: args.next().unwrap_or_default().trim().to_string(),
                    },
                    _ => SlashCommand::Invalid("Usage: /answer NUMBER TEXT".to_string()),
                }
            }
            other => SlashCommand::Unknown(other.to_string()),
        };

        Some(command)
    }
}

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /answer (/a) [NUMBER] [TEXT] - Replaces your answer to follow-up question NUMBER.
- /submit - Submits your follow-up answers for analysis.
- /reset (/r) - Starts a new conversation with a new session.
- /status (/s) - Shows the session, stage and connection status.
- /quit /exit (/q) - Exit Carenova.
- /help (/h) - Provides this help menu.

HOTKEYS:
- CTRL+C - Exit.
        "#;

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_ignores_plain_text() {
        assert_eq!(SlashCommand::parse("I have a headache"), None);
    }

    #[test]
    fn it_parses_aliases() {
        assert_eq!(SlashCommand::parse("/q"), Some(SlashCommand::Quit));
        assert_eq!(SlashCommand::parse(" /EXIT "), Some(SlashCommand::Quit));
        assert_eq!(SlashCommand::parse("/r"), Some(SlashCommand::Reset));
        assert_eq!(SlashCommand::parse("/help"), Some(SlashCommand::Help));
        assert_eq!(SlashCommand::parse("/submit"), Some(SlashCommand::Submit));
    }

    #[test]
    fn it_parses_answer() {
        assert_eq!(
            SlashCommand::parse("/answer 2 about three days"),
            Some(SlashCommand::Answer {
                number: 2,
                text: "about three days".to_string()
            })
        );
        assert!(matches!(
            SlashCommand::parse("/answer zero days"),
            Some(SlashCommand::Invalid(_))
        ));
        assert!(matches!(
            SlashCommand::parse("/a 0 x"),
            Some(SlashCommand::Invalid(_))
        ));
    }

    #[test]
    fn it_reports_unknown_commands() {
        assert_eq!(
            SlashCommand::parse("/dance"),
            Some(SlashCommand::Unknown("dance".to_string()))
        );
    }
}
