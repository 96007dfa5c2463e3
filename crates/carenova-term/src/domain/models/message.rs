#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use super::Author;

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum MessageType {
    #[default]
    Normal,
    /// Transient progress notices such as "generating questions".
    Status,
    Error,
}

#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Message {
    pub author: Author,
    pub text: String,
    pub message_type: MessageType,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        Message {
            author,
            text: text.replace('\t', "  "),
            message_type: MessageType::Normal,
        }
    }

    pub fn new_with_type(author: Author, message_type: MessageType, text: &str) -> Message {
        Message {
            author,
            text: text.replace('\t', "  "),
            message_type,
        }
    }

    pub fn user(text: &str) -> Message {
        Message::new(Author::User, text)
    }

    pub fn bot(text: &str) -> Message {
        Message::new(Author::Carenova, text)
    }

    pub fn status(text: &str) -> Message {
        Message::new_with_type(Author::Carenova, MessageType::Status, text)
    }

    pub fn error(text: &str) -> Message {
        Message::new_with_type(Author::Carenova, MessageType::Error, text)
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// The greeting shown when a conversation starts or is reset.
    pub fn greeting() -> Vec<Message> {
        vec![Message::bot(
            "<strong>Hi, I'm Carenova</strong> 🤍<br>Tell me how you're feeling, and I'll guide you step by step.",
        )]
    }
}
