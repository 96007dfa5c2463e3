use strum_macros::Display;

/// One of the three mutually exclusive phases of a conversation cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    #[default]
    Initial,
    Followup,
    Results,
}

/// What the input line currently feeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    Symptoms,
    Answer {
        index: usize,
        total: usize,
        question: String,
    },
    /// Nothing to type in; only commands are accepted.
    Commands,
}
