use carenova_client::SocketEvent;

use super::FollowupQuestions;

#[derive(Debug)]
pub enum Event {
    /// A line typed by the user.
    Input(String),
    InputClosed,
    KeyboardCTRLC,
    Socket(SocketEvent),
    FollowupQuestionsLoaded {
        cycle: u64,
        questions: FollowupQuestions,
    },
    AnalysisSendFailed(String),
    BackendUnhealthy(String),
    FocusInput,
    Reload,
}
