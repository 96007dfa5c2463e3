use std::time::Duration;

use carenova_types::AnalysisRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    CheckHealth,
    FetchFollowupQuestions { cycle: u64, symptoms: String },
    SendAnalysis(AnalysisRequest),
    ScheduleFocus(Duration),
    ScheduleReload(Duration),
    CancelTimers,
}
