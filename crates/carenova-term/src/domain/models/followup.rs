#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionSource {
    Generated,
    Fallback,
}

/// An ordered question set together with where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FollowupQuestions {
    pub questions: Vec<String>,
    pub source: QuestionSource,
}

impl FollowupQuestions {
    pub fn generated(questions: Vec<String>) -> FollowupQuestions {
        FollowupQuestions {
            questions,
            source: QuestionSource::Generated,
        }
    }

    pub fn fallback(questions: Vec<String>) -> FollowupQuestions {
        FollowupQuestions {
            questions,
            source: QuestionSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == QuestionSource::Fallback
    }
}
