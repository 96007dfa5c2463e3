//! Messages pushed by the backend over the chat socket.

use crate::analysis::AnalysisResult;
use crate::error::{ProtocolError, ProtocolResult};
use serde::{Deserialize, Serialize};

/// A typed message received on the chat socket, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Intermediate progress update while the backend works.
    Thinking { content: String },
    /// The final assessment.
    Analysis { data: AnalysisResult },
    /// The backend failed to process the request.
    Error { message: String },
}

impl ServerMessage {
    /// The wire discriminator of this message.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::Thinking { .. } => "thinking",
            ServerMessage::Analysis { .. } => "analysis",
            ServerMessage::Error { .. } => "error",
        }
    }

    /// Decode a text frame.
    ///
    /// Unknown discriminators are reported as [`ProtocolError::UnrecognizedType`]
    /// so callers can tell them apart from frames that are simply broken.
    pub fn from_json(data: &str) -> ProtocolResult<Self> {
        let value: serde_json::Value = serde_json::from_str(data)
            .map_err(|e| ProtocolError::malformed(format!("Invalid JSON: {}", e)))?;

        let kind = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or(ProtocolError::MissingType)?
            .to_string();

        match kind.as_str() {
            "thinking" | "analysis" | "error" => serde_json::from_value::<ServerMessage>(value)
                .map_err(|e| {
                    ProtocolError::malformed(format!("Failed to parse {} message: {}", kind, e))
                }),
            _ => Err(ProtocolError::unrecognized(kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_thinking() {
        let message =
            ServerMessage::from_json(r#"{"type":"thinking","content":"Analyzing your symptoms..."}"#)
                .unwrap();
        assert_eq!(
            message,
            ServerMessage::Thinking {
                content: "Analyzing your symptoms...".to_string()
            }
        );
    }

    #[test]
    fn test_decode_analysis() {
        let frame = r#"{
            "type": "analysis",
            "data": {
                "severity": "Mild",
                "confidence": "65%",
                "possible_conditions": ["Common cold"],
                "explanation": ["Runny nose and sneezing"],
                "home_care_tips": ["Rest", "Fluids"],
                "when_to_see_doctor": ["Fever above 39C"],
                "disclaimer": "This is not a medical diagnosis."
            }
        }"#;

        match ServerMessage::from_json(frame).unwrap() {
            ServerMessage::Analysis { data } => {
                assert_eq!(data.severity, "Mild");
                assert_eq!(data.home_care_tips, vec!["Rest", "Fluids"]);
                assert_eq!(data.explanation.len(), 1);
            }
            other => panic!("Expected analysis message, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_error() {
        let message =
            ServerMessage::from_json(r#"{"type":"error","message":"Invalid JSON received"}"#)
                .unwrap();
        assert_eq!(message.kind(), "error");
    }

    #[test]
    fn test_unknown_type_is_distinguished() {
        let err = ServerMessage::from_json(r#"{"type":"progress","percent":40}"#).unwrap_err();
        assert_eq!(err, ProtocolError::unrecognized("progress"));
    }

    #[test]
    fn test_missing_type() {
        let err = ServerMessage::from_json(r#"{"content":"hi"}"#).unwrap_err();
        assert_eq!(err, ProtocolError::MissingType);
    }

    #[test]
    fn test_known_type_with_bad_payload_is_malformed() {
        let err = ServerMessage::from_json(r#"{"type":"thinking"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed { .. }));

        let err = ServerMessage::from_json("not json").unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed { .. }));
    }
}
