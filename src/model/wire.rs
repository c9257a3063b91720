// File: src/model/wire.rs
//! Shapes exchanged with the backend, before mapping.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier as sent by the backend: usually a number, sometimes a string.
/// Any JSON number is accepted and kept as written.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum WireId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Number(n) => write!(f, "{}", n),
            WireId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiDeveloper {
    pub id: WireId,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiInterview {
    pub interview_id: WireId,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiDeveloperDetail {
    #[serde(flatten)]
    pub developer: ApiDeveloper,
    #[serde(default)]
    pub interviews: Vec<ApiInterview>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiQuestion {
    pub question: String,
}

/// The `questions` field normally holds a JSON document encoded as a string.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum QuestionsPayload {
    Encoded(String),
    Inline(Vec<ApiQuestion>),
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQuestions {
    pub questions: QuestionsPayload,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFeedback {
    #[serde(default)]
    pub feedback: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct QuestionsRequest<'a> {
    pub technologies: &'a [String],
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub interview_transcript: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_accept_numbers_and_strings() {
        let dev: ApiDeveloper =
            serde_json::from_str(r#"{"id":7,"name":"Ana","skills":["Go"]}"#).unwrap();
        assert_eq!(dev.id.to_string(), "7");
        let dev: ApiDeveloper = serde_json::from_str(r#"{"id":"x-9","name":"Bo"}"#).unwrap();
        assert_eq!(dev.id.to_string(), "x-9");
        assert!(dev.skills.is_empty());
    }

    #[test]
    fn test_any_numeric_id_is_kept() {
        let devs: Vec<ApiDeveloper> = serde_json::from_str(
            r#"[{"id":-3,"name":"Neg"},{"id":18446744073709551615,"name":"Max"}]"#,
        )
        .unwrap();
        assert_eq!(devs[0].id.to_string(), "-3");
        assert_eq!(devs[1].id.to_string(), "18446744073709551615");
    }

    #[test]
    fn test_detail_flattens_common_fields() {
        let detail: ApiDeveloperDetail = serde_json::from_str(
            r#"{"id":2,"name":"Kai","skills":["Rust"],
                "interviews":[{"interviewId":5,"clientName":"Acme","feedback":"Good"}]}"#,
        )
        .unwrap();
        assert_eq!(detail.developer.name, "Kai");
        assert_eq!(detail.interviews[0].interview_id, WireId::Number(5.into()));
    }

    #[test]
    fn test_questions_payload_variants() {
        let encoded: GeneratedQuestions =
            serde_json::from_str(r#"{"questions":"[{\"question\":\"Q1\"}]"}"#).unwrap();
        assert!(matches!(encoded.questions, QuestionsPayload::Encoded(_)));
        let inline: GeneratedQuestions =
            serde_json::from_str(r#"{"questions":[{"question":"Q1"}]}"#).unwrap();
        assert!(matches!(inline.questions, QuestionsPayload::Inline(ref q) if q.len() == 1));
    }
}
