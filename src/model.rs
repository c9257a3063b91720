// File: src/model.rs
//! View-model types handed to the screens.
//!
//! Every identifier is a `String`, even where the backend uses numbers.
pub mod adapter;
pub mod wire;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Yes,
    No,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    pub id: String,
    pub name: String,
    pub photo: String,
    pub years_of_experience: u32,
    pub location: String,
    pub tech_stack: Vec<String>,
    pub available: Availability,
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_result: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: String,
    pub client_name: String,
    pub feedback: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeveloperDetail {
    #[serde(flatten)]
    pub developer: Developer,
    pub interviews: Vec<Interview>,
}

/// An interview joined with the developer it belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterviewWithDeveloper {
    #[serde(flatten)]
    pub interview: Interview,
    pub developer_name: String,
    pub developer_photo: String,
    pub developer_id: String,
}

impl DeveloperDetail {
    pub fn into_interviews(self) -> Vec<InterviewWithDeveloper> {
        let DeveloperDetail {
            developer,
            interviews,
        } = self;
        interviews
            .into_iter()
            .map(|interview| InterviewWithDeveloper {
                interview,
                developer_name: developer.name.clone(),
                developer_photo: developer.photo.clone(),
                developer_id: developer.id.clone(),
            })
            .collect()
    }
}

/// A generated interview question. `id` is its 1-based position.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub question: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
}

/// Interview record to persist once feedback has been generated.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewInterview {
    pub developer_id: u64,
    pub client_id: u64,
    pub feedback: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_developer_serializes_as_camel_case() {
        let dev = Developer {
            id: "7".into(),
            name: "Ana".into(),
            photo: "https://i.pravatar.cc/150?u=7".into(),
            years_of_experience: 3,
            location: "Remote".into(),
            tech_stack: vec!["Go".into()],
            available: Availability::Yes,
            project: String::new(),
            evaluated: None,
            evaluation_result: None,
        };
        let json = serde_json::to_value(&dev).unwrap();
        assert_eq!(json["techStack"][0], "Go");
        assert_eq!(json["yearsOfExperience"], 3);
        assert_eq!(json["available"], "Yes");
        assert!(json.get("evaluated").is_none());
    }

    #[test]
    fn test_into_interviews_carries_developer_fields() {
        let detail = DeveloperDetail {
            developer: Developer {
                id: "3".into(),
                name: "Lee".into(),
                photo: "p".into(),
                years_of_experience: 1,
                location: "Remote".into(),
                tech_stack: vec![],
                available: Availability::Yes,
                project: String::new(),
                evaluated: None,
                evaluation_result: None,
            },
            interviews: vec![
                Interview {
                    id: "10".into(),
                    client_name: "Acme".into(),
                    feedback: "Solid".into(),
                },
                Interview {
                    id: "11".into(),
                    client_name: "Initech".into(),
                    feedback: "Weak on SQL".into(),
                },
            ],
        };
        let flat = detail.into_interviews();
        assert_eq!(flat.len(), 2);
        assert!(flat.iter().all(|i| i.developer_id == "3" && i.developer_name == "Lee"));
        assert_eq!(flat[1].interview.client_name, "Initech");
    }

    #[test]
    fn test_new_interview_wire_names() {
        let body = serde_json::to_value(NewInterview {
            developer_id: 7,
            client_id: 1,
            feedback: "ok".into(),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"developerId": 7, "clientId": 1, "feedback": "ok"})
        );
    }
}
