// File: src/model/adapter.rs
//! Mapping from the backend schema to the view model.
//!
//! The backend only knows `id`, `name` and `skills`. The remaining display
//! fields are filled in here by an [`Enricher`], so the policy is explicit
//! and can be pinned in tests.
use crate::error::{Error, Result};
use crate::model::wire::{
    ApiDeveloper, ApiDeveloperDetail, ApiInterview, ApiQuestion, QuestionsPayload, WireId,
};
use crate::model::{Availability, Developer, DeveloperDetail, Interview, Question};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const AVATAR_BASE_URL: &str = "https://i.pravatar.cc/150?u=";
pub const DEFAULT_LOCATION: &str = "Remote";
pub const MAX_YEARS: u32 = 10;

/// How `years_of_experience` is filled in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExperiencePolicy {
    /// Uniform in `1..=10`, drawn on every mapping.
    #[default]
    Random,
    Fixed(u32),
    /// `id mod 10 + 1` for numeric ids, stable across fetches.
    FromId,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Enricher {
    pub policy: ExperiencePolicy,
}

impl Enricher {
    pub fn new(policy: ExperiencePolicy) -> Self {
        Self { policy }
    }

    pub fn photo_url(id: &str) -> String {
        format!("{}{}", AVATAR_BASE_URL, id)
    }

    fn years_for(&self, id: &WireId) -> u32 {
        // Non-integer ids: fold the bytes into a stable number.
        fn fold_bytes(s: &str) -> u64 {
            s.bytes().fold(0u64, |acc, b| acc.wrapping_add(b as u64))
        }

        match self.policy {
            ExperiencePolicy::Random => rand::thread_rng().gen_range(1..=MAX_YEARS),
            ExperiencePolicy::Fixed(years) => years,
            ExperiencePolicy::FromId => {
                let seed = match id {
                    WireId::Number(n) => n
                        .as_u64()
                        .or_else(|| n.as_i64().map(i64::unsigned_abs))
                        .unwrap_or_else(|| fold_bytes(&n.to_string())),
                    WireId::Text(s) => fold_bytes(s),
                };
                (seed % MAX_YEARS as u64) as u32 + 1
            }
        }
    }

    pub fn to_developer(&self, api: ApiDeveloper) -> Developer {
        let id = api.id.to_string();
        Developer {
            photo: Self::photo_url(&id),
            years_of_experience: self.years_for(&api.id),
            location: DEFAULT_LOCATION.to_string(),
            available: Availability::Yes,
            project: String::new(),
            id,
            name: api.name,
            tech_stack: api.skills,
            evaluated: None,
            evaluation_result: None,
        }
    }

    pub fn to_developer_detail(&self, api: ApiDeveloperDetail) -> DeveloperDetail {
        DeveloperDetail {
            developer: self.to_developer(api.developer),
            interviews: api.interviews.into_iter().map(to_interview).collect(),
        }
    }
}

pub fn to_interview(api: ApiInterview) -> Interview {
    Interview {
        id: api.interview_id.to_string(),
        client_name: api.client_name,
        feedback: api.feedback,
    }
}

/// Decodes the nested question list and numbers the entries from 1.
pub fn to_questions(payload: QuestionsPayload) -> Result<Vec<Question>> {
    let raw: Vec<ApiQuestion> = match payload {
        QuestionsPayload::Encoded(text) => serde_json::from_str(&text).map_err(|e| {
            Error::MalformedResponse(format!("questions field is not a question list: {}", e))
        })?,
        QuestionsPayload::Inline(list) => list,
    };
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(i, q)| Question {
            id: (i + 1).to_string(),
            question: q.question,
        })
        .collect())
}
