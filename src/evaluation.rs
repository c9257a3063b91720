use crate::error::{Error, Result};
use crate::model::Question;
use std::collections::HashMap;

pub const TRANSCRIPT_SEPARATOR: &str = " \n ";
pub const INCOMPLETE_MESSAGE: &str = "Please answer all questions.";

/// Builds the text submitted for feedback generation.
///
/// One `Question: .. Answer: ..` entry per question, in order. Missing
/// answers are kept as empty strings so the entry count matches.
pub fn build_transcript(questions: &[Question], answers: &HashMap<String, String>) -> String {
    questions
        .iter()
        .map(|q| {
            let answer = answers.get(&q.id).map(|a| a.trim()).unwrap_or("");
            format!("Question: {} Answer: {}", q.question, answer)
        })
        .collect::<Vec<_>>()
        .join(TRANSCRIPT_SEPARATOR)
}

/// Answers being collected for one developer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationSession {
    pub developer_id: String,
    pub questions: Vec<Question>,
    pub answers: HashMap<String, String>,
}

impl EvaluationSession {
    pub fn new(developer_id: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            developer_id: developer_id.into(),
            questions,
            answers: HashMap::new(),
        }
    }

    pub fn set_answer(&mut self, question_id: &str, text: impl Into<String>) {
        self.answers.insert(question_id.to_string(), text.into());
    }

    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    fn is_answered(&self, q: &Question) -> bool {
        self.answers
            .get(&q.id)
            .is_some_and(|a| !a.trim().is_empty())
    }

    /// Index of the first question still lacking a non-blank answer.
    pub fn first_unanswered(&self) -> Option<usize> {
        self.questions.iter().position(|q| !self.is_answered(q))
    }

    pub fn unanswered_ids(&self) -> Vec<String> {
        self.questions
            .iter()
            .filter(|q| !self.is_answered(q))
            .map(|q| q.id.clone())
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.first_unanswered().is_some() {
            return Err(Error::InvalidInput(INCOMPLETE_MESSAGE.to_string()));
        }
        Ok(())
    }

    pub fn transcript(&self) -> String {
        build_transcript(&self.questions, &self.answers)
    }
}
