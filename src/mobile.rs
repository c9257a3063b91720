// File: ./src/mobile.rs
use crate::config::Config;
use crate::credentials::{TokenLookup, open_store};
use crate::error::Error;
use crate::evaluation::EvaluationSession;
use crate::model::{
    Availability, Developer, DeveloperDetail, Interview, InterviewWithDeveloper, Question,
};
use crate::paths::AppPaths;
use crate::session::Session;
use std::collections::HashMap;

#[cfg(target_os = "android")]
use android_logger::Config as LogConfig;
#[cfg(target_os = "android")]
use log::LevelFilter;

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum MobileError {
    #[error("{0}")]
    NotLoggedIn(String),
    #[error("{0}")]
    Request(String),
    #[error("{0}")]
    Storage(String),
    #[error("{0}")]
    Generic(String),
}

impl From<Error> for MobileError {
    fn from(e: Error) -> Self {
        let message = e.to_string();
        match e {
            Error::MissingCredentials => Self::NotLoggedIn(message),
            Error::RequestFailed(_)
            | Error::MalformedResponse(_)
            | Error::Transport(_)
            | Error::Timeout(_) => Self::Request(message),
            Error::StorageWriteFailure(_) => Self::Storage(message),
            Error::InvalidInput(_) => Self::Generic(message),
        }
    }
}
impl From<anyhow::Error> for MobileError {
    fn from(e: anyhow::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

// --- DTOs ---

#[derive(uniffi::Record)]
pub struct MobileDeveloper {
    pub id: String,
    pub name: String,
    pub photo: String,
    pub years_of_experience: u32,
    pub location: String,
    pub tech_stack: Vec<String>,
    pub available: bool,
    pub project: String,
}

#[derive(uniffi::Record)]
pub struct MobileInterview {
    pub id: String,
    pub client_name: String,
    pub feedback: String,
}

#[derive(uniffi::Record)]
pub struct MobileDeveloperDetail {
    pub developer: MobileDeveloper,
    pub interviews: Vec<MobileInterview>,
}

#[derive(uniffi::Record)]
pub struct MobileInterviewEntry {
    pub interview: MobileInterview,
    pub developer_id: String,
    pub developer_name: String,
    pub developer_photo: String,
}

#[derive(uniffi::Record, Clone)]
pub struct MobileQuestion {
    pub id: String,
    pub question: String,
}

fn developer_to_mobile(d: Developer) -> MobileDeveloper {
    MobileDeveloper {
        id: d.id,
        name: d.name,
        photo: d.photo,
        years_of_experience: d.years_of_experience,
        location: d.location,
        tech_stack: d.tech_stack,
        available: d.available == Availability::Yes,
        project: d.project,
    }
}

fn interview_to_mobile(i: Interview) -> MobileInterview {
    MobileInterview {
        id: i.id,
        client_name: i.client_name,
        feedback: i.feedback,
    }
}

fn detail_to_mobile(d: DeveloperDetail) -> MobileDeveloperDetail {
    MobileDeveloperDetail {
        developer: developer_to_mobile(d.developer),
        interviews: d.interviews.into_iter().map(interview_to_mobile).collect(),
    }
}

fn entry_to_mobile(e: InterviewWithDeveloper) -> MobileInterviewEntry {
    MobileInterviewEntry {
        interview: interview_to_mobile(e.interview),
        developer_id: e.developer_id,
        developer_name: e.developer_name,
        developer_photo: e.developer_photo,
    }
}

// --- MAIN OBJECT ---

#[derive(uniffi::Object)]
pub struct DevScoutMobile {
    session: Session,
}

#[uniffi::export(async_runtime = "tokio")]
impl DevScoutMobile {
    #[uniffi::constructor]
    pub fn new(android_files_dir: String) -> Result<Self, MobileError> {
        #[cfg(target_os = "android")]
        android_logger::init_once(
            LogConfig::default()
                .with_max_level(LevelFilter::Debug)
                .with_tag("DevScoutRust"),
        );
        AppPaths::init_android_path(android_files_dir);
        let settings = Config::load_or_default().resolve();
        let store = open_store(settings.platform.token_backend())?;
        Ok(Self {
            session: Session::new(&settings, store)?,
        })
    }

    pub fn base_url(&self) -> String {
        self.session.client().base_url().to_string()
    }

    /// True when a token is stored. A broken store reads as logged out.
    pub fn is_logged_in(&self) -> bool {
        match self.session.status() {
            TokenLookup::Present(_) => true,
            TokenLookup::Absent => false,
            TokenLookup::ReadError(e) => {
                log::warn!("Token store unreadable, treating as logged out: {}", e);
                false
            }
        }
    }

    pub async fn login(&self, username: String, password: String) -> Result<(), MobileError> {
        self.session.login(&username, &password).await?;
        Ok(())
    }

    pub async fn register(&self, username: String, password: String) -> Result<(), MobileError> {
        self.session.register(&username, &password).await?;
        Ok(())
    }

    pub fn logout(&self) -> Result<(), MobileError> {
        self.session.logout().map_err(MobileError::from)
    }

    pub async fn find_developers(&self, skills: String) -> Result<Vec<MobileDeveloper>, MobileError> {
        let developers = self.session.client().find_developers(&skills).await?;
        Ok(developers.into_iter().map(developer_to_mobile).collect())
    }

    pub async fn get_developer(&self, id: String) -> Result<MobileDeveloperDetail, MobileError> {
        let detail = self.session.client().get_developer(&id).await?;
        Ok(detail_to_mobile(detail))
    }

    pub async fn get_all_interviews(&self) -> Result<Vec<MobileInterviewEntry>, MobileError> {
        let entries = self.session.client().fetch_all_interviews().await?;
        Ok(entries.into_iter().map(entry_to_mobile).collect())
    }

    pub async fn generate_questions(
        &self,
        technologies: Vec<String>,
    ) -> Result<Vec<MobileQuestion>, MobileError> {
        let questions = self.session.client().generate_questions(&technologies).await?;
        Ok(questions
            .into_iter()
            .map(|q| MobileQuestion {
                id: q.id,
                question: q.question,
            })
            .collect())
    }

    /// Returns the generated feedback once the interview has been recorded.
    pub async fn submit_evaluation(
        &self,
        developer_id: String,
        questions: Vec<MobileQuestion>,
        answers: HashMap<String, String>,
    ) -> Result<String, MobileError> {
        let questions = questions
            .into_iter()
            .map(|q| Question {
                id: q.id,
                question: q.question,
            })
            .collect();
        let mut evaluation = EvaluationSession::new(developer_id, questions);
        evaluation.answers = answers;
        self.session
            .submit_evaluation(&evaluation)
            .await
            .map_err(MobileError::from)
    }
}
