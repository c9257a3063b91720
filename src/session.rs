// File: src/session.rs
use crate::client::ApiClient;
use crate::config::Settings;
use crate::credentials::{CredentialStore, TokenLookup};
use crate::error::{Error, Result};
use crate::evaluation::EvaluationSession;
use crate::model::{AuthRequest, NewInterview};
use std::sync::Arc;

/// Ties the gateway to the credential store and the signed-in identity.
#[derive(Clone, Debug)]
pub struct Session {
    client: ApiClient,
    client_id: u64,
}

impl Session {
    pub fn new(settings: &Settings, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(settings, credentials)?,
            client_id: settings.client_id,
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn client_id(&self) -> u64 {
        self.client_id
    }

    pub fn status(&self) -> TokenLookup {
        self.client.credentials().lookup()
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.status(), TokenLookup::Present(_))
    }

    /// Authenticates and stores the returned token before handing it back.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let response = self.client.authenticate(&credentials(username, password)).await?;
        self.client.credentials().save_token(&response.token)?;
        log::info!("Logged in as {}", username);
        Ok(response.token)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<String> {
        let response = self.client.register(&credentials(username, password)).await?;
        self.client.credentials().save_token(&response.token)?;
        log::info!("Registered {}", username);
        Ok(response.token)
    }

    pub fn logout(&self) -> Result<()> {
        self.client.credentials().delete_token()
    }

    /// Generates feedback for a completed evaluation and records the interview.
    /// Returns the feedback text.
    pub async fn submit_evaluation(&self, evaluation: &EvaluationSession) -> Result<String> {
        evaluation.validate()?;
        let developer_id = evaluation.developer_id.parse::<u64>().map_err(|_| {
            Error::InvalidInput(format!("Invalid developer id: {}", evaluation.developer_id))
        })?;

        let feedback = self
            .client
            .generate_feedback(&evaluation.questions, &evaluation.answers)
            .await?;
        self.client
            .create_interview(&NewInterview {
                developer_id,
                client_id: self.client_id,
                feedback: feedback.clone(),
            })
            .await?;
        Ok(feedback)
    }
}

fn credentials(username: &str, password: &str) -> AuthRequest {
    AuthRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}
