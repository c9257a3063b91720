// File: src/client/core.rs

use crate::client::endpoint::{self, BodyPolicy, Endpoint, JSON_CONTENT_TYPE};
use crate::config::Settings;
use crate::credentials::{CredentialStore, TokenLookup};
use crate::error::{Error, Result};
use crate::evaluation::build_transcript;
use crate::model::adapter::{Enricher, to_questions};
use crate::model::wire::{
    ApiDeveloper, ApiDeveloperDetail, FeedbackRequest, GeneratedFeedback, GeneratedQuestions,
    QuestionsRequest,
};
use crate::model::{
    AuthRequest, AuthResponse, Developer, DeveloperDetail, InterviewWithDeveloper, NewInterview,
    Question,
};

use futures::future::try_join_all;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use http::{Request, StatusCode, Uri};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;

/// Gateway to the backend. Holds no per-call state, so clones can run
/// requests concurrently.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpsClient,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
    enricher: Enricher,
    timeout: Option<Duration>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn failure_message(body: &Value, default: &str) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::InvalidInput(e.to_string()))
}

fn decode<T: DeserializeOwned>(endpoint: &Endpoint, body: Value) -> Result<T> {
    serde_json::from_value(body)
        .map_err(|e| Error::MalformedResponse(format!("{}: {}", endpoint.name, e)))
}

impl ApiClient {
    pub fn new(settings: &Settings, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        base_url
            .parse::<Uri>()
            .map_err(|e| Error::InvalidInput(format!("Invalid base URL {}: {}", base_url, e)))?;

        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        for e in &result.errors {
            log::warn!("Skipping system certificate: {}", e);
        }
        let (added, _) = root_store.add_parsable_certificates(result.certs);
        if added == 0 {
            // Plain http origins (the defaults) still work.
            log::warn!("No valid system certificates found; HTTPS requests will fail.");
        }
        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();
        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        let http = Client::builder(TokioExecutor::new()).build(https_connector);
        Ok(Self {
            http,
            base_url,
            credentials,
            enricher: Enricher::new(settings.experience),
            timeout: settings.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    // --- AUTH ---

    /// Exchanges credentials for a token. Persisting it is up to the caller.
    pub async fn authenticate(&self, request: &AuthRequest) -> Result<AuthResponse> {
        let ep = &endpoint::AUTHENTICATE;
        let body = self
            .execute(ep, ep.path, Some(to_json(request)?), ep.default_error)
            .await?;
        decode(ep, body)
    }

    pub async fn register(&self, request: &AuthRequest) -> Result<AuthResponse> {
        let ep = &endpoint::REGISTER;
        let body = self
            .execute(ep, ep.path, Some(to_json(request)?), ep.default_error)
            .await?;
        decode(ep, body)
    }

    // --- DEVELOPERS ---

    /// `skills` is free text ("Java, React"); blank means every developer.
    pub async fn find_developers(&self, skills: &str) -> Result<Vec<Developer>> {
        let ep = &endpoint::FIND_DEVELOPERS;
        let path = endpoint::developers_path(&endpoint::normalize_skills(skills));
        let body = self.execute(ep, &path, None, ep.default_error).await?;
        let developers: Vec<ApiDeveloper> = decode(ep, body)?;
        Ok(developers
            .into_iter()
            .map(|d| self.enricher.to_developer(d))
            .collect())
    }

    pub async fn get_developer(&self, id: &str) -> Result<DeveloperDetail> {
        let ep = &endpoint::GET_DEVELOPER;
        let default_error = format!("Failed to get developer with id {}.", id);
        let body = self
            .execute(ep, &endpoint::developer_path(id), None, &default_error)
            .await?;
        let detail: ApiDeveloperDetail = decode(ep, body)?;
        Ok(self.enricher.to_developer_detail(detail))
    }

    /// Every interview of every developer. Details are fetched concurrently and
    /// the first failure fails the whole call.
    pub async fn fetch_all_interviews(&self) -> Result<Vec<InterviewWithDeveloper>> {
        let developers = self.find_developers("").await?;
        let details = try_join_all(developers.iter().map(|d| self.get_developer(&d.id))).await?;
        Ok(details
            .into_iter()
            .flat_map(DeveloperDetail::into_interviews)
            .collect())
    }

    // --- INTERVIEWS ---

    pub async fn generate_questions(&self, technologies: &[String]) -> Result<Vec<Question>> {
        let ep = &endpoint::GENERATE_QUESTIONS;
        let request = to_json(&QuestionsRequest { technologies })?;
        let body = self
            .execute(ep, ep.path, Some(request), ep.default_error)
            .await?;
        let generated: GeneratedQuestions = decode(ep, body)?;
        to_questions(generated.questions)
    }

    pub async fn generate_feedback(
        &self,
        questions: &[Question],
        answers: &HashMap<String, String>,
    ) -> Result<String> {
        let ep = &endpoint::GENERATE_FEEDBACK;
        let request = to_json(&FeedbackRequest {
            interview_transcript: build_transcript(questions, answers),
        })?;
        let body = self
            .execute(ep, ep.path, Some(request), ep.default_error)
            .await?;
        let generated: GeneratedFeedback = decode(ep, body)?;
        Ok(generated.feedback)
    }

    pub async fn create_interview(&self, interview: &NewInterview) -> Result<()> {
        let ep = &endpoint::CREATE_INTERVIEW;
        self.execute(ep, ep.path, Some(to_json(interview)?), ep.default_error)
            .await?;
        Ok(())
    }

    // --- TRANSPORT ---

    fn bearer_token(&self) -> Result<String> {
        match self.credentials.lookup() {
            TokenLookup::Present(token) => Ok(token),
            TokenLookup::Absent => Err(Error::MissingCredentials),
            TokenLookup::ReadError(e) => {
                log::warn!("Error retrieving token: {}", e);
                Err(Error::MissingCredentials)
            }
        }
    }

    /// Runs one call: token check, request, JSON parse, status check.
    async fn execute(
        &self,
        ep: &Endpoint,
        path_and_query: &str,
        body: Option<String>,
        default_error: &str,
    ) -> Result<Value> {
        // 1. No token, no request.
        let token = if ep.authenticated {
            Some(self.bearer_token()?)
        } else {
            None
        };

        // 2. Build
        let url = format!("{}{}", self.base_url, path_and_query);
        let uri = url
            .parse::<Uri>()
            .map_err(|e| Error::InvalidInput(format!("Invalid URL {}: {}", url, e)))?;
        let mut builder = Request::builder()
            .method(ep.method.clone())
            .uri(uri)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(token) = &token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                Error::InvalidInput("Stored authentication token is not a valid header.".into())
            })?;
            builder = builder.header(AUTHORIZATION, value);
        }
        let body = body.unwrap_or_default();

        log::debug!("--- API Request: {} ---", ep.name);
        log::debug!("{} {}", ep.method, url);
        if token.is_some() {
            log::debug!("Authorization: Bearer <redacted>");
        }
        if !body.is_empty() {
            if ep.sensitive_body {
                log::debug!("Body: <redacted>");
            } else {
                log::debug!("Body: {}", body);
            }
        }

        let request = builder
            .body(body)
            .map_err(|e| Error::InvalidInput(e.to_string()))?;

        // 3. Send
        let (status, bytes) = self.round_trip(request).await?;
        log::debug!("--- API Response: {} ---", ep.name);
        log::debug!("Status: {}", status);
        log::debug!("Body: {}", String::from_utf8_lossy(&bytes));

        // 4. Parse
        let parsed = match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => value,
            Err(e) => match ep.body_policy {
                BodyPolicy::Required => {
                    return Err(Error::MalformedResponse(format!("{}: {}", ep.name, e)));
                }
                BodyPolicy::Lenient => Value::Object(Default::default()),
            },
        };

        // 5. Status
        if !status.is_success() {
            let message = failure_message(&parsed, default_error);
            log::warn!("{} failed with {}: {}", ep.name, status, message);
            return Err(Error::RequestFailed(message));
        }
        Ok(parsed)
    }

    async fn round_trip(&self, request: Request<String>) -> Result<(StatusCode, Vec<u8>)> {
        let exchange = async {
            let response = self
                .http
                .request(request)
                .await
                .map_err(|e| Error::Transport(format!("{:?}", e)))?;
            let status = response.status();
            let bytes = response
                .into_body()
                .collect()
                .await
                .map_err(|e| Error::Transport(e.to_string()))?
                .to_bytes();
            Ok::<_, Error>((status, bytes.to_vec()))
        };
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .map_err(|_| Error::Timeout(limit))?,
            None => exchange.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_message_prefers_body() {
        assert_eq!(
            failure_message(&json!({"message": "User exists"}), "Registration failed."),
            "User exists"
        );
        assert_eq!(
            failure_message(&json!({"message": ""}), "Registration failed."),
            "Registration failed."
        );
        assert_eq!(
            failure_message(&json!({"error": "x"}), "Registration failed."),
            "Registration failed."
        );
        assert_eq!(
            failure_message(&json!({"message": "  Padded message  "}), "Registration failed."),
            "  Padded message  "
        );
        assert_eq!(failure_message(&json!([1, 2]), "d"), "d");
    }
}
