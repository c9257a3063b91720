use devscout::config::Settings;
use devscout::credentials::{CredentialStore, KeyValueStore, SecureFileStore, TokenLookup};
use devscout::error::Error;
use devscout::evaluation::EvaluationSession;
use devscout::model::Question;
use devscout::model::adapter::ExperiencePolicy;
use devscout::platform::Platform;
use devscout::session::Session;
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn session_for(url: String, store: Arc<dyn CredentialStore>, client_id: u64) -> Session {
    let mut settings = Settings::for_platform(Platform::Desktop)
        .with_base_url(url)
        .with_experience(ExperiencePolicy::FromId);
    settings.client_id = client_id;
    Session::new(&settings, store).unwrap()
}

#[tokio::test]
async fn test_login_then_list_developers_end_to_end() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/api/v1/auth/authenticate")
        .with_status(200)
        .with_body(r#"{"token":"tok-123"}"#)
        .create_async()
        .await;
    let list = server
        .mock("GET", "/api/v1/developers")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer tok-123")
        .with_status(200)
        .with_body(r#"[{"id":7,"name":"Ana","skills":["Go","SQL"]}]"#)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let store: Arc<dyn CredentialStore> = Arc::new(SecureFileStore::new(dir.path()));
    let session = session_for(server.url(), store.clone(), 1);
    assert_eq!(session.status(), TokenLookup::Absent);

    let token = session.login("ana", "pw").await.unwrap();
    assert_eq!(token, "tok-123");
    assert_eq!(store.get_token().as_deref(), Some("tok-123"));
    assert!(session.is_logged_in());

    let developers = session.client().find_developers("Go,SQL").await.unwrap();
    assert_eq!(developers[0].id, "7");
    assert_eq!(developers[0].years_of_experience, 8);

    login.assert_async().await;
    list.assert_async().await;
}

#[tokio::test]
async fn test_failed_login_leaves_store_untouched() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/v1/auth/authenticate")
        .with_status(401)
        .with_body(r#"{"message":"Bad credentials"}"#)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let store: Arc<dyn CredentialStore> = Arc::new(KeyValueStore::new(dir.path().join("storage.json")));
    let session = session_for(server.url(), store.clone(), 1);

    assert_eq!(
        session.login("ana", "nope").await,
        Err(Error::RequestFailed("Bad credentials".into()))
    );
    assert_eq!(store.lookup(), TokenLookup::Absent);
}

#[tokio::test]
async fn test_register_persists_and_logout_clears() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/v1/auth/register")
        .match_body(Matcher::Json(json!({"username": "kai", "password": "s3cret"})))
        .with_status(200)
        .with_body(r#"{"token":"new-account"}"#)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let store: Arc<dyn CredentialStore> = Arc::new(KeyValueStore::new(dir.path().join("storage.json")));
    let session = session_for(server.url(), store.clone(), 1);

    session.register("kai", "s3cret").await.unwrap();
    assert_eq!(store.get_token().as_deref(), Some("new-account"));

    session.logout().unwrap();
    session.logout().unwrap();
    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn test_submit_evaluation_records_interview_with_session_identity() {
    let mut server = Server::new_async().await;
    let feedback = server
        .mock("POST", "/api/v1/interviews/generate-feedback")
        .match_body(Matcher::Json(json!({
            "interviewTranscript": "Question: Borrowing? Answer: Shared or unique \n Question: Traits? Answer: Interfaces"
        })))
        .with_status(200)
        .with_body(r#"{"feedback":"Knows the basics."}"#)
        .create_async()
        .await;
    let record = server
        .mock("POST", "/api/v1/interviews")
        .match_body(Matcher::Json(json!({
            "developerId": 7,
            "clientId": 42,
            "feedback": "Knows the basics."
        })))
        .with_status(201)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let store: Arc<dyn CredentialStore> = Arc::new(SecureFileStore::new(dir.path()));
    store.save_token("tok").unwrap();
    let session = session_for(server.url(), store, 42);

    let mut evaluation = EvaluationSession::new(
        "7",
        vec![
            Question {
                id: "1".into(),
                question: "Borrowing?".into(),
            },
            Question {
                id: "2".into(),
                question: "Traits?".into(),
            },
        ],
    );
    evaluation.set_answer("1", " Shared or unique ");
    evaluation.set_answer("2", "Interfaces");

    let text = session.submit_evaluation(&evaluation).await.unwrap();
    assert_eq!(text, "Knows the basics.");
    feedback.assert_async().await;
    record.assert_async().await;
}

#[tokio::test]
async fn test_incomplete_evaluation_is_rejected_before_any_request() {
    let mut server = Server::new_async().await;
    let posts = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let store: Arc<dyn CredentialStore> = Arc::new(SecureFileStore::new(dir.path()));
    store.save_token("tok").unwrap();
    let session = session_for(server.url(), store, 1);

    let evaluation = EvaluationSession::new(
        "7",
        vec![Question {
            id: "1".into(),
            question: "Q1".into(),
        }],
    );
    assert_eq!(
        session.submit_evaluation(&evaluation).await,
        Err(Error::InvalidInput("Please answer all questions.".into()))
    );
    posts.assert_async().await;
}
