//! Integration tests for the Folio HTTP API.
//!
//! Uses axum-test against the real router with in-process fakes for the
//! content backend and the mail relay.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use bytes::Bytes;
use folio::api::{AppState, ContactResponse, ErrorResponse, ProjectsResponse, create_router};
use folio::content_client::ContentSource;
use folio::mailer::Mailer;
use folio::{ContentError, folio_core};
use folio_core::{DeliveryError, ExperienceItem, Experiences, OutgoingEmail, Project};
use serde_json::{Value, json};
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};

// =============================================================================
// FAKES
// =============================================================================

struct StaticContent {
    projects: Vec<Project>,
    experiences: Experiences,
}

#[async_trait]
impl ContentSource for StaticContent {
    async fn fetch_projects(&self) -> Result<Vec<Project>, ContentError> {
        Ok(self.projects.clone())
    }

    async fn fetch_experiences(&self) -> Result<Experiences, ContentError> {
        Ok(self.experiences.clone())
    }
}

struct FailingContent;

#[async_trait]
impl ContentSource for FailingContent {
    async fn fetch_projects(&self) -> Result<Vec<Project>, ContentError> {
        Err(ContentError::Server(String::from("503 Service Unavailable")))
    }

    async fn fetch_experiences(&self) -> Result<Experiences, ContentError> {
        Err(ContentError::Server(String::from("503 Service Unavailable")))
    }
}

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    failure: Option<String>,
}

impl RecordingMailer {
    fn failing(reason: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(reason.to_string()),
        }
    }

    fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(email.clone());
        match &self.failure {
            Some(reason) => Err(DeliveryError::new(reason.clone())),
            None => Ok(()),
        }
    }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn project(id: &str, order: Option<f64>) -> Project {
    serde_json::from_value(json!({
        "id": id,
        "title": format!("Project {}", id),
        "description": "A project",
        "techStack": ["Rust"],
        "order": order,
    }))
    .unwrap()
}

fn sample_content() -> StaticContent {
    StaticContent {
        projects: vec![project("b", Some(2.0)), project("a", Some(1.0)), project("z", None)],
        experiences: Experiences {
            academic: vec![ExperienceItem {
                period: String::from("2021 – 2022"),
                title: String::from("Web Development Certification"),
                affiliation: String::from("Online Learning Platform"),
                description: String::from("Intensive course"),
                highlights: vec![String::from("Built 5 apps")],
            }],
            organization: Vec::new(),
        },
    }
}

fn server_with(content: Arc<dyn ContentSource>, mailer: Arc<dyn Mailer>, per_minute: u32) -> TestServer {
    let state = AppState::new(
        content,
        mailer,
        "owner@example.com",
        NonZeroU32::new(per_minute).unwrap(),
    );
    TestServer::new(create_router(state, None)).unwrap()
}

fn server(mailer: Arc<RecordingMailer>) -> TestServer {
    server_with(Arc::new(sample_content()), mailer, 100)
}

// =============================================================================
// HEALTH / CONTENT
// =============================================================================

#[tokio::test]
async fn test_health() {
    let server = server(Arc::new(RecordingMailer::default()));
    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_projects_sorted() {
    let server = server(Arc::new(RecordingMailer::default()));
    let response = server.get("/api/projects").await;

    response.assert_status_ok();
    let body: ProjectsResponse = response.json();
    let ids: Vec<_> = body.projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "z"]);
}

#[tokio::test]
async fn test_projects_fail_soft() {
    let server = server_with(Arc::new(FailingContent), Arc::new(RecordingMailer::default()), 100);
    let response = server.get("/api/projects").await;

    response.assert_status_ok();
    let body: ProjectsResponse = response.json();
    assert!(body.projects.is_empty());
}

#[tokio::test]
async fn test_experiences() {
    let server = server(Arc::new(RecordingMailer::default()));
    let body: Experiences = server.get("/api/experiences").await.json();

    assert_eq!(body.academic.len(), 1);
    assert_eq!(body.academic[0].affiliation, "Online Learning Platform");
    assert!(body.organization.is_empty());
}

#[tokio::test]
async fn test_experiences_fail_soft() {
    let server = server_with(Arc::new(FailingContent), Arc::new(RecordingMailer::default()), 100);
    let response = server.get("/api/experiences").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({"academic": [], "organization": []}));
}

#[tokio::test]
async fn test_skills() {
    let server = server(Arc::new(RecordingMailer::default()));
    let body: Value = server.get("/api/skills").await.json();

    assert_eq!(body["skills"].as_array().map(Vec::len), Some(10));
    assert_eq!(body["categories"]["Design"], json!(["Canva", "Figma"]));
}

// =============================================================================
// NAVIGATION
// =============================================================================

#[tokio::test]
async fn test_nav_items() {
    let server = server(Arc::new(RecordingMailer::default()));
    let body: Value = server.get("/api/nav").await.json();

    let ids: Vec<_> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["about", "skills", "projects", "contact"]);
    assert_eq!(body["lookahead"], 100);
    assert_eq!(body["navbar_allowance"], 80);
}

#[tokio::test]
async fn test_nav_visual() {
    let server = server(Arc::new(RecordingMailer::default()));
    let body: Value = server
        .get("/api/nav/visual")
        .add_query_param("offset", 50)
        .await
        .json();

    assert!((body["background_opacity"].as_f64().unwrap() - 0.95).abs() < 1e-9);
    assert!((body["blur_radius"].as_f64().unwrap() - 12.0).abs() < 1e-9);
    assert_eq!(body["scrolled"], true);
}

#[tokio::test]
async fn test_nav_visual_requires_offset() {
    let server = server(Arc::new(RecordingMailer::default()));
    server
        .get("/api/nav/visual")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// =============================================================================
// CONTACT
// =============================================================================

#[tokio::test]
async fn test_contact_success() {
    let mailer = Arc::new(RecordingMailer::default());
    let server = server(mailer.clone());

    let response = server
        .post("/api/contact")
        .json(&json!({"name": "Ana", "message": "Hello!"}))
        .await;

    response.assert_status_ok();
    let body: ContactResponse = response.json();
    assert!(body.success);

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "owner@example.com");
    assert_eq!(sent[0].subject, "New message from Ana");
    assert_eq!(sent[0].text, "Hello!");
}

#[tokio::test]
async fn test_contact_empty_name_never_reaches_relay() {
    let mailer = Arc::new(RecordingMailer::default());
    let server = server(mailer.clone());

    let response = server
        .post("/api/contact")
        .json(&json!({"name": "", "message": "Hello!"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert!(!body.error.is_empty());
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_contact_missing_message() {
    let mailer = Arc::new(RecordingMailer::default());
    let server = server(mailer.clone());

    server
        .post("/api/contact")
        .json(&json!({"name": "Ana"}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_contact_malformed_body() {
    let mailer = Arc::new(RecordingMailer::default());
    let server = server(mailer.clone());

    server
        .post("/api/contact")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{not json"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_contact_relay_failure_is_generic() {
    let mailer = Arc::new(RecordingMailer::failing("SMTP 535 bad credentials for owner"));
    let server = server(mailer.clone());

    let response = server
        .post("/api/contact")
        .json(&json!({"name": "Ana", "message": "Hello!"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let text = response.text();
    assert!(!text.contains("535"));
    assert!(!text.contains("credentials"));

    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "Failed to send message");
    // exactly one attempt
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_contact_rate_limited() {
    let mailer = Arc::new(RecordingMailer::default());
    let server = server_with(Arc::new(sample_content()), mailer.clone(), 2);
    let body = json!({"name": "Ana", "message": "Hello!"});

    // invalid submissions do not spend the quota
    for _ in 0..3 {
        server
            .post("/api/contact")
            .json(&json!({"name": ""}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    server.post("/api/contact").json(&body).await.assert_status_ok();
    server.post("/api/contact").json(&body).await.assert_status_ok();
    server
        .post("/api/contact")
        .json(&body)
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    assert_eq!(mailer.sent().len(), 2);

    // still a bad request once the quota is spent
    server
        .post("/api/contact")
        .json(&json!({"message": "Hello!"}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(mailer.sent().len(), 2);
}

// =============================================================================
// STATIC FRONT-END
// =============================================================================

#[tokio::test]
async fn test_static_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Portfolio</h1>").unwrap();

    let state = AppState::new(
        Arc::new(sample_content()),
        Arc::new(RecordingMailer::default()),
        "owner@example.com",
        NonZeroU32::new(5).unwrap(),
    );
    let server = TestServer::new(create_router(state, Some(dir.path()))).unwrap();

    let page = server.get("/index.html").await;
    page.assert_status_ok();
    assert!(page.text().contains("Portfolio"));

    // API routes still win over the fallback
    server.get("/health").await.assert_status_ok();
    server
        .get("/missing.css")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
