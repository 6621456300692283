//! Route handlers.

use super::AppState;
use super::types::{
    ContactResponse, ErrorResponse, HealthResponse, NavResponse, ProjectsResponse, SkillsResponse,
    VisualQuery, VisualResponse,
};
use crate::content_client::{load_experiences, load_projects};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::contact::compose_email;
use folio_core::nav::{NAV_ITEMS, NAVBAR_ALLOWANCE, SCROLL_LOOKAHEAD, derive_visual, is_scrolled};
use folio_core::skills::{SKILLS, skills_by_category};
use folio_core::{ContactError, ContactSubmission, Experiences};
use tracing::{debug, error, info, warn};

// =============================================================================
// ERRORS
// =============================================================================

/// Failures surfaced to HTTP clients as `{ "error": ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 400: the request itself is wrong.
    BadRequest(String),
    /// 429: contact quota exhausted.
    RateLimited,
    /// 500: generic failure; details stay in the server log.
    Internal(String),
}

impl From<ContactError> for ApiError {
    fn from(e: ContactError) -> Self {
        if e.is_validation() {
            ApiError::BadRequest(e.user_message())
        } else {
            ApiError::Internal(e.user_message())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                String::from("Too many messages, please try again later"),
            ),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

// =============================================================================
// CONTENT
// =============================================================================

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn projects(State(state): State<AppState>) -> Json<ProjectsResponse> {
    let projects = load_projects(state.content.as_ref()).await;
    Json(ProjectsResponse { projects })
}

pub async fn experiences(State(state): State<AppState>) -> Json<Experiences> {
    Json(load_experiences(state.content.as_ref()).await)
}

pub async fn skills() -> Json<SkillsResponse> {
    let categories = skills_by_category()
        .into_iter()
        .map(|(category, skills)| (category, skills.iter().map(|s| s.name).collect()))
        .collect();
    Json(SkillsResponse {
        skills: SKILLS.to_vec(),
        categories,
    })
}

// =============================================================================
// NAVIGATION
// =============================================================================

pub async fn nav() -> Json<NavResponse> {
    Json(NavResponse {
        items: NAV_ITEMS.to_vec(),
        lookahead: SCROLL_LOOKAHEAD,
        navbar_allowance: NAVBAR_ALLOWANCE,
    })
}

pub async fn nav_visual(Query(query): Query<VisualQuery>) -> Json<VisualResponse> {
    Json(VisualResponse {
        visual: derive_visual(query.offset),
        scrolled: is_scrolled(query.offset),
    })
}

// =============================================================================
// CONTACT
// =============================================================================

pub async fn contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let Json(submission) = payload.map_err(|rejection| {
        debug!(error = %rejection, "malformed contact body");
        ApiError::BadRequest(String::from("Invalid request body"))
    })?;

    let message = submission.validate().map_err(|e| {
        debug!(error = %e, "contact submission rejected");
        ApiError::from(e)
    })?;

    // Only submissions that would reach the relay count against the quota.
    if state.contact_limiter.check().is_err() {
        warn!("contact quota exhausted, rejecting submission");
        return Err(ApiError::RateLimited);
    }

    let email = compose_email(&message, &state.inbox);
    if let Err(e) = state.mailer.send(&email).await {
        error!(error = %e, "contact delivery failed");
        return Err(ApiError::from(ContactError::from(e)));
    }

    info!(name_chars = message.name().chars().count(), "contact message delivered");
    Ok(Json(ContactResponse { success: true }))
}
