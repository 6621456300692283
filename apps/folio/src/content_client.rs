//! # Content Client
//!
//! Read-only access to the hosted content backend.
//!
//! The backend answers GROQ queries over HTTP:
//!
//! ```text
//! GET {base}/v{api_version}/data/query/{dataset}?query=<groq>
//! → 200 { "result": <value>, "ms": 3, "query": "..." }
//! ```
//!
//! Pages never fail because content is unavailable: [`load_projects`] and
//! [`load_experiences`] log the failure and fall back to empty results.

use crate::config::ContentConfig;
use crate::error::ContentError;
use async_trait::async_trait;
use folio_core::content::{EXPERIENCES_QUERY, PROJECTS_QUERY, sort_projects};
use folio_core::{Experiences, Project};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Per-request timeout for content queries.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of portfolio content.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_projects(&self) -> Result<Vec<Project>, ContentError>;

    async fn fetch_experiences(&self) -> Result<Experiences, ContentError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

#[derive(Debug, Deserialize)]
struct QueryEnvelope<T> {
    result: Option<T>,
}

/// HTTP client for the hosted query API.
#[derive(Debug, Clone)]
pub struct SanityClient {
    config: ContentConfig,
    client: reqwest::Client,
}

impl SanityClient {
    pub fn new(config: ContentConfig) -> Result<Self, ContentError> {
        let client = reqwest::Client::builder().timeout(QUERY_TIMEOUT).build()?;
        Ok(Self { config, client })
    }

    /// Query endpoint for the configured dataset.
    #[must_use]
    pub fn query_url(&self) -> String {
        format!(
            "{}/v{}/data/query/{}",
            self.config.base_url, self.config.api_version, self.config.dataset
        )
    }

    /// Run a GROQ query. A `null` result maps to `T::default()`.
    pub async fn query<T>(&self, groq: &str) -> Result<T, ContentError>
    where
        T: DeserializeOwned + Default,
    {
        let mut request = self
            .client
            .get(self.query_url())
            .query(&[("query", groq), ("perspective", "published")]);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::Server(format!("{}: {}", status, body.trim())));
        }

        let bytes = response.bytes().await?;
        let envelope: QueryEnvelope<T> = serde_json::from_slice(&bytes)?;
        Ok(envelope.result.unwrap_or_default())
    }
}

#[async_trait]
impl ContentSource for SanityClient {
    async fn fetch_projects(&self) -> Result<Vec<Project>, ContentError> {
        self.query(PROJECTS_QUERY).await
    }

    async fn fetch_experiences(&self) -> Result<Experiences, ContentError> {
        self.query(EXPERIENCES_QUERY).await
    }
}

/// Stand-in used when no backend is configured. Every fetch fails, so the
/// fail-soft loaders serve empty sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredContent;

#[async_trait]
impl ContentSource for UnconfiguredContent {
    async fn fetch_projects(&self) -> Result<Vec<Project>, ContentError> {
        Err(ContentError::Unconfigured)
    }

    async fn fetch_experiences(&self) -> Result<Experiences, ContentError> {
        Err(ContentError::Unconfigured)
    }
}

// =============================================================================
// FAIL-SOFT LOADERS
// =============================================================================

/// Projects in display order, or an empty list if the backend failed.
pub async fn load_projects(source: &dyn ContentSource) -> Vec<Project> {
    match source.fetch_projects().await {
        Ok(mut projects) => {
            sort_projects(&mut projects);
            debug!(count = projects.len(), "fetched projects");
            projects
        }
        Err(e) => {
            warn!(error = %e, "project fetch failed, serving empty list");
            Vec::new()
        }
    }
}

/// Experience groups, or empty groups if the backend failed.
pub async fn load_experiences(source: &dyn ContentSource) -> Experiences {
    match source.fetch_experiences().await {
        Ok(experiences) => {
            debug!(count = experiences.len(), "fetched experiences");
            experiences
        }
        Err(e) => {
            warn!(error = %e, "experience fetch failed, serving empty groups");
            Experiences::default()
        }
    }
}
