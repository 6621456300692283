//! Request and response bodies for the HTTP API.

use folio_core::nav::NavigationVisualState;
use folio_core::{NavItem, Project, Skill};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<Skill>,
    /// Category → skill names, categories sorted.
    pub categories: BTreeMap<&'static str, Vec<&'static str>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavResponse {
    pub items: Vec<NavItem>,
    /// Pixels added to the scroll offset when matching sections.
    pub lookahead: u32,
    /// Pixels subtracted from a section's top when navigating.
    pub navbar_allowance: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VisualQuery {
    pub offset: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct VisualResponse {
    #[serde(flatten)]
    pub visual: NavigationVisualState,
    pub scrolled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
