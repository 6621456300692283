//! # Content Module
//!
//! Typed records served by the hosted content backend, plus the queries that
//! fetch them.
//!
//! Ordering for projects is explicit `order` ascending, records without an
//! `order` last, ties broken by creation time (newest first). The query asks
//! the backend for this and [`sort_projects`] applies it again locally.

use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

// =============================================================================
// QUERIES
// =============================================================================

/// GROQ query for the project list.
pub const PROJECTS_QUERY: &str = r#"*[_type == "project"] | order(order asc, _createdAt desc) {
  "id": _id,
  title,
  description,
  techStack,
  "imageUrl": image.asset->url,
  "imageWidth": image.asset->metadata.dimensions.width,
  "imageHeight": image.asset->metadata.dimensions.height,
  repoUrl,
  liveUrl,
  order,
  "createdAt": _createdAt
}"#;

/// GROQ query for both experience groups in one round trip.
pub const EXPERIENCES_QUERY: &str = r#"{
  "academic": *[_type == "academicExperience"] | order(order asc) {
    period,
    title,
    institution,
    description,
    highlights
  },
  "organization": *[_type == "organizationExperience"] | order(order asc) {
    period,
    role,
    organization,
    description,
    highlights
  }
}"#;

/// Unset CMS fields come back as `null`; treat them as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// PROJECT
// =============================================================================

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    /// Manual display position, lower first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    /// ISO-8601 creation timestamp from the backend.
    #[serde(default, alias = "_createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Project {
    /// Check if the project has an image with known dimensions.
    #[must_use]
    pub fn has_sized_image(&self) -> bool {
        self.image_url.is_some() && self.image_width.is_some() && self.image_height.is_some()
    }
}

fn compare_manual_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort projects into display order. Stable.
pub fn sort_projects(projects: &mut [Project]) {
    projects.sort_by(|a, b| {
        compare_manual_order(a.order, b.order).then_with(|| b.created_at.cmp(&a.created_at))
    });
}

// =============================================================================
// EXPERIENCE
// =============================================================================

/// Which experience group a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceKind {
    Academic,
    Organization,
}

impl ExperienceKind {
    /// Card label for the group.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ExperienceKind::Academic => "Academic",
            ExperienceKind::Organization => "Organizational",
        }
    }
}

/// One experience card.
///
/// Academic records carry `title`/`institution`, organizational ones
/// `role`/`organization`; both land in `title`/`affiliation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub period: String,
    #[serde(default, alias = "role", deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(
        default,
        alias = "institution",
        alias = "organization",
        deserialize_with = "null_as_default"
    )]
    pub affiliation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub highlights: Vec<String>,
}

/// Both experience groups, each already in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiences {
    #[serde(default, deserialize_with = "null_as_default")]
    pub academic: Vec<ExperienceItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub organization: Vec<ExperienceItem>,
}

impl Experiences {
    #[must_use]
    pub fn items(&self, kind: ExperienceKind) -> &[ExperienceItem] {
        match kind {
            ExperienceKind::Academic => &self.academic,
            ExperienceKind::Organization => &self.organization,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.academic.is_empty() && self.organization.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.academic.len() + self.organization.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
