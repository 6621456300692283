//! # CLI
//!
//! clap-based commands for running the server and poking at its parts.

use crate::api::{AppState, run_server};
use crate::config::{ContentArgs, ContentConfig, MailArgs, ServerArgs};
use crate::content_client::{ContentSource, SanityClient, UnconfiguredContent, load_experiences, load_projects};
use crate::error::FolioError;
use crate::mailer::{Mailer, build_mailer};
use clap::{Parser, Subcommand};
use folio_core::contact::compose_email;
use folio_core::nav::{active_section, derive_visual, is_scrolled};
use folio_core::{ContactSubmission, ExperienceKind, Experiences, PageLayout, Project, SectionBounds, SectionId};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Portfolio site backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        #[command(flatten)]
        server: ServerArgs,
        #[command(flatten)]
        content: ContentArgs,
        #[command(flatten)]
        mail: MailArgs,
    },
    /// Fetch and print the project list
    Projects {
        #[command(flatten)]
        content: ContentArgs,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch and print the experience groups
    Experiences {
        #[command(flatten)]
        content: ContentArgs,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate and send a contact message
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        message: String,
        #[command(flatten)]
        mail: MailArgs,
    },
    /// Print the navbar visual state for a scroll offset
    Visual {
        offset: u32,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the active section for a scroll offset
    Active {
        offset: u32,
        /// Section geometry as id=top:height (repeatable)
        #[arg(long = "section", value_parser = parse_section_spec)]
        sections: Vec<SectionSpec>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

/// One `--section id=top:height` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub id: SectionId,
    pub bounds: SectionBounds,
}

pub fn parse_section_spec(raw: &str) -> Result<SectionSpec, String> {
    let (id, geometry) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected id=top:height, got {:?}", raw))?;
    let (top, height) = geometry
        .split_once(':')
        .ok_or_else(|| format!("expected top:height, got {:?}", geometry))?;

    let id = id.parse::<SectionId>().map_err(|e| e.to_string())?;
    let top = top.parse::<u32>().map_err(|e| format!("invalid top {:?}: {}", top, e))?;
    let height = height
        .parse::<u32>()
        .map_err(|e| format!("invalid height {:?}: {}", height, e))?;

    Ok(SectionSpec {
        id,
        bounds: SectionBounds::new(top, height),
    })
}

// =============================================================================
// DISPATCH
// =============================================================================

pub async fn run(cli: Cli) -> Result<(), FolioError> {
    match cli.command {
        Command::Serve { server, content, mail } => {
            let server = server.into_config()?;
            let content = content_source(content.into_config()?)?;
            let mail = mail.into_config()?;
            let mailer = build_mailer(&mail)?;
            let state = AppState::new(content, mailer, mail.inbox(), server.contact_per_minute);
            run_server(&server, state).await
        }
        Command::Projects { content, json } => {
            let source = content_source(content.into_config()?)?;
            cmd_projects(source.as_ref(), json).await
        }
        Command::Experiences { content, json } => {
            let source = content_source(content.into_config()?)?;
            cmd_experiences(source.as_ref(), json).await
        }
        Command::Contact { name, message, mail } => {
            let mail = mail.into_config()?;
            let mailer = build_mailer(&mail)?;
            cmd_contact(mailer.as_ref(), mail.inbox(), &name, &message).await
        }
        Command::Visual { offset, json } => {
            println!("{}", format_visual(offset, json)?);
            Ok(())
        }
        Command::Active { offset, sections, json } => {
            println!("{}", format_active(offset, &sections, json)?);
            Ok(())
        }
    }
}

/// Client for the configured backend, or the unconfigured stand-in.
pub fn content_source(config: Option<ContentConfig>) -> Result<Arc<dyn ContentSource>, FolioError> {
    match config {
        Some(config) => {
            info!(base_url = %config.base_url, dataset = %config.dataset, "content backend configured");
            Ok(Arc::new(SanityClient::new(config)?))
        }
        None => {
            warn!("no content backend configured, content sections will be empty");
            Ok(Arc::new(UnconfiguredContent))
        }
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

pub async fn cmd_projects(source: &dyn ContentSource, json: bool) -> Result<(), FolioError> {
    let projects = load_projects(source).await;
    println!("{}", format_projects(&projects, json)?);
    Ok(())
}

pub async fn cmd_experiences(source: &dyn ContentSource, json: bool) -> Result<(), FolioError> {
    let experiences = load_experiences(source).await;
    println!("{}", format_experiences(&experiences, json)?);
    Ok(())
}

/// Validate, compose and send one message. Validation failures never reach
/// the mailer.
pub async fn cmd_contact(mailer: &dyn Mailer, inbox: &str, name: &str, message: &str) -> Result<(), FolioError> {
    let message = ContactSubmission::new(name, message).validate()?;
    let email = compose_email(&message, inbox);
    mailer
        .send(&email)
        .await
        .map_err(folio_core::ContactError::from)?;
    println!("Message sent to {}", inbox);
    Ok(())
}

// =============================================================================
// FORMATTING
// =============================================================================

pub fn format_projects(projects: &[Project], json: bool) -> Result<String, FolioError> {
    if json {
        return Ok(serde_json::to_string_pretty(projects)?);
    }
    if projects.is_empty() {
        return Ok(String::from("No projects available"));
    }

    let mut output = String::new();
    for (position, project) in projects.iter().enumerate() {
        output.push_str(&format!("{}. {}", position + 1, project.title));
        if !project.tech_stack.is_empty() {
            output.push_str(&format!(" [{}]", project.tech_stack.join(", ")));
        }
        output.push('\n');
        if let Some(url) = &project.live_url {
            output.push_str(&format!("   live: {}\n", url));
        }
        if let Some(url) = &project.repo_url {
            output.push_str(&format!("   repo: {}\n", url));
        }
    }
    Ok(output.trim_end().to_string())
}

pub fn format_experiences(experiences: &Experiences, json: bool) -> Result<String, FolioError> {
    if json {
        return Ok(serde_json::to_string_pretty(experiences)?);
    }

    let mut output = String::new();
    for kind in [ExperienceKind::Academic, ExperienceKind::Organization] {
        output.push_str(&format!("{}:\n", kind.label()));
        let items = experiences.items(kind);
        if items.is_empty() {
            output.push_str("  (none)\n");
        }
        for item in items {
            output.push_str(&format!("  {} | {} @ {}\n", item.period, item.title, item.affiliation));
            for highlight in &item.highlights {
                output.push_str(&format!("    - {}\n", highlight));
            }
        }
    }
    Ok(output.trim_end().to_string())
}

pub fn format_visual(offset: u32, json: bool) -> Result<String, FolioError> {
    let visual = derive_visual(offset);
    let scrolled = is_scrolled(offset);
    if json {
        return Ok(serde_json::to_string(&serde_json::json!({
            "offset": offset,
            "background_opacity": visual.background_opacity,
            "blur_radius": visual.blur_radius,
            "scrolled": scrolled,
        }))?);
    }
    Ok(format!(
        "offset {}: opacity {:.3}, blur {:.1}px{}",
        offset,
        visual.background_opacity,
        visual.blur_radius,
        if scrolled { ", scrolled" } else { "" }
    ))
}

pub fn format_active(offset: u32, sections: &[SectionSpec], json: bool) -> Result<String, FolioError> {
    let layout = sections
        .iter()
        .fold(PageLayout::new(), |layout, spec| layout.with_section(spec.id, spec.bounds));
    let active = active_section(offset, &layout);

    if json {
        return Ok(serde_json::to_string(&serde_json::json!({
            "offset": offset,
            "active_section": active,
        }))?);
    }
    Ok(match active {
        Some(section) => format!("offset {}: {}", offset, section),
        None => format!("offset {}: (none)", offset),
    })
}
