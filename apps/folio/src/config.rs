//! # Configuration
//!
//! Command-line flags with environment fallbacks. Each group of raw args is
//! validated into a typed config before anything uses it.
//!
//! Precedence: flag > environment variable > default.

use crate::error::FolioError;
use clap::Args;
use std::num::NonZeroU32;
use std::path::PathBuf;

pub const DEFAULT_DATASET: &str = "production";
pub const DEFAULT_API_VERSION: &str = "2024-01-01";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CONTACT_PER_MINUTE: u32 = 5;
/// Inbox used by the logging mailer when none is configured.
pub const DEV_INBOX: &str = "portfolio@localhost";

// =============================================================================
// CONTENT
// =============================================================================

#[derive(Debug, Clone, Default, Args)]
pub struct ContentArgs {
    /// Hosted content project id
    #[arg(long, env = "SANITY_PROJECT_ID")]
    pub sanity_project_id: Option<String>,

    /// Dataset name
    #[arg(long, env = "SANITY_DATASET", default_value = DEFAULT_DATASET)]
    pub sanity_dataset: String,

    /// Query API version (date form, with or without a leading "v")
    #[arg(long, env = "SANITY_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub sanity_api_version: String,

    /// Read token for private datasets
    #[arg(long, env = "SANITY_TOKEN", hide_env_values = true)]
    pub sanity_token: Option<String>,

    /// Query through the CDN edge instead of the live API
    #[arg(long, env = "SANITY_USE_CDN")]
    pub sanity_use_cdn: bool,

    /// Explicit API base URL (overrides project id / CDN)
    #[arg(long, env = "SANITY_BASE_URL")]
    pub sanity_base_url: Option<String>,
}

/// Validated content backend settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    pub base_url: String,
    pub dataset: String,
    pub api_version: String,
    pub token: Option<String>,
}

impl ContentConfig {
    /// Settings for an explicit base URL (tests, proxies).
    pub fn with_base_url(base_url: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            dataset: dataset.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            token: None,
        }
    }
}

impl ContentArgs {
    /// Validate. `Ok(None)` means no backend is configured at all.
    pub fn into_config(self) -> Result<Option<ContentConfig>, FolioError> {
        let base_url = match (self.sanity_base_url, self.sanity_project_id) {
            (Some(url), _) => url.trim_end_matches('/').to_string(),
            (None, Some(project)) => {
                if project.is_empty() || !project.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                    return Err(FolioError::Config(format!("invalid project id: {:?}", project)));
                }
                let host = if self.sanity_use_cdn { "apicdn" } else { "api" };
                format!("https://{}.{}.sanity.io", project, host)
            }
            (None, None) => return Ok(None),
        };

        if self.sanity_dataset.is_empty() {
            return Err(FolioError::Config(String::from("dataset must not be empty")));
        }

        let api_version = self.sanity_api_version.trim_start_matches('v').to_string();
        if api_version.is_empty() {
            return Err(FolioError::Config(String::from("API version must not be empty")));
        }

        Ok(Some(ContentConfig {
            base_url,
            dataset: self.sanity_dataset,
            api_version,
            token: self.sanity_token.filter(|t| !t.is_empty()),
        }))
    }
}

// =============================================================================
// MAIL
// =============================================================================

#[derive(Debug, Clone, Default, Args)]
pub struct MailArgs {
    /// Address that receives contact messages
    #[arg(long = "inbox", env = "EMAIL_USER")]
    pub inbox: Option<String>,

    /// Transactional email relay endpoint; without it messages are only logged
    #[arg(long, env = "MAIL_RELAY_URL")]
    pub mail_relay_url: Option<String>,

    /// Bearer token for the relay
    #[arg(long, env = "MAIL_RELAY_TOKEN", hide_env_values = true)]
    pub mail_relay_token: Option<String>,
}

/// Validated mail delivery settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailConfig {
    /// Log messages instead of sending them.
    Log { inbox: String },
    /// Deliver through an HTTP relay.
    Relay {
        inbox: String,
        url: String,
        token: Option<String>,
    },
}

impl MailConfig {
    #[must_use]
    pub fn inbox(&self) -> &str {
        match self {
            MailConfig::Log { inbox } | MailConfig::Relay { inbox, .. } => inbox,
        }
    }
}

impl MailArgs {
    pub fn into_config(self) -> Result<MailConfig, FolioError> {
        let inbox = self.inbox.filter(|i| !i.is_empty());
        if let Some(inbox) = &inbox {
            if !inbox.contains('@') {
                return Err(FolioError::Config(format!("invalid inbox address: {}", inbox)));
            }
        }

        match self.mail_relay_url.filter(|u| !u.is_empty()) {
            Some(url) => {
                let inbox = inbox.ok_or_else(|| {
                    FolioError::Config(String::from("EMAIL_USER is required when a mail relay is configured"))
                })?;
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(FolioError::Config(format!("mail relay URL must be http(s): {}", url)));
                }
                Ok(MailConfig::Relay {
                    inbox,
                    url,
                    token: self.mail_relay_token.filter(|t| !t.is_empty()),
                })
            }
            None => Ok(MailConfig::Log {
                inbox: inbox.unwrap_or_else(|| DEV_INBOX.to_string()),
            }),
        }
    }
}

// =============================================================================
// SERVER
// =============================================================================

#[derive(Debug, Clone, Args)]
pub struct ServerArgs {
    /// Bind address
    #[arg(long, env = "FOLIO_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Bind port
    #[arg(long, env = "FOLIO_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory with the built front-end, served for non-API paths
    #[arg(long, env = "FOLIO_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Contact submissions accepted per minute (server-wide)
    #[arg(
        long,
        env = "FOLIO_CONTACT_PER_MINUTE",
        default_value_t = DEFAULT_CONTACT_PER_MINUTE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub contact_per_minute: u32,
}

/// Validated server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    pub static_dir: Option<PathBuf>,
    pub contact_per_minute: NonZeroU32,
}

impl ServerArgs {
    pub fn into_config(self) -> Result<ServerConfig, FolioError> {
        let contact_per_minute = NonZeroU32::new(self.contact_per_minute)
            .ok_or_else(|| FolioError::Config(String::from("contact rate must be at least 1 per minute")))?;

        if let Some(dir) = &self.static_dir {
            if !dir.is_dir() {
                return Err(FolioError::Config(format!(
                    "static directory does not exist: {}",
                    dir.display()
                )));
            }
        }

        Ok(ServerConfig {
            addr: format!("{}:{}", self.host, self.port),
            static_dir: self.static_dir,
            contact_per_minute,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn content_args() -> ContentArgs {
        ContentArgs {
            sanity_dataset: DEFAULT_DATASET.to_string(),
            sanity_api_version: DEFAULT_API_VERSION.to_string(),
            ..ContentArgs::default()
        }
    }

    #[test]
    fn content_unconfigured() {
        assert_eq!(content_args().into_config().unwrap(), None);
    }

    #[test]
    fn content_from_project_id() {
        let args = ContentArgs {
            sanity_project_id: Some("abc123".to_string()),
            sanity_api_version: "v2023-05-03".to_string(),
            sanity_token: Some(String::new()),
            ..content_args()
        };
        let config = args.into_config().unwrap().unwrap();
        assert_eq!(config.base_url, "https://abc123.api.sanity.io");
        assert_eq!(config.api_version, "2023-05-03");
        assert_eq!(config.token, None);
    }

    #[test]
    fn content_cdn_and_override() {
        let cdn = ContentArgs {
            sanity_project_id: Some("abc123".to_string()),
            sanity_use_cdn: true,
            ..content_args()
        };
        assert_eq!(
            cdn.into_config().unwrap().unwrap().base_url,
            "https://abc123.apicdn.sanity.io"
        );

        let explicit = ContentArgs {
            sanity_project_id: Some("abc123".to_string()),
            sanity_base_url: Some("http://127.0.0.1:9000/".to_string()),
            ..content_args()
        };
        assert_eq!(
            explicit.into_config().unwrap().unwrap().base_url,
            "http://127.0.0.1:9000"
        );
    }

    #[test]
    fn content_rejects_bad_project_id() {
        let args = ContentArgs {
            sanity_project_id: Some("evil.com/x".to_string()),
            ..content_args()
        };
        assert!(matches!(args.into_config(), Err(FolioError::Config(_))));
    }

    #[test]
    fn mail_defaults_to_log() {
        let config = MailArgs::default().into_config().unwrap();
        assert_eq!(
            config,
            MailConfig::Log {
                inbox: DEV_INBOX.to_string()
            }
        );
    }

    #[test]
    fn mail_relay_requires_inbox() {
        let args = MailArgs {
            mail_relay_url: Some("https://relay.example.com/send".to_string()),
            ..MailArgs::default()
        };
        assert!(matches!(args.into_config(), Err(FolioError::Config(_))));
    }

    #[test]
    fn mail_relay_config() {
        let args = MailArgs {
            inbox: Some("me@example.com".to_string()),
            mail_relay_url: Some("https://relay.example.com/send".to_string()),
            mail_relay_token: Some("secret".to_string()),
        };
        let config = args.into_config().unwrap();
        assert_eq!(config.inbox(), "me@example.com");
        assert!(matches!(config, MailConfig::Relay { token: Some(_), .. }));
    }

    #[test]
    fn mail_rejects_bad_inbox() {
        let args = MailArgs {
            inbox: Some("not-an-address".to_string()),
            ..MailArgs::default()
        };
        assert!(args.into_config().is_err());
    }

    #[test]
    fn server_rejects_missing_static_dir() {
        let args = ServerArgs {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: Some(PathBuf::from("/definitely/not/here")),
            contact_per_minute: 5,
        };
        assert!(matches!(args.into_config(), Err(FolioError::Config(_))));
    }

    #[test]
    fn server_config() {
        let args = ServerArgs {
            host: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: None,
            contact_per_minute: 3,
        };
        let config = args.into_config().unwrap();
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.contact_per_minute.get(), 3);
    }
}
