//! # Mailer
//!
//! Outbound delivery for contact messages.
//!
//! One attempt per message: no retry, no backoff. Whatever goes wrong is
//! folded into a [`DeliveryError`] whose reason is only ever logged.

use crate::config::MailConfig;
use crate::error::FolioError;
use async_trait::async_trait;
use folio_core::{DeliveryError, OutgoingEmail};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Per-request timeout for the relay.
pub const RELAY_TIMEOUT: Duration = Duration::from_secs(15);

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DeliveryError>;
}

/// Logs messages instead of sending them. For local development.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DeliveryError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            body_chars = email.text.chars().count(),
            "mail relay not configured, message logged only"
        );
        Ok(())
    }
}

/// Posts each email as JSON to a transactional relay endpoint.
#[derive(Debug, Clone)]
pub struct HttpRelayMailer {
    url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpRelayMailer {
    pub fn new(url: impl Into<String>, token: Option<String>) -> Result<Self, FolioError> {
        let client = reqwest::Client::builder()
            .timeout(RELAY_TIMEOUT)
            .build()
            .map_err(|e| FolioError::Config(format!("failed to build relay client: {}", e)))?;
        Ok(Self {
            url: url.into(),
            token,
            client,
        })
    }
}

#[async_trait]
impl Mailer for HttpRelayMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DeliveryError> {
        let mut request = self.client.post(&self.url).json(email);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DeliveryError::new(format!("relay request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::new(format!(
                "relay responded {}: {}",
                status,
                body.trim()
            )));
        }
        Ok(())
    }
}

/// Pick the mailer for a config.
pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, FolioError> {
    match config {
        MailConfig::Log { .. } => Ok(Arc::new(LogMailer)),
        MailConfig::Relay { url, token, .. } => Ok(Arc::new(HttpRelayMailer::new(url.clone(), token.clone())?)),
    }
}
