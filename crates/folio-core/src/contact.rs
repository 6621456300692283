//! # Contact Module
//!
//! Contact form validation and email composition.
//!
//! Two failure kinds exist:
//! - validation (missing or oversized fields): reported inline, never retried
//! - delivery (the relay rejected or failed): reported generically; the cause
//!   is for server logs only

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Upper bound on the sender name, in chars.
pub const MAX_NAME_CHARS: usize = 200;

/// Upper bound on the message body, in chars.
pub const MAX_MESSAGE_CHARS: usize = 5000;

/// Generic text shown when delivery fails.
pub const DELIVERY_FAILED_MESSAGE: &str = "Failed to send message";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Message,
}

impl ContactField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Message => "message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The email relay failed. The reason is an internal detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("email relay failed: {reason}")]
pub struct DeliveryError {
    reason: String,
}

impl DeliveryError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("missing required field: {0}")]
    MissingField(ContactField),

    #[error("{field} exceeds {max} characters")]
    TooLong { field: ContactField, max: usize },

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl ContactError {
    /// Check if this is a client-side problem (bad request).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, ContactError::Delivery(_))
    }

    /// Text safe to show the visitor. Never contains delivery causes.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ContactError::MissingField(_) => String::from("Name and message are required"),
            ContactError::TooLong { field, max } => {
                format!("The {} must be at most {} characters", field, max)
            }
            ContactError::Delivery(_) => String::from(DELIVERY_FAILED_MESSAGE),
        }
    }
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// Contact form body as received. Both fields may be absent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactSubmission {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            message: Some(message.into()),
        }
    }

    /// Validate into a [`ContactMessage`].
    ///
    /// Fields are trimmed; whitespace-only counts as missing.
    pub fn validate(&self) -> Result<ContactMessage, ContactError> {
        let name = required(self.name.as_deref(), ContactField::Name, MAX_NAME_CHARS)?;
        let message = required(self.message.as_deref(), ContactField::Message, MAX_MESSAGE_CHARS)?;
        Ok(ContactMessage { name, message })
    }
}

fn required(value: Option<&str>, field: ContactField, max: usize) -> Result<String, ContactError> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(ContactError::MissingField(field));
    }
    if value.chars().count() > max {
        return Err(ContactError::TooLong { field, max });
    }
    Ok(value.to_string())
}

/// A validated contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    name: String,
    message: String,
}

impl ContactMessage {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

// =============================================================================
// EMAIL
// =============================================================================

/// An email ready for the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Build the notification email sent to the site owner's inbox.
#[must_use]
pub fn compose_email(message: &ContactMessage, inbox: &str) -> OutgoingEmail {
    // Header-bound text must stay on one line.
    let subject_name: String = message
        .name
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    OutgoingEmail {
        from: format!("\"Portfolio Contact\" <{}>", inbox),
        to: inbox.to_string(),
        subject: format!("New message from {}", subject_name),
        text: message.message.clone(),
        html: render_html(&escape_html(&message.name), &escape_html(&message.message)),
    }
}

fn render_html(name: &str, message: &str) -> String {
    format!(
        r##"<div style="font-family: Arial, Helvetica, sans-serif; background-color: #f9fafb; padding: 24px;">
  <div style="max-width: 600px; margin: 0 auto; background-color: #ffffff; border-radius: 8px; overflow: hidden; border: 1px solid #e5e7eb;">
    <div style="background-color: #111827; padding: 16px 24px;">
      <h2 style="margin: 0; color: #ffffff; font-size: 18px;">New message from your portfolio</h2>
    </div>
    <div style="padding: 24px;">
      <p style="margin: 0 0 12px; color: #374151; font-size: 14px;">You received a new message through the portfolio website.</p>
      <div style="margin-bottom: 16px;">
        <p style="margin: 0; color: #6b7280; font-size: 12px;">Sender</p>
        <p style="margin: 4px 0 0; color: #111827; font-size: 14px; font-weight: 600;">{name}</p>
      </div>
      <div>
        <p style="margin: 0 0 6px; color: #6b7280; font-size: 12px;">Message</p>
        <div style="padding: 12px 16px; background-color: #f3f4f6; border-radius: 6px; color: #111827; font-size: 14px; line-height: 1.6; white-space: pre-wrap;">{message}</div>
      </div>
    </div>
    <div style="padding: 16px 24px; background-color: #f9fafb; border-top: 1px solid #e5e7eb;">
      <p style="margin: 0; font-size: 12px; color: #9ca3af;">Sent automatically from the portfolio contact form.</p>
    </div>
  </div>
</div>
"##
    )
}

/// Escape text for inclusion in HTML element content.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// =============================================================================
// TESTS
// =============================================================================
