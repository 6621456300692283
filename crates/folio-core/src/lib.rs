//! # Folio Core
//!
//! The deterministic logic behind the portfolio site.
//!
//! Nothing in this crate touches the network, the clock or the DOM. Hosts feed
//! events in (scroll offsets, clicks, ticks, form bodies) and act on what comes
//! back (scroll requests, derived visual state, outgoing emails).
//!
//! ```text
//! ┌──────────────┐  offsets/clicks  ┌─────────────────────┐
//! │  Page host   │ ───────────────► │ NavigationController│
//! │ (browser)    │ ◄─────────────── │ (nav)               │
//! └──────────────┘  ScrollRequest   └─────────────────────┘
//!
//! ┌──────────────┐  JSON body       ┌─────────────────────┐
//! │ apps/folio   │ ───────────────► │ ContactSubmission   │
//! │ (server)     │ ◄─────────────── │ → OutgoingEmail     │
//! └──────────────┘  ContactError    └─────────────────────┘
//! ```

pub mod carousel;
pub mod contact;
pub mod content;
pub mod nav;
pub mod skills;
pub mod typewriter;

pub use carousel::{Carousel, Direction};
pub use contact::{
    ContactError, ContactField, ContactMessage, ContactSubmission, DeliveryError, OutgoingEmail,
};
pub use content::{ExperienceItem, ExperienceKind, Experiences, Project};
pub use nav::{
    NavError, NavItem, NavigationController, NavigationVisualState, PageLayout, ScrollRequest,
    ScrollState, SectionBounds, SectionId, SectionLayout,
};
pub use skills::Skill;
pub use typewriter::Typewriter;
