//! # Navigation Module
//!
//! Scroll-driven state for the fixed navigation bar.
//!
//! The controller owns two independent axes:
//! - `menu_open`: the mobile menu (starts closed)
//! - `active_section`: which page section the reader is in (starts `None`)
//!
//! Scroll events move `active_section`; clicks move both. The host measures
//! section geometry and hands it in through [`SectionLayout`], so nothing here
//! needs a DOM.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Added to the raw offset before matching a section, so a section becomes
/// active slightly before its top reaches the viewport edge.
pub const SCROLL_LOOKAHEAD: u32 = 100;

/// Subtracted from a section's top when navigating, so the fixed bar does not
/// cover the heading.
pub const NAVBAR_ALLOWANCE: u32 = 80;

/// Scroll distance over which the bar fades from translucent to opaque.
pub const VISUAL_RAMP: u32 = 50;

/// Offset past which the bar counts as "scrolled" (adds its shadow).
pub const SCROLLED_THRESHOLD: u32 = 20;

pub const MIN_OPACITY: f64 = 0.2;
pub const MAX_OPACITY: f64 = 0.95;
pub const MIN_BLUR: f64 = 4.0;
pub const MAX_BLUR: f64 = 12.0;

// =============================================================================
// SECTIONS
// =============================================================================

/// A navigable page section. The string form is the page anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    About,
    Skills,
    Projects,
    Contact,
}

impl SectionId {
    /// All sections in page order, top to bottom.
    pub const ALL: [SectionId; 4] = [
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Contact,
    ];

    /// The page anchor for this section.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SectionId::About => "about",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Contact => "contact",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| NavError::UnknownSection(s.to_string()))
    }
}

/// Errors from string-keyed navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("unknown section: {0}")]
    UnknownSection(String),
}

/// A navigation bar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: SectionId,
    pub label: &'static str,
}

/// The navigation bar entries, in page order.
pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        id: SectionId::About,
        label: "About",
    },
    NavItem {
        id: SectionId::Skills,
        label: "Skills",
    },
    NavItem {
        id: SectionId::Projects,
        label: "Projects",
    },
    NavItem {
        id: SectionId::Contact,
        label: "Contact",
    },
];

// =============================================================================
// LAYOUT
// =============================================================================

/// Vertical extent of a section, in document pixels: `[top, top + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub top: u32,
    pub height: u32,
}

impl SectionBounds {
    #[must_use]
    pub const fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    /// Check if a document position falls inside this section.
    #[must_use]
    pub fn contains(&self, position: u32) -> bool {
        position
            .checked_sub(self.top)
            .is_some_and(|delta| delta < self.height)
    }
}

/// Source of section geometry.
///
/// Returns `None` for sections not present on the page yet (content still
/// loading). Those sections are skipped, never treated as errors.
pub trait SectionLayout {
    fn bounds(&self, section: SectionId) -> Option<SectionBounds>;
}

/// A measured page layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    sections: BTreeMap<SectionId, SectionBounds>,
}

impl PageLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`PageLayout::set`].
    #[must_use]
    pub fn with_section(mut self, section: SectionId, bounds: SectionBounds) -> Self {
        self.set(section, bounds);
        self
    }

    /// Record (or re-measure) a section.
    pub fn set(&mut self, section: SectionId, bounds: SectionBounds) {
        self.sections.insert(section, bounds);
    }

    /// Forget a section, e.g. when it unmounts.
    pub fn remove(&mut self, section: SectionId) -> Option<SectionBounds> {
        self.sections.remove(&section)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl SectionLayout for PageLayout {
    fn bounds(&self, section: SectionId) -> Option<SectionBounds> {
        self.sections.get(&section).copied()
    }
}

// =============================================================================
// DERIVED STATE
// =============================================================================

/// Scroll-derived navigation state. Lives for one page view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScrollState {
    pub scroll_offset: u32,
    pub active_section: Option<SectionId>,
}

/// Bar appearance as a pure function of the scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NavigationVisualState {
    /// In `[MIN_OPACITY, MAX_OPACITY]`.
    pub background_opacity: f64,
    /// In `[MIN_BLUR, MAX_BLUR]`, pixels.
    pub blur_radius: f64,
}

/// Interpolate the bar's opacity and blur for a scroll offset.
///
/// Linear over the first [`VISUAL_RAMP`] pixels, flat afterwards.
#[must_use]
pub fn derive_visual(offset: u32) -> NavigationVisualState {
    let t = (f64::from(offset) / f64::from(VISUAL_RAMP)).clamp(0.0, 1.0);
    NavigationVisualState {
        background_opacity: MIN_OPACITY + (MAX_OPACITY - MIN_OPACITY) * t,
        blur_radius: MIN_BLUR + (MAX_BLUR - MIN_BLUR) * t,
    }
}

/// Check if the bar should render in its "scrolled" style.
#[must_use]
pub fn is_scrolled(offset: u32) -> bool {
    offset > SCROLLED_THRESHOLD
}

/// Find the section containing `offset + SCROLL_LOOKAHEAD`.
///
/// Scans bottom-up so that, with overlapping ranges, the lower section wins.
#[must_use]
pub fn active_section<L>(offset: u32, layout: &L) -> Option<SectionId>
where
    L: SectionLayout + ?Sized,
{
    let position = offset.saturating_add(SCROLL_LOOKAHEAD);
    NAV_ITEMS.iter().rev().find_map(|item| {
        let bounds = layout.bounds(item.id)?;
        bounds.contains(position).then_some(item.id)
    })
}

// =============================================================================
// COMMANDS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Smooth,
}

/// A scroll the host should perform. Fire-and-forget: completion is not
/// reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollRequest {
    pub top: u32,
    pub behavior: ScrollBehavior,
}

impl ScrollRequest {
    #[must_use]
    pub const fn smooth(top: u32) -> Self {
        Self {
            top,
            behavior: ScrollBehavior::Smooth,
        }
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Navigation bar controller.
///
/// One instance per page view, owned by the host. Every handler runs to
/// completion, so re-entrant single-threaded dispatch is safe.
#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    state: ScrollState,
    menu_open: bool,
    /// Latest raw offset waiting for the next animation frame.
    pending_offset: Option<u32>,
}

impl NavigationController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    #[must_use]
    pub fn active_section(&self) -> Option<SectionId> {
        self.state.active_section
    }

    #[must_use]
    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Visual state for the current offset.
    #[must_use]
    pub fn visual(&self) -> NavigationVisualState {
        derive_visual(self.state.scroll_offset)
    }

    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        is_scrolled(self.state.scroll_offset)
    }

    /// Recompute scroll state for `offset` immediately.
    ///
    /// Clears the active section when no section contains the lookahead
    /// position (top of page, or past the last section).
    pub fn on_scroll<L>(&mut self, offset: u32, layout: &L) -> &ScrollState
    where
        L: SectionLayout + ?Sized,
    {
        self.state = ScrollState {
            scroll_offset: offset,
            active_section: active_section(offset, layout),
        };
        &self.state
    }

    /// Record a raw scroll event for the next frame.
    ///
    /// Returns `true` when the host must request an animation frame (nothing
    /// was pending). Later events in the same frame only replace the offset.
    pub fn queue_scroll(&mut self, offset: u32) -> bool {
        let needs_frame = self.pending_offset.is_none();
        self.pending_offset = Some(offset);
        needs_frame
    }

    /// Check if a queued scroll is waiting for a frame.
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        self.pending_offset.is_some()
    }

    /// Animation frame callback: one recompute for the latest queued offset.
    ///
    /// Returns `None` when nothing was queued since the last frame.
    pub fn on_frame<L>(&mut self, layout: &L) -> Option<&ScrollState>
    where
        L: SectionLayout + ?Sized,
    {
        let offset = self.pending_offset.take()?;
        Some(self.on_scroll(offset, layout))
    }

    /// Navigate to a section.
    ///
    /// Marks the section active right away (without waiting for the scroll to
    /// land) and closes the menu. Returns `None` if the section is not on the
    /// page, in which case the host has nothing to scroll.
    pub fn navigate_to<L>(&mut self, section: SectionId, layout: &L) -> Option<ScrollRequest>
    where
        L: SectionLayout + ?Sized,
    {
        self.state.active_section = Some(section);
        self.menu_open = false;
        layout
            .bounds(section)
            .map(|bounds| ScrollRequest::smooth(bounds.top.saturating_sub(NAVBAR_ALLOWANCE)))
    }

    /// String-keyed [`NavigationController::navigate_to`].
    ///
    /// Unknown ids leave all state untouched.
    pub fn navigate_to_id<L>(&mut self, id: &str, layout: &L) -> Result<Option<ScrollRequest>, NavError>
    where
        L: SectionLayout + ?Sized,
    {
        let section = id.parse::<SectionId>()?;
        Ok(self.navigate_to(section, layout))
    }

    /// Logo click: back to the top with nothing active.
    pub fn navigate_home(&mut self) -> ScrollRequest {
        self.state.active_section = None;
        self.menu_open = false;
        ScrollRequest::smooth(0)
    }

    /// Flip the mobile menu. Returns the new state.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    /// Outside click or Escape. Returns `true` if the menu was open.
    pub fn dismiss_menu(&mut self) -> bool {
        std::mem::replace(&mut self.menu_open, false)
    }
}

// =============================================================================
// TESTS
// =============================================================================
