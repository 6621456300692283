//! # Carousel Module
//!
//! Paging state for the experience slider.
//!
//! The page counter is unbounded and the visible index wraps, so repeated
//! "next" clicks cycle forever. The direction of the last move picks which
//! side the outgoing card leaves from.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    None,
    Forward,
    Backward,
}

impl Direction {
    /// Page delta for this direction.
    #[must_use]
    pub const fn step(self) -> i64 {
        match self {
            Direction::None => 0,
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    page: i64,
    direction: Direction,
    total: usize,
}

impl Carousel {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            page: 0,
            direction: Direction::None,
            total,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Index of the visible item. Always 0 for an empty carousel.
    #[must_use]
    pub fn index(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.page.rem_euclid(self.total as i64) as usize
    }

    /// Dots and arrows only make sense with more than one item.
    #[must_use]
    pub fn has_controls(&self) -> bool {
        self.total > 1
    }

    /// Arrow click.
    pub fn paginate(&mut self, direction: Direction) {
        if self.total == 0 {
            return;
        }
        self.page = self.page.saturating_add(direction.step());
        self.direction = direction;
    }

    /// Dot click. Out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) {
        if index >= self.total {
            return;
        }
        self.direction = if index > self.index() {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.page = index as i64;
    }

    /// Re-size after new content arrives. Resets to the first item.
    pub fn reset(&mut self, total: usize) {
        *self = Self::new(total);
    }
}

// =============================================================================
// TESTS
// =============================================================================
