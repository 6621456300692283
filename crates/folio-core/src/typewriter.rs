//! # Typewriter Module
//!
//! The hero name animation: type the text out, optionally pause, delete it
//! and start again.
//!
//! The host owns the timer. Each [`Typewriter::tick`] advances one step and
//! says how long to wait before the next one.

/// Pause with the full text visible before deleting, in milliseconds.
pub const HOLD_MS: u64 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    Holding,
    Deleting,
    Done,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
    speed_ms: u64,
    looping: bool,
    phase: Phase,
    loop_count: u32,
}

impl Typewriter {
    pub fn new(text: &str, speed_ms: u64, looping: bool) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
            speed_ms,
            looping,
            phase: Phase::Typing,
            loop_count: 0,
        }
    }

    /// Currently visible prefix.
    #[must_use]
    pub fn display(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    /// Completed type/delete cycles.
    #[must_use]
    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    #[must_use]
    pub fn is_deleting(&self) -> bool {
        self.phase == Phase::Deleting
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Delay before the first tick.
    #[must_use]
    pub fn initial_delay(&self) -> u64 {
        self.speed_ms
    }

    /// Advance one step. Returns the delay until the next tick, or `None`
    /// once a non-looping animation has finished.
    pub fn tick(&mut self) -> Option<u64> {
        match self.phase {
            Phase::Typing => {
                if self.shown < self.chars.len() {
                    self.shown += 1;
                }
                if self.shown == self.chars.len() {
                    if self.looping {
                        self.phase = Phase::Holding;
                        return Some(HOLD_MS);
                    }
                    self.phase = Phase::Done;
                    return None;
                }
                Some(self.speed_ms)
            }
            Phase::Holding => {
                self.phase = Phase::Deleting;
                self.delete_step()
            }
            Phase::Deleting => self.delete_step(),
            Phase::Done => None,
        }
    }

    fn delete_step(&mut self) -> Option<u64> {
        self.shown = self.shown.saturating_sub(1);
        if self.shown == 0 {
            self.phase = Phase::Typing;
            self.loop_count = self.loop_count.saturating_add(1);
            return Some(self.speed_ms);
        }
        Some(self.speed_ms / 2)
    }
}

// =============================================================================
// TESTS
// =============================================================================
