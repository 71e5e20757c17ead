//! Press-duration tracking for the mode button.
//!
//! The mode button's meaning depends on how long it was held: a short hold
//! (released before the threshold) selects information mode, a long hold
//! selects address programming mode. [`PressTimer`] turns raw level
//! samples into release events carrying the measured hold duration, with
//! no blocking waits: feed it the current level and timestamp once per
//! poll.
//!
//! # Example
//!
//! ```rust
//! use rs_accessory::button::{HoldClass, PressTimer};
//!
//! let mut timer = PressTimer::new(1000);
//!
//! assert!(timer.sample(true, 0).is_none());     // press edge
//! assert!(timer.sample(true, 500).is_none());   // still held
//! let released = timer.sample(false, 1500).unwrap();
//! assert_eq!(released.held_ms, 1500);
//! assert_eq!(released.class, HoldClass::Long);
//! ```

/// Classification of a completed hold against the configured threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldClass {
    /// Released before the threshold.
    Short,
    /// Held for the threshold or longer. The threshold itself counts as
    /// long, so a hold of exactly the threshold is deterministic.
    Long,
}

/// A completed press-and-release of the tracked button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Release {
    /// How long the button was held, in milliseconds.
    pub held_ms: u64,
    /// The hold classified against the threshold.
    pub class: HoldClass,
}

/// Edge-detecting hold timer for a single button.
///
/// Tracks press/release edges from raw level samples and reports a
/// [`Release`] when the button comes back up. While the button stays
/// pressed or stays released nothing is reported.
#[derive(Debug)]
pub struct PressTimer {
    threshold_ms: u64,
    pressed_at: Option<u64>,
}

impl PressTimer {
    /// Create a timer classifying holds against `threshold_ms`.
    pub fn new(threshold_ms: u64) -> Self {
        Self {
            threshold_ms,
            pressed_at: None,
        }
    }

    /// Feed one raw level sample.
    ///
    /// Returns a [`Release`] on the release edge, `None` otherwise.
    pub fn sample(&mut self, level: bool, now_ms: u64) -> Option<Release> {
        match (self.pressed_at, level) {
            // Press edge: start timing.
            (None, true) => {
                self.pressed_at = Some(now_ms);
                None
            }
            // Release edge: classify the hold.
            (Some(start), false) => {
                self.pressed_at = None;
                let held_ms = now_ms.saturating_sub(start);
                let class = if held_ms < self.threshold_ms {
                    HoldClass::Short
                } else {
                    HoldClass::Long
                };
                Some(Release { held_ms, class })
            }
            // Held or idle: no edge.
            _ => None,
        }
    }

    /// Forget any in-progress press.
    ///
    /// Used when leaving running mode so a hold that straddles a mode
    /// change is not misreported later.
    pub fn reset(&mut self) {
        self.pressed_at = None;
    }

    /// Whether a press is currently being timed.
    pub fn is_timing(&self) -> bool {
        self.pressed_at.is_some()
    }
}
