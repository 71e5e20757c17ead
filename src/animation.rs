//! Deadline-based timer for the animation window.
//!
//! The original firmware held the control loop hostage for the full
//! animation (a 55 second busy-wait). [`AnimationTimer`] keeps the same
//! observable contract as a non-blocking deadline: once started it refuses
//! further starts, and it reports expiry on the first poll at or past the
//! deadline so the decoder can drop the outputs.
//!
//! # Example
//!
//! ```rust
//! use rs_accessory::animation::AnimationTimer;
//!
//! let mut timer = AnimationTimer::new(55_000);
//!
//! assert!(timer.try_start(0));       // starts
//! assert!(!timer.try_start(100));    // already running, refused
//! assert!(!timer.poll_expired(54_999));
//! assert!(timer.poll_expired(55_000));
//! assert!(!timer.is_active());
//! ```

/// One-shot window timer with re-trigger suppression.
#[derive(Debug)]
pub struct AnimationTimer {
    duration_ms: u64,
    started_ms: Option<u64>,
}

impl AnimationTimer {
    /// Create a timer for a window of `duration_ms`.
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            started_ms: None,
        }
    }

    /// Start the window if it is not already running.
    ///
    /// Returns `true` if the window started, `false` if a window is active
    /// and the trigger must be ignored.
    #[must_use]
    pub fn try_start(&mut self, now_ms: u64) -> bool {
        if self.started_ms.is_some() {
            return false;
        }
        self.started_ms = Some(now_ms);
        true
    }

    /// Check the deadline.
    ///
    /// Returns `true` exactly once, on the first call at or past the end
    /// of the window, and clears the active state.
    #[must_use]
    pub fn poll_expired(&mut self, now_ms: u64) -> bool {
        match self.started_ms {
            Some(start) if now_ms.saturating_sub(start) >= self.duration_ms => {
                self.started_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Cancel the window without reporting expiry.
    pub fn cancel(&mut self) {
        self.started_ms = None;
    }

    /// Whether a window is currently running.
    pub fn is_active(&self) -> bool {
        self.started_ms.is_some()
    }

    /// The configured window length in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Elapsed time inside the current window, if one is running.
    pub fn elapsed_ms(&self, now_ms: u64) -> Option<u64> {
        self.started_ms.map(|start| now_ms.saturating_sub(start))
    }
}
