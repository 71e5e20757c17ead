//! Wall-clock time source for desktop embedding.

use crate::traits::Clock;
use std::time::Instant;

/// Monotonic clock over `std::time::Instant`, starting at zero when
/// constructed.
///
/// # Example
///
/// ```rust
/// use rs_accessory::hal::SystemClock;
/// use rs_accessory::traits::Clock;
///
/// let clock = SystemClock::new();
/// let t0 = clock.now_ms();
/// assert!(clock.now_ms() >= t0);
/// ```
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Creates a clock whose epoch is now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
