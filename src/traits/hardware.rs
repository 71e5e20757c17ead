//! Hardware abstraction traits for buttons, output lines, and the clock.
//!
//! This module defines the raw-pin interfaces that allow rs-accessory to
//! work across different platforms (real GPIO, desktop mocks, etc.).
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`ButtonBank`] | Raw level reads for the three panel buttons |
//! | [`OutputBank`] | Indicator LEDs and animation effect relays |
//! | [`Clock`] | Time source for `no_std` environments |
//!
//! Button and output access is deliberately infallible: on the target
//! hardware these are single GPIO register reads/writes. Fallible
//! collaborators (audio, storage) carry their own error types.
//!
//! # Example
//!
//! ```rust
//! use rs_accessory::traits::{ButtonBank, Button, OutputBank, OutputLine};
//! use rs_accessory::hal::{MockButtons, MockOutputs};
//!
//! let mut buttons = MockButtons::new();
//! buttons.set(Button::Mode, true);
//! assert!(buttons.pressed(Button::Mode));
//!
//! let mut outputs = MockOutputs::new();
//! outputs.set(OutputLine::ModeIndicator, true);
//! assert!(outputs.level(OutputLine::ModeIndicator));
//! ```

/// The decoder's physical buttons.
///
/// `TriggerB` is wired and polled but has no decoder behavior beyond a
/// diagnostic line; it is reserved for a future second animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Button {
    /// The mode button: short hold enters information mode, long hold
    /// enters address programming mode, any press aborts programming.
    Mode,
    /// The manual animation trigger button.
    TriggerA,
    /// Reserved input with no assigned action.
    TriggerB,
}

/// The decoder's output lines.
///
/// Indicators are panel LEDs; the two relays drive the physical animation
/// effects (a flickering fireplace and an anvil striker in the reference
/// hardware).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OutputLine {
    /// Programming-mode indicator: low in running mode, high in address
    /// programming mode.
    ModeIndicator,
    /// Animation state indicator A (lit while the animation runs).
    StatusA,
    /// Animation state indicator B (reserved; only ever driven low).
    StatusB,
    /// First animation effect relay.
    FireplaceRelay,
    /// Second animation effect relay.
    AnvilRelay,
}

impl OutputLine {
    /// The lines driven by the animation, in the order they are cleared
    /// when the animation stops.
    pub const ANIMATION_LINES: [OutputLine; 4] = [
        OutputLine::StatusA,
        OutputLine::StatusB,
        OutputLine::FireplaceRelay,
        OutputLine::AnvilRelay,
    ];
}

/// Raw button level reads.
///
/// Implementors return the instantaneous electrical level (already
/// normalized so `true` means pressed). Edge detection, debouncing, and
/// hold timing are handled by the decoder core, not here.
pub trait ButtonBank {
    /// Returns true if the given button is currently pressed.
    ///
    /// Takes `&mut self` so implementations can sit directly on
    /// `embedded-hal` input pins, whose reads are `&mut`.
    fn pressed(&mut self, button: Button) -> bool;
}

/// Indicator and relay output lines.
///
/// Implementors drive the physical pins. Calls must be level-idempotent:
/// setting a line to its current level is a no-op.
pub trait OutputBank {
    /// Drive the given line high (`true`) or low (`false`).
    fn set(&mut self, line: OutputLine, level: bool);

    /// Drive every animation-related line low.
    ///
    /// Default implementation iterates [`OutputLine::ANIMATION_LINES`].
    fn clear_animation_lines(&mut self) {
        for line in OutputLine::ANIMATION_LINES {
            self.set(line, false);
        }
    }
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for hold classification, the
/// animation window, and the learn lockout. On desktop, this can wrap
/// `std::time::Instant`. On embedded, use a hardware timer.
///
/// # Example
///
/// ```rust
/// use rs_accessory::traits::Clock;
/// use rs_accessory::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingOutputs {
        sets: Vec<(OutputLine, bool)>,
    }

    impl OutputBank for RecordingOutputs {
        fn set(&mut self, line: OutputLine, level: bool) {
            self.sets.push((line, level));
        }
    }

    #[test]
    fn clear_animation_lines_default_impl() {
        let mut outputs = RecordingOutputs { sets: Vec::new() };
        outputs.clear_animation_lines();

        assert_eq!(outputs.sets.len(), 4);
        assert!(outputs.sets.iter().all(|(_, level)| !level));
        assert!(outputs
            .sets
            .iter()
            .any(|(line, _)| *line == OutputLine::FireplaceRelay));
        assert!(outputs
            .sets
            .iter()
            .any(|(line, _)| *line == OutputLine::AnvilRelay));
    }

    #[test]
    fn animation_lines_exclude_mode_indicator() {
        assert!(!OutputLine::ANIMATION_LINES.contains(&OutputLine::ModeIndicator));
    }

    #[test]
    fn button_equality() {
        assert_eq!(Button::Mode, Button::Mode);
        assert_ne!(Button::TriggerA, Button::TriggerB);
    }

    #[test]
    fn output_line_debug() {
        assert_eq!(format!("{:?}", OutputLine::StatusA), "StatusA");
        assert_eq!(format!("{:?}", OutputLine::AnvilRelay), "AnvilRelay");
    }
}
