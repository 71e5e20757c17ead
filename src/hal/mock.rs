//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for every decoder trait, enabling
//! development and testing on desktop without physical hardware.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockAudio`] | [`AudioPlayer`] | Records playback commands, queued notices |
//! | [`MockConfigStore`] | [`ConfigStore`] | In-memory slot table with fault injection |
//! | [`MockButtons`] | [`ButtonBank`] | Directly settable button levels |
//! | [`MockOutputs`] | [`OutputBank`] | Tracks line levels and set history |
//! | [`MockConsole`] | [`Console`] | Collects diagnostic lines |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//! | [`MockBus`] | [`BusReceiver`] | Queued decoded packets |
//!
//! # Example
//!
//! ```rust
//! use rs_accessory::{AccessoryDecoder, DecoderConfig};
//! use rs_accessory::hal::{MockAudio, MockButtons, MockConfigStore, MockConsole, MockOutputs};
//! use rs_accessory::traits::{Button, BusPacket, OutputLine};
//!
//! let mut decoder = AccessoryDecoder::new(
//!     MockAudio::new(),
//!     MockConfigStore::new(),
//!     MockOutputs::new(),
//!     MockButtons::new(),
//!     MockConsole::new(),
//!     DecoderConfig::default(),
//! );
//! decoder.init().unwrap();
//!
//! // Fire the animation over the bus and verify the relays.
//! decoder.handle_packet(BusPacket::to_address(140), 0).unwrap();
//! assert!(decoder.outputs().level(OutputLine::FireplaceRelay));
//! ```
//!
//! [`AudioPlayer`]: crate::traits::AudioPlayer
//! [`ConfigStore`]: crate::traits::ConfigStore
//! [`ButtonBank`]: crate::traits::ButtonBank
//! [`OutputBank`]: crate::traits::OutputBank
//! [`Console`]: crate::traits::Console
//! [`Clock`]: crate::traits::Clock
//! [`BusReceiver`]: crate::traits::BusReceiver

use crate::traits::{
    AudioNotice, AudioPlayer, Button, ButtonBank, BusPacket, BusReceiver, Clock, ConfigStore,
    Console, OutputBank, OutputLine, MAX_VOLUME,
};

extern crate alloc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

// ============================================================================
// Audio
// ============================================================================

/// Mock audio module for testing.
///
/// Records every playback command for verification and returns queued
/// notices from `poll_notice`. Use the public fields to inspect state
/// after test operations.
///
/// # Example
///
/// ```rust
/// use rs_accessory::hal::MockAudio;
/// use rs_accessory::traits::AudioPlayer;
///
/// let mut audio = MockAudio::new();
/// audio.begin().unwrap();
/// audio.play_track(1, 1).unwrap();
///
/// assert!(audio.begun);
/// assert_eq!(audio.played, vec![(1, 1)]);
/// ```
#[derive(Debug, Default)]
pub struct MockAudio {
    /// Whether `begin` completed successfully.
    pub begun: bool,
    /// Make `begin` fail (module not responding / card missing).
    pub begin_fails: bool,
    /// Idle volume passed to `configure`, if it was called.
    pub idle_volume: Option<u8>,
    /// Last volume set.
    pub volume: u8,
    /// Whether looping has been disabled.
    pub loop_disabled: bool,
    /// Number of times `stop` was called.
    pub stop_count: usize,
    /// Every `(folder, track)` passed to `play_track`, in order.
    pub played: Vec<(u8, u8)>,
    notices: Vec<AudioNotice>,
}

impl MockAudio {
    /// Creates a new mock audio module.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `begin` fail, simulating a dead module or missing card.
    pub fn with_begin_failure(mut self) -> Self {
        self.begin_fails = true;
        self
    }

    /// Queue a transient notice to be returned by `poll_notice`.
    pub fn queue_notice(&mut self, notice: AudioNotice) {
        self.notices.push(notice);
    }
}

impl AudioPlayer for MockAudio {
    type Error = ();

    fn begin(&mut self) -> Result<(), ()> {
        if self.begin_fails {
            return Err(());
        }
        self.begun = true;
        Ok(())
    }

    fn configure(&mut self, idle_volume: u8) -> Result<(), ()> {
        self.idle_volume = Some(idle_volume);
        self.volume = idle_volume;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ()> {
        self.stop_count += 1;
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), ()> {
        self.volume = volume.min(MAX_VOLUME);
        Ok(())
    }

    fn disable_loop(&mut self) -> Result<(), ()> {
        self.loop_disabled = true;
        Ok(())
    }

    fn play_track(&mut self, folder: u8, track: u8) -> Result<(), ()> {
        self.played.push((folder, track));
        Ok(())
    }

    fn poll_notice(&mut self) -> Option<AudioNotice> {
        if self.notices.is_empty() {
            None
        } else {
            Some(self.notices.remove(0))
        }
    }
}

// ============================================================================
// Storage
// ============================================================================

/// Mock configuration store: a fixed in-memory slot table.
///
/// Slots that were never written or seeded read as an error, like fresh
/// EEPROM without its factory pass. Set [`fail_writes`](Self::fail_writes)
/// to simulate failing media.
#[derive(Debug)]
pub struct MockConfigStore {
    slots: [Option<u8>; 256],
    /// Make every write (and seed) fail.
    pub fail_writes: bool,
    /// Number of successful slot writes.
    pub write_count: usize,
}

impl Default for MockConfigStore {
    fn default() -> Self {
        Self {
            slots: [None; 256],
            fail_writes: false,
            write_count: 0,
        }
    }
}

impl MockConfigStore {
    /// Creates an empty (never-written) store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose writes all fail.
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Raw slot contents, `None` if never written.
    pub fn slot(&self, id: u8) -> Option<u8> {
        self.slots[id as usize]
    }
}

impl ConfigStore for MockConfigStore {
    type Error = ();

    fn read_slot(&self, id: u8) -> Result<u8, ()> {
        self.slots[id as usize].ok_or(())
    }

    fn write_slot(&mut self, id: u8, value: u8) -> Result<(), ()> {
        if self.fail_writes {
            return Err(());
        }
        self.slots[id as usize] = Some(value);
        self.write_count += 1;
        Ok(())
    }

    fn seed_slot(&mut self, id: u8, value: u8) -> Result<(), ()> {
        if self.slots[id as usize].is_none() {
            self.write_slot(id, value)?;
        }
        Ok(())
    }
}

// ============================================================================
// Buttons and outputs
// ============================================================================

/// Mock button bank with directly settable levels.
#[derive(Debug, Default)]
pub struct MockButtons {
    mode: bool,
    trigger_a: bool,
    trigger_b: bool,
}

impl MockButtons {
    /// Creates a bank with all buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw level of a button (`true` = pressed).
    pub fn set(&mut self, button: Button, pressed: bool) {
        match button {
            Button::Mode => self.mode = pressed,
            Button::TriggerA => self.trigger_a = pressed,
            Button::TriggerB => self.trigger_b = pressed,
        }
    }
}

impl ButtonBank for MockButtons {
    fn pressed(&mut self, button: Button) -> bool {
        match button {
            Button::Mode => self.mode,
            Button::TriggerA => self.trigger_a,
            Button::TriggerB => self.trigger_b,
        }
    }
}

/// Mock output bank tracking line levels and the full set history.
///
/// # Example
///
/// ```rust
/// use rs_accessory::hal::MockOutputs;
/// use rs_accessory::traits::{OutputBank, OutputLine};
///
/// let mut outputs = MockOutputs::new();
/// outputs.set(OutputLine::StatusA, true);
/// assert!(outputs.level(OutputLine::StatusA));
/// assert!(!outputs.level(OutputLine::StatusB));
/// assert_eq!(outputs.history.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockOutputs {
    mode_indicator: bool,
    status_a: bool,
    status_b: bool,
    fireplace: bool,
    anvil: bool,
    /// Every `(line, level)` write, in order.
    pub history: Vec<(OutputLine, bool)>,
}

impl MockOutputs {
    /// Creates a bank with all lines low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level of a line.
    pub fn level(&self, line: OutputLine) -> bool {
        match line {
            OutputLine::ModeIndicator => self.mode_indicator,
            OutputLine::StatusA => self.status_a,
            OutputLine::StatusB => self.status_b,
            OutputLine::FireplaceRelay => self.fireplace,
            OutputLine::AnvilRelay => self.anvil,
        }
    }

    /// True if every animation-related line is low.
    pub fn animation_lines_low(&self) -> bool {
        OutputLine::ANIMATION_LINES
            .iter()
            .all(|line| !self.level(*line))
    }
}

impl OutputBank for MockOutputs {
    fn set(&mut self, line: OutputLine, level: bool) {
        match line {
            OutputLine::ModeIndicator => self.mode_indicator = level,
            OutputLine::StatusA => self.status_a = level,
            OutputLine::StatusB => self.status_b = level,
            OutputLine::FireplaceRelay => self.fireplace = level,
            OutputLine::AnvilRelay => self.anvil = level,
        }
        self.history.push((line, level));
    }
}

// ============================================================================
// Console, clock, bus
// ============================================================================

/// Mock console collecting diagnostic lines.
#[derive(Debug, Default)]
pub struct MockConsole {
    /// Every emitted line, in order.
    pub lines: Vec<String>,
}

impl MockConsole {
    /// Creates an empty console.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any emitted line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl Console for MockConsole {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

/// Mock clock for testing.
///
/// Provides a controllable time source for testing time-dependent behavior.
///
/// # Example
///
/// ```rust
/// use rs_accessory::hal::MockClock;
/// use rs_accessory::traits::Clock;
///
/// let mut clock = MockClock::new();
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 500);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

/// Mock bus receiver with a queue of decoded packets.
#[derive(Debug, Default)]
pub struct MockBus {
    packets: Vec<BusPacket>,
}

impl MockBus {
    /// Creates a receiver with no pending packets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a packet for delivery.
    pub fn queue_packet(&mut self, packet: BusPacket) {
        self.packets.push(packet);
    }
}

impl BusReceiver for MockBus {
    fn poll_packet(&mut self) -> Option<BusPacket> {
        if self.packets.is_empty() {
            None
        } else {
            Some(self.packets.remove(0))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
