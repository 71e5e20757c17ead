//! The accessory decoder core that ties everything together.
//!
//! This module provides [`AccessoryDecoder`], the central component that
//! owns the three-mode state machine and coordinates buttons, bus packets,
//! the audio module, outputs, and persistent configuration.
//!
//! # Overview
//!
//! The decoder:
//! - Classifies mode-button holds to enter information or programming mode
//! - Learns its bus address from the next packet while in programming mode
//! - Fires the audio/lighting animation on a matching packet or the
//!   manual trigger button
//! - Walks the settings screens on the diagnostic console
//!
//! # Example
//!
//! ```rust
//! use rs_accessory::{AccessoryDecoder, DecoderConfig, Mode};
//! use rs_accessory::hal::{MockAudio, MockButtons, MockConfigStore, MockConsole, MockOutputs};
//! use rs_accessory::traits::BusPacket;
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
//! assert_eq!(decoder.mode(), Mode::Running);
//! assert_eq!(decoder.learned_address(), 140); // factory default
//!
//! // Main loop: poll with the current time, forward decoded packets.
//! decoder.poll(0).unwrap();
//! decoder.handle_packet(BusPacket::to_address(140), 10).unwrap();
//! assert!(decoder.animation_active());
//! ```
//!
//! # Concurrency model
//!
//! Everything runs on one thread: `poll()` and `handle_packet()` are
//! called from the same cooperative loop, so no locking is needed. The
//! original firmware busy-waited through the animation window and the
//! information screens; here every wait is a deadline or latched edge
//! checked per poll, which keeps the loop responsive without changing the
//! observable contracts (no re-trigger while the animation runs, one learn
//! per lockout window, one press/release cycle per settings screen).

use core::fmt;
use core::fmt::Write as _;

use heapless::String as HString;
use heapless::Vec;

use crate::address;
use crate::animation::AnimationTimer;
use crate::button::{HoldClass, PressTimer};
use crate::config::{DecoderConfig, ShortString};
use crate::status::{InfoScreen, InfoScreens, InfoStep};
use crate::traits::{
    AudioNotice, AudioPlayer, Button, ButtonBank, BusPacket, ConfigStore, Console, OutputBank,
    OutputLine,
};

/// The decoder's operating mode.
///
/// Exactly one mode is active at any time and every transition goes
/// through [`AccessoryDecoder::poll`]. `Info` and `AddrProg` can only be
/// entered from `Running` and only return to `Running`, so a direct
/// `Info` ↔ `AddrProg` transition is impossible by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// Normal operation: matching packets and the trigger button fire the
    /// animation.
    #[default]
    Running,
    /// Settings screens on the diagnostic console.
    Info,
    /// Address learning: the next packet's address becomes the learned
    /// address.
    AddrProg,
}

impl Mode {
    /// Lowercase name for diagnostics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Mode::Running => "running",
            Mode::Info => "information",
            Mode::AddrProg => "address programming",
        }
    }
}

/// Observable effect of one `poll()` or `handle_packet()` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecoderEvent {
    /// The operating mode changed.
    ModeChanged(Mode),
    /// A new address was learned and committed to storage.
    AddressLearned(u16),
    /// The animation started.
    AnimationStarted,
    /// The animation stopped (window elapsed or explicit stop).
    AnimationStopped,
    /// The audio module reported a transient notice.
    AudioNotice(AudioNotice),
}

/// Events emitted by one decoder call.
pub type DecoderEvents = Vec<DecoderEvent, 4>;

/// Errors from the decoder's fallible collaborators.
///
/// Button and output access is infallible by design; only the audio
/// module and the configuration store can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecoderError<AE, SE> {
    /// The audio module failed (fatal at init, command failure later).
    Audio(AE),
    /// A configuration slot read or write failed.
    Storage(SE),
}

impl<AE: fmt::Debug, SE: fmt::Debug> fmt::Display for DecoderError<AE, SE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecoderError::Audio(e) => write!(f, "audio device error: {e:?}"),
            DecoderError::Storage(e) => write!(f, "config storage error: {e:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl<AE: fmt::Debug, SE: fmt::Debug> std::error::Error for DecoderError<AE, SE> {}

/// Snapshot of the decoder state for UI or diagnostics.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderState {
    /// Current operating mode.
    pub mode: Mode,
    /// The learned bus address.
    pub address: u16,
    /// Whether the animation window is running.
    pub animation_active: bool,
    /// Firmware version string.
    pub firmware: ShortString,
}

/// Format into a bounded buffer and emit as one console line.
fn say<D: Console>(console: &mut D, args: fmt::Arguments<'_>) {
    let mut text: HString<96> = HString::new();
    let _ = text.write_fmt(args);
    console.line(text.as_str());
}

/// The accessory decoder.
///
/// Constructed once at startup and borrowed by both the polling loop and
/// the packet path; there is no global instance. The type parameters are
/// the hardware seams:
///
/// - `A`: audio module ([`AudioPlayer`])
/// - `S`: persistent configuration ([`ConfigStore`])
/// - `O`: indicator/relay outputs ([`OutputBank`])
/// - `B`: panel buttons ([`ButtonBank`])
/// - `D`: diagnostic console ([`Console`])
pub struct AccessoryDecoder<A, S, O, B, D>
where
    A: AudioPlayer,
    S: ConfigStore,
    O: OutputBank,
    B: ButtonBank,
    D: Console,
{
    audio: A,
    store: S,
    outputs: O,
    buttons: B,
    console: D,
    config: DecoderConfig,

    mode: Mode,
    address: u16,
    press: PressTimer,
    animation: AnimationTimer,
    info: InfoScreens,
    learn_lockout_until: Option<u64>,
    trigger_a_latched: bool,
    trigger_b_latched: bool,
    // Set when programming mode was aborted by a press; the mode button is
    // ignored until it is seen released, so the abort press cannot double
    // as a new hold.
    await_mode_release: bool,
}

type PollResult<A, S> =
    Result<DecoderEvents, DecoderError<<A as AudioPlayer>::Error, <S as ConfigStore>::Error>>;

impl<A, S, O, B, D> AccessoryDecoder<A, S, O, B, D>
where
    A: AudioPlayer,
    S: ConfigStore,
    O: OutputBank,
    B: ButtonBank,
    D: Console,
{
    /// Create a decoder over its hardware seams. Call
    /// [`init`](Self::init) before polling.
    pub fn new(audio: A, store: S, outputs: O, buttons: B, console: D, config: DecoderConfig) -> Self {
        let hold_threshold = config.button.hold_threshold_ms;
        let duration = config.animation.duration_ms;
        Self {
            audio,
            store,
            outputs,
            buttons,
            console,
            config,
            mode: Mode::Running,
            address: 0,
            press: PressTimer::new(hold_threshold),
            animation: AnimationTimer::new(duration),
            info: InfoScreens::new(),
            learn_lockout_until: None,
            trigger_a_latched: false,
            trigger_b_latched: false,
            await_mode_release: false,
        }
    }

    /// One-time startup: seed factory defaults, load the learned address,
    /// bring up the audio module, and print the banner.
    ///
    /// An audio error here is fatal; the embedding binary decides whether
    /// to halt (the reference hardware parks in an infinite loop, since
    /// only physical intervention can fix a missing card).
    pub fn init(&mut self) -> PollResult<A, S> {
        let addr_cfg = self.config.address.clone();
        address::seed_factory(
            &mut self.store,
            addr_cfg.slot_lsb,
            addr_cfg.slot_msb,
            addr_cfg.factory_address,
        )
        .map_err(DecoderError::Storage)?;
        self.address = address::load(&self.store, addr_cfg.slot_lsb, addr_cfg.slot_msb)
            .map_err(DecoderError::Storage)?;

        self.outputs.set(OutputLine::ModeIndicator, false);
        self.outputs.clear_animation_lines();
        self.console.line("inputs/outputs initialized");

        self.console.line("initializing audio driver...");
        self.audio.begin().map_err(DecoderError::Audio)?;
        self.audio
            .configure(self.config.animation.idle_volume)
            .map_err(DecoderError::Audio)?;
        self.console.line("audio driver configured");

        say(
            &mut self.console,
            format_args!(
                "{} - firmware version v{}",
                self.config.device.name, self.config.device.firmware
            ),
        );
        self.console.line("-- running mode --");

        Ok(DecoderEvents::new())
    }

    /// One iteration of the cooperative control loop.
    ///
    /// Reads the buttons, advances whichever mode is active, retires the
    /// animation window when its deadline passes, and drains one pending
    /// audio notice. `now_ms` must come from a monotonic [`Clock`].
    ///
    /// [`Clock`]: crate::traits::Clock
    pub fn poll(&mut self, now_ms: u64) -> PollResult<A, S> {
        let mut events = DecoderEvents::new();

        // The window deadline is honored in every mode: the operator may
        // have switched modes while the animation was still running.
        if self.animation.poll_expired(now_ms) {
            self.finish_animation(&mut events);
        }

        match self.mode {
            Mode::Running => self.poll_running(now_ms, &mut events)?,
            Mode::Info => self.poll_info(&mut events),
            Mode::AddrProg => self.poll_addr_prog(&mut events),
        }

        if let Some(notice) = self.audio.poll_notice() {
            say(
                &mut self.console,
                format_args!("audio: {}", notice.describe()),
            );
            let _ = events.push(DecoderEvent::AudioNotice(notice));
        }

        Ok(events)
    }

    /// Packet entry point, invoked by the embedding loop for every
    /// decoded bus packet.
    ///
    /// Dispatch is a plain match on the mode tag: programming mode learns
    /// the packet's address, running mode fires the animation on a match,
    /// information mode consumes nothing (the reference firmware serviced
    /// no packets while its screens blocked the loop).
    pub fn handle_packet(&mut self, packet: BusPacket, now_ms: u64) -> PollResult<A, S> {
        let mut events = DecoderEvents::new();

        match self.mode {
            Mode::AddrProg => self.learn(packet.address, now_ms, &mut events)?,
            Mode::Running => {
                if packet.address == self.address {
                    self.try_start_animation(now_ms, &mut events)?;
                }
            }
            Mode::Info => {}
        }

        Ok(events)
    }

    /// Force the animation outputs low and clear the window immediately,
    /// without waiting for the deadline.
    ///
    /// Returns the emitted events (empty if no animation was running).
    pub fn stop_animation(&mut self) -> DecoderEvents {
        let mut events = DecoderEvents::new();
        if self.animation.is_active() {
            self.animation.cancel();
            self.finish_animation(&mut events);
        }
        events
    }

    /// Snapshot of the decoder state for UI or diagnostics.
    pub fn state(&self) -> DecoderState {
        DecoderState {
            mode: self.mode,
            address: self.address,
            animation_active: self.animation.is_active(),
            firmware: self.config.device.firmware.clone(),
        }
    }

    /// The current operating mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The learned bus address.
    pub fn learned_address(&self) -> u16 {
        self.address
    }

    /// Whether the animation window is running.
    pub fn animation_active(&self) -> bool {
        self.animation.is_active()
    }

    /// The active configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Borrow the audio module (inspection in tests and embedders).
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Borrow the configuration store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the configuration store (fault injection in tests).
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Borrow the output bank.
    pub fn outputs(&self) -> &O {
        &self.outputs
    }

    /// Borrow the console.
    pub fn console(&self) -> &D {
        &self.console
    }

    /// Mutably borrow the console (draining collected lines in embedders).
    pub fn console_mut(&mut self) -> &mut D {
        &mut self.console
    }

    /// Mutably borrow the button bank (level injection in tests).
    pub fn buttons_mut(&mut self) -> &mut B {
        &mut self.buttons
    }

    /// Mutably borrow the audio module (notice injection in tests).
    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    // ========================================================================
    // Running mode
    // ========================================================================

    fn poll_running(&mut self, now_ms: u64, events: &mut DecoderEvents) -> PollResult2<A, S> {
        let mode_pressed = self.buttons.pressed(Button::Mode);

        if self.await_mode_release {
            if !mode_pressed {
                self.await_mode_release = false;
            }
        } else if let Some(release) = self.press.sample(mode_pressed, now_ms) {
            match release.class {
                HoldClass::Short => self.enter_info(events),
                HoldClass::Long => self.enter_addr_prog(events),
            }
            return Ok(());
        }

        // Manual trigger, latched until release so one press fires once.
        let a_pressed = self.buttons.pressed(Button::TriggerA);
        if a_pressed && !self.trigger_a_latched {
            self.trigger_a_latched = true;
            self.console.line("trigger button pressed");
            self.try_start_animation(now_ms, events)?;
        } else if !a_pressed {
            self.trigger_a_latched = false;
        }

        // Reserved input: logged, no action assigned.
        let b_pressed = self.buttons.pressed(Button::TriggerB);
        if b_pressed && !self.trigger_b_latched {
            self.trigger_b_latched = true;
            self.console.line("second trigger pressed (no action assigned)");
        } else if !b_pressed {
            self.trigger_b_latched = false;
        }

        Ok(())
    }

    // ========================================================================
    // Information mode
    // ========================================================================

    fn poll_info(&mut self, events: &mut DecoderEvents) {
        let mode_pressed = self.buttons.pressed(Button::Mode);
        match self.info.poll(mode_pressed) {
            InfoStep::Show(InfoScreen::Address) => {
                say(
                    &mut self.console,
                    format_args!("DCC address: {}", self.address),
                );
            }
            InfoStep::Show(InfoScreen::Firmware) => {
                say(
                    &mut self.console,
                    format_args!(
                        "{} - firmware version v{}",
                        self.config.device.name, self.config.device.firmware
                    ),
                );
            }
            InfoStep::Done => {
                self.console.line("back to running mode");
                self.enter_running(events);
            }
            InfoStep::Idle => {}
        }
    }

    // ========================================================================
    // Address programming mode
    // ========================================================================

    fn poll_addr_prog(&mut self, events: &mut DecoderEvents) {
        // Any press aborts, regardless of hold length.
        if self.buttons.pressed(Button::Mode) {
            self.console.line("aborted, leaving programming mode");
            self.await_mode_release = true;
            self.enter_running(events);
        }
    }

    fn learn(
        &mut self,
        address: u16,
        now_ms: u64,
        events: &mut DecoderEvents,
    ) -> PollResult2<A, S> {
        // One learn per lockout window; a layout command arrives as a burst
        // of identical packets.
        if let Some(until) = self.learn_lockout_until {
            if now_ms < until {
                return Ok(());
            }
        }

        // Commit first: a failed write must not leave the in-RAM address
        // out of sync with the slots.
        address::commit(
            &mut self.store,
            self.config.address.slot_lsb,
            self.config.address.slot_msb,
            address,
        )
        .map_err(DecoderError::Storage)?;
        self.address = address;
        self.learn_lockout_until = Some(now_ms + self.config.address.learn_lockout_ms);

        say(
            &mut self.console,
            format_args!("new DCC address learned: {address}"),
        );
        let _ = events.push(DecoderEvent::AddressLearned(address));
        Ok(())
    }

    // ========================================================================
    // Animation
    // ========================================================================

    fn try_start_animation(&mut self, now_ms: u64, events: &mut DecoderEvents) -> PollResult2<A, S> {
        if !self.animation.try_start(now_ms) {
            // Not reentrant: triggers during the window are ignored.
            return Ok(());
        }

        self.console.line("running main animation");
        self.outputs.set(OutputLine::StatusA, true);
        self.outputs.set(OutputLine::FireplaceRelay, true);
        self.outputs.set(OutputLine::AnvilRelay, true);

        let clip = self.config.animation.clone();
        self.audio.disable_loop().map_err(DecoderError::Audio)?;
        self.audio.stop().map_err(DecoderError::Audio)?;
        self.audio
            .set_volume(clip.volume)
            .map_err(DecoderError::Audio)?;
        self.audio
            .play_track(clip.folder, clip.track)
            .map_err(DecoderError::Audio)?;

        let _ = events.push(DecoderEvent::AnimationStarted);
        Ok(())
    }

    fn finish_animation(&mut self, events: &mut DecoderEvents) {
        self.console.line("stop main animation");
        self.outputs.clear_animation_lines();
        let _ = events.push(DecoderEvent::AnimationStopped);
    }

    // ========================================================================
    // Mode transitions
    // ========================================================================

    fn enter_running(&mut self, events: &mut DecoderEvents) {
        self.mode = Mode::Running;
        self.press.reset();
        self.outputs.set(OutputLine::ModeIndicator, false);
        self.console.line("-- running mode --");
        let _ = events.push(DecoderEvent::ModeChanged(Mode::Running));
    }

    fn enter_info(&mut self, events: &mut DecoderEvents) {
        self.mode = Mode::Info;
        self.press.reset();
        self.info = InfoScreens::new();
        // Mode indicator deliberately untouched: its level during
        // information mode is unspecified in the reference behavior.
        self.console.line("-- information mode --");
        let _ = events.push(DecoderEvent::ModeChanged(Mode::Info));
    }

    fn enter_addr_prog(&mut self, events: &mut DecoderEvents) {
        self.mode = Mode::AddrProg;
        self.press.reset();
        self.learn_lockout_until = None;
        self.outputs.set(OutputLine::ModeIndicator, true);
        self.console.line("-- address programming mode --");
        let _ = events.push(DecoderEvent::ModeChanged(Mode::AddrProg));
    }
}

type PollResult2<A, S> =
    Result<(), DecoderError<<A as AudioPlayer>::Error, <S as ConfigStore>::Error>>;
