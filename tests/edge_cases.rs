//! Edge case and boundary condition tests for the accessory decoder

use rs_accessory::{
    hal::{MockAudio, MockButtons, MockConfigStore, MockConsole, MockOutputs},
    AccessoryDecoder, AnimationConfig, BusPacket, Button, ButtonConfig, DecoderConfig,
    DecoderError, DecoderEvent, Mode, OutputLine,
};

type TestDecoder =
    AccessoryDecoder<MockAudio, MockConfigStore, MockOutputs, MockButtons, MockConsole>;

fn decoder_with(config: DecoderConfig) -> TestDecoder {
    let mut d = AccessoryDecoder::new(
        MockAudio::new(),
        MockConfigStore::new(),
        MockOutputs::new(),
        MockButtons::new(),
        MockConsole::new(),
        config,
    );
    d.init().unwrap();
    d
}

fn decoder() -> TestDecoder {
    decoder_with(DecoderConfig::default())
}

fn hold_mode(d: &mut TestDecoder, from_ms: u64, to_ms: u64) {
    d.buttons_mut().set(Button::Mode, true);
    d.poll(from_ms).unwrap();
    d.buttons_mut().set(Button::Mode, false);
    d.poll(to_ms).unwrap();
}

// ============================================================================
// Hold Classification Boundaries
// ============================================================================

#[test]
fn hold_one_ms_below_threshold_is_short() {
    let mut d = decoder();
    hold_mode(&mut d, 0, 999);
    assert_eq!(d.mode(), Mode::Info);
}

#[test]
fn hold_exactly_at_threshold_is_long() {
    let mut d = decoder();
    hold_mode(&mut d, 0, 1000);
    assert_eq!(d.mode(), Mode::AddrProg);
}

#[test]
fn zero_length_hold_is_short() {
    // Press and release seen at the same poll timestamp.
    let mut d = decoder();
    hold_mode(&mut d, 500, 500);
    assert_eq!(d.mode(), Mode::Info);
}

#[test]
fn custom_threshold_respected() {
    let config =
        DecoderConfig::default().with_button(ButtonConfig::default().with_hold_threshold_ms(2000));
    let mut d = decoder_with(config);

    hold_mode(&mut d, 0, 1500);
    assert_eq!(d.mode(), Mode::Info);
}

#[test]
fn press_with_no_release_never_classifies() {
    let mut d = decoder();
    d.buttons_mut().set(Button::Mode, true);
    for t in (0..10_000).step_by(500) {
        d.poll(t).unwrap();
    }
    assert_eq!(d.mode(), Mode::Running);
}

// ============================================================================
// Address Boundaries
// ============================================================================

#[test]
fn learn_address_zero() {
    let mut d = decoder();
    hold_mode(&mut d, 0, 1500);

    d.handle_packet(BusPacket::to_address(0), 2000).unwrap();
    assert_eq!(d.learned_address(), 0);
    assert_eq!(d.store().slot(47), Some(0));
    assert_eq!(d.store().slot(48), Some(0));
}

#[test]
fn learn_address_requiring_both_slots() {
    let mut d = decoder();
    hold_mode(&mut d, 0, 1500);

    d.handle_packet(BusPacket::to_address(65_535), 2000).unwrap();
    assert_eq!(d.learned_address(), 65_535);
    assert_eq!(d.store().slot(47), Some(255));
    assert_eq!(d.store().slot(48), Some(255));
}

#[test]
fn learn_same_address_still_commits() {
    let mut d = decoder();
    hold_mode(&mut d, 0, 1500);

    let events = d.handle_packet(BusPacket::to_address(140), 2000).unwrap();
    assert!(events.contains(&DecoderEvent::AddressLearned(140)));
    assert_eq!(d.learned_address(), 140);
}

#[test]
fn lockout_boundary_is_inclusive() {
    // Lockout is 350ms; a packet exactly at the expiry instant learns.
    let mut d = decoder();
    hold_mode(&mut d, 0, 1500);

    d.handle_packet(BusPacket::to_address(5), 2000).unwrap();
    assert!(d
        .handle_packet(BusPacket::to_address(6), 2349)
        .unwrap()
        .is_empty());
    let events = d.handle_packet(BusPacket::to_address(6), 2350).unwrap();
    assert!(events.contains(&DecoderEvent::AddressLearned(6)));
}

#[test]
fn reentering_programming_mode_clears_lockout() {
    let mut d = decoder();
    hold_mode(&mut d, 0, 1500);
    d.handle_packet(BusPacket::to_address(5), 2000).unwrap();

    // Abort and immediately re-enter while the old lockout would still
    // be pending.
    d.buttons_mut().set(Button::Mode, true);
    d.poll(2050).unwrap();
    d.buttons_mut().set(Button::Mode, false);
    d.poll(2060).unwrap();
    hold_mode(&mut d, 2070, 3100);
    assert_eq!(d.mode(), Mode::AddrProg);

    let events = d.handle_packet(BusPacket::to_address(8), 3150).unwrap();
    assert!(events.contains(&DecoderEvent::AddressLearned(8)));
}

// ============================================================================
// Storage Failures
// ============================================================================

#[test]
fn failed_commit_keeps_old_address() {
    let mut d = decoder();
    hold_mode(&mut d, 0, 1500);

    d.store_mut().fail_writes = true;
    let result = d.handle_packet(BusPacket::to_address(9), 2000);

    assert!(matches!(result, Err(DecoderError::Storage(_))));
    assert_eq!(d.learned_address(), 140);
    assert_eq!(d.mode(), Mode::AddrProg);

    // Media recovers: the next packet learns normally.
    d.store_mut().fail_writes = false;
    d.handle_packet(BusPacket::to_address(9), 2100).unwrap();
    assert_eq!(d.learned_address(), 9);
}

#[test]
fn init_fails_on_unwritable_store() {
    let mut d = AccessoryDecoder::new(
        MockAudio::new(),
        MockConfigStore::new().with_failing_writes(),
        MockOutputs::new(),
        MockButtons::new(),
        MockConsole::new(),
        DecoderConfig::default(),
    );
    assert!(matches!(d.init(), Err(DecoderError::Storage(_))));
}

// ============================================================================
// Animation Timing Edge Cases
// ============================================================================

#[test]
fn animation_expiry_exactly_at_deadline() {
    let mut d = decoder();
    d.handle_packet(BusPacket::to_address(140), 1000).unwrap();

    d.poll(55_999).unwrap();
    assert!(d.animation_active());
    d.poll(56_000).unwrap();
    assert!(!d.animation_active());
}

#[test]
fn animation_stop_reported_once() {
    let mut d = decoder();
    d.handle_packet(BusPacket::to_address(140), 0).unwrap();

    let first = d.poll(55_000).unwrap();
    assert!(first.contains(&DecoderEvent::AnimationStopped));
    let second = d.poll(55_001).unwrap();
    assert!(!second.contains(&DecoderEvent::AnimationStopped));
}

#[test]
fn zero_duration_animation_stops_on_next_poll() {
    let config =
        DecoderConfig::default().with_animation(AnimationConfig::default().with_duration_ms(0));
    let mut d = decoder_with(config);

    d.handle_packet(BusPacket::to_address(140), 100).unwrap();
    assert!(d.animation_active());

    let events = d.poll(100).unwrap();
    assert!(events.contains(&DecoderEvent::AnimationStopped));
    assert!(!d.animation_active());
}

#[test]
fn trigger_during_info_mode_does_nothing() {
    let mut d = decoder();
    hold_mode(&mut d, 0, 500);
    assert_eq!(d.mode(), Mode::Info);

    d.buttons_mut().set(Button::TriggerA, true);
    d.poll(1000).unwrap();

    assert!(!d.animation_active());
    assert!(d.audio().played.is_empty());
}

#[test]
fn animation_survives_mode_change() {
    // Entering information mode does not stop a running animation; the
    // relays stay up until the window elapses.
    let mut d = decoder();
    d.handle_packet(BusPacket::to_address(140), 0).unwrap();

    hold_mode(&mut d, 1000, 1500);
    assert_eq!(d.mode(), Mode::Info);
    assert!(d.animation_active());
    assert!(d.outputs().level(OutputLine::FireplaceRelay));

    d.poll(55_000).unwrap();
    assert!(!d.animation_active());
    assert!(d.outputs().animation_lines_low());
}

// ============================================================================
// Mode Transition Edge Cases
// ============================================================================

#[test]
fn mode_indicator_tracks_programming_mode_only() {
    let mut d = decoder();
    assert!(!d.outputs().level(OutputLine::ModeIndicator));

    hold_mode(&mut d, 0, 1500);
    assert!(d.outputs().level(OutputLine::ModeIndicator));

    d.buttons_mut().set(Button::Mode, true);
    d.poll(2000).unwrap();
    assert!(!d.outputs().level(OutputLine::ModeIndicator));
}

#[test]
fn packet_between_holds_uses_current_address() {
    let mut d = decoder();

    // Learn 25, leave programming mode, verify 140 is stale.
    hold_mode(&mut d, 0, 1500);
    d.handle_packet(BusPacket::to_address(25), 2000).unwrap();
    d.buttons_mut().set(Button::Mode, true);
    d.poll(3000).unwrap();
    d.buttons_mut().set(Button::Mode, false);
    d.poll(3100).unwrap();

    d.handle_packet(BusPacket::to_address(140), 4000).unwrap();
    assert!(!d.animation_active());
    d.handle_packet(BusPacket::to_address(25), 4100).unwrap();
    assert!(d.animation_active());
}

#[test]
fn info_mode_reentry_restarts_screen_sequence() {
    let mut d = decoder();

    // Full pass through information mode.
    hold_mode(&mut d, 0, 500);
    d.poll(600).unwrap();
    for (press, release) in [(1000, 1100), (2000, 2100)] {
        d.buttons_mut().set(Button::Mode, true);
        d.poll(press).unwrap();
        d.buttons_mut().set(Button::Mode, false);
        d.poll(release).unwrap();
    }
    assert_eq!(d.mode(), Mode::Running);

    // Second entry starts at the address screen again.
    let address_lines = |d: &TestDecoder| {
        d.console()
            .lines
            .iter()
            .filter(|line| line.contains("DCC address: 140"))
            .count()
    };
    assert_eq!(address_lines(&d), 1);
    hold_mode(&mut d, 5000, 5500);
    d.poll(5600).unwrap();
    assert_eq!(address_lines(&d), 2);
}
