//! Desktop simulation of the accessory decoder.
//!
//! Runs the full decoder against mock hardware and a scripted session:
//! boot, fire the animation from the bus, walk the information screens,
//! re-learn the address, and fire again on the new address. Console
//! output mirrors what the real decoder prints on its serial port.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example desktop_sim
//! ```
//!
//! Edit the `DecoderConfig::default()` call in `main()` to customize
//! settings; the animation window is shortened here so the script runs
//! in simulated seconds, not minutes.

use anyhow::{bail, Result};
use rs_accessory::hal::{
    MockAudio, MockBus, MockButtons, MockClock, MockConfigStore, MockConsole, MockOutputs,
};
use rs_accessory::traits::{BusReceiver, Clock};
use rs_accessory::{
    AccessoryDecoder, AnimationConfig, BusPacket, Button, DecoderConfig, DecoderEvent, Mode,
};

type SimDecoder =
    AccessoryDecoder<MockAudio, MockConfigStore, MockOutputs, MockButtons, MockConsole>;

fn main() -> Result<()> {
    println!("=================================");
    println!("  rs-accessory Desktop Sim");
    println!("=================================");
    println!();

    // Central configuration - modify this for your setup
    let config = DecoderConfig::default()
        .with_animation(AnimationConfig::default().with_duration_ms(5_000));

    let mut decoder = AccessoryDecoder::new(
        MockAudio::new(),
        MockConfigStore::new(),
        MockOutputs::new(),
        MockButtons::new(),
        MockConsole::new(),
        config,
    );
    let mut clock = MockClock::new();
    let mut bus = MockBus::new();

    decoder.init()?;
    drain_console(&mut decoder);

    // A layout command for the factory address fires the animation.
    println!("[sim] command for address 140 arrives on the bus");
    bus.queue_packet(BusPacket::to_address(140));
    pump(&mut decoder, &mut bus, &mut clock)?;
    run_for(&mut decoder, &mut bus, &mut clock, 6_000)?;

    // Short mode-button hold: walk the information screens.
    println!("[sim] short hold on the mode button");
    press_mode(&mut decoder, &mut clock, 300)?;
    run_for(&mut decoder, &mut bus, &mut clock, 200)?;
    println!("[sim] stepping through the screens");
    press_mode(&mut decoder, &mut clock, 100)?;
    press_mode(&mut decoder, &mut clock, 100)?;
    if decoder.mode() != Mode::Running {
        bail!("expected running mode after the screens");
    }

    // Long hold, then learn a new address from the next packet.
    println!("[sim] long hold on the mode button");
    press_mode(&mut decoder, &mut clock, 1_500)?;
    println!("[sim] command for address 302 arrives on the bus");
    bus.queue_packet(BusPacket::to_address(302));
    pump(&mut decoder, &mut bus, &mut clock)?;
    press_mode(&mut decoder, &mut clock, 100)?; // abort back to running

    // The old address is stale, the new one fires.
    println!("[sim] commands for 140 and 302 arrive on the bus");
    bus.queue_packet(BusPacket::to_address(140));
    bus.queue_packet(BusPacket::to_address(302));
    pump(&mut decoder, &mut bus, &mut clock)?;
    run_for(&mut decoder, &mut bus, &mut clock, 6_000)?;

    let state = decoder.state();
    println!();
    println!("[sim] final state: mode={:?} address={}", state.mode, state.address);
    println!(
        "[sim] clips played: {:?}, slot 47/48 = {:?}/{:?}",
        decoder.audio().played,
        decoder.store().slot(47),
        decoder.store().slot(48),
    );
    Ok(())
}

/// One decoder iteration: forward pending packets, then poll.
fn pump(decoder: &mut SimDecoder, bus: &mut MockBus, clock: &mut MockClock) -> Result<()> {
    let now = clock.now_ms();
    while let Some(packet) = bus.poll_packet() {
        report(decoder.handle_packet(packet, now)?);
    }
    report(decoder.poll(now)?);
    drain_console(decoder);
    Ok(())
}

/// Advance simulated time in 100ms ticks.
fn run_for(
    decoder: &mut SimDecoder,
    bus: &mut MockBus,
    clock: &mut MockClock,
    ms: u64,
) -> Result<()> {
    for _ in 0..ms / 100 {
        clock.advance(100);
        pump(decoder, bus, clock)?;
    }
    Ok(())
}

/// Press the mode button, hold it for `hold_ms`, release it.
fn press_mode(decoder: &mut SimDecoder, clock: &mut MockClock, hold_ms: u64) -> Result<()> {
    decoder.buttons_mut().set(Button::Mode, true);
    report(decoder.poll(clock.now_ms())?);
    clock.advance(hold_ms);
    decoder.buttons_mut().set(Button::Mode, false);
    report(decoder.poll(clock.now_ms())?);
    drain_console(decoder);
    Ok(())
}

fn report(events: rs_accessory::DecoderEvents) {
    for event in events {
        match event {
            DecoderEvent::ModeChanged(mode) => println!("[event] mode -> {}", mode.as_str()),
            DecoderEvent::AddressLearned(address) => {
                println!("[event] address learned: {address}")
            }
            DecoderEvent::AnimationStarted => println!("[event] animation started"),
            DecoderEvent::AnimationStopped => println!("[event] animation stopped"),
            DecoderEvent::AudioNotice(notice) => {
                println!("[event] audio notice: {}", notice.describe())
            }
        }
    }
}

/// Echo and clear the decoder's serial lines.
fn drain_console(decoder: &mut SimDecoder) {
    // MockConsole collects lines; print the new ones and reset.
    let lines = core::mem::take(&mut decoder.console_mut().lines);
    for line in lines {
        println!("[serial] {line}");
    }
}
