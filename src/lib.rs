//! # rs-accessory
//!
//! A DCC accessory decoder core for animated scenery, with button-driven
//! mode switching, address learning, and a timed audio/lighting animation.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for buttons, output lines, audio
//!   playback, bus packets, and config storage
//! - **Three operating modes**: running, information, and address
//!   programming, selected by how long the mode button is held
//! - **Address learning**: the next bus packet received in programming
//!   mode becomes the decoder's address, persisted across power cycles
//! - **Timed animation**: a 55-second audio/lighting sequence started by a
//!   matching bus packet or the local trigger button
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware, audio, bus, and storage abstractions
//! - `button` - Hold timing and short/long press classification
//! - `animation` - Deadline-based animation window
//! - `status` - Information-mode screen sequencing
//! - `address` - Config-slot layout for the learned address
//! - `decoder` - Main decoder that ties everything together
//! - `hal` - Concrete implementations (mock for testing, pin adapters for
//!   hardware)
//!
//! ## Example
//!
//! ```rust
//! use rs_accessory::{
//!     AccessoryDecoder, DecoderConfig,
//!     hal::{MockAudio, MockButtons, MockConfigStore, MockConsole, MockOutputs},
//!     traits::BusPacket,
//! };
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
//! assert_eq!(decoder.learned_address(), 140);
//!
//! // A packet for our address starts the animation.
//! decoder.handle_packet(BusPacket::to_address(140), 0).unwrap();
//! assert!(decoder.animation_active());
//!
//! // Poll in your main loop; the animation ends on its own.
//! decoder.poll(60_000).unwrap();
//! assert!(!decoder.animation_active());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Config-slot layout and helpers for the learned bus address.
pub mod address;
/// Deadline-based timer for the animation window.
pub mod animation;
/// Mode-button hold timing and press classification.
pub mod button;
/// Shared configuration system for desktop and embedded targets.
pub mod config;
/// Main accessory decoder that coordinates buttons, packets, audio, and outputs.
pub mod decoder;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Information-mode screen sequencing.
pub mod status;
/// Core traits for hardware, audio, bus, and storage abstraction.
pub mod traits;

// Re-exports for convenience
pub use address::{FACTORY_ADDRESS, SLOT_ADDRESS_LSB, SLOT_ADDRESS_MSB};
pub use animation::AnimationTimer;
pub use button::{HoldClass, PressTimer, Release};
pub use decoder::{
    AccessoryDecoder, DecoderError, DecoderEvent, DecoderEvents, DecoderState, Mode,
};
pub use status::{InfoScreen, InfoScreens, InfoStep};
pub use traits::{
    AudioNotice,
    AudioPlayer,
    BusPacket,
    BusReceiver,
    Button,
    ButtonBank,
    Clock,
    ConfigStore,
    Console,
    OutputBank,
    OutputLine,
};

// Config re-exports
pub use config::{
    AddressConfig, AnimationConfig, ButtonConfig, DecoderConfig, DeviceConfig, ShortString,
};
