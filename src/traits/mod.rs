//! Trait definitions for the decoder's external collaborators.
//!
//! This module defines the seams that let rs-accessory run on different
//! hardware (AVR-class boards via `embedded-hal`, desktop mocks) without
//! touching the decoder logic.
//!
//! # Submodules
//!
//! - `hardware`: button inputs, indicator/relay outputs, clock
//! - `audio`: audio playback module (DFPlayer-class serial MP3 boards)
//! - `bus`: decoded command-bus packets
//! - `storage`: persistent configuration slots (CVs)
//! - `console`: line-oriented diagnostic output
//!
//! # Hardware Abstraction
//!
//! The key traits are:
//!
//! - [`ButtonBank`]: raw button level reads
//! - [`OutputBank`]: indicator LEDs and effect relays
//! - [`AudioPlayer`]: the animation's audio half
//! - [`ConfigStore`]: byte-sized persistent configuration slots
//! - [`Clock`]: time source for `no_std` environments

pub mod audio;
pub mod bus;
pub mod console;
pub mod hardware;
pub mod storage;

pub use audio::*;
pub use bus::*;
pub use console::*;
pub use hardware::*;
pub use storage::*;
