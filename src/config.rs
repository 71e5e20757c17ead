//! Decoder configuration.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`. Defaults reproduce the
//! reference hardware configuration (55 second animation window, 1 second
//! mode-hold threshold, address CVs 47/48 seeded to 140).
//!
//! # Example
//!
//! ```rust
//! use rs_accessory::config::{AnimationConfig, DecoderConfig};
//!
//! // Use defaults
//! let config = DecoderConfig::default();
//!
//! // Or customize
//! let config = DecoderConfig::default()
//!     .with_animation(AnimationConfig::default().with_duration_ms(10_000));
//! ```

use crate::traits::MAX_VOLUME;
use heapless::String as HString;

/// Maximum length for short config strings (device name, firmware version)
pub const MAX_SHORT_STRING: usize = 32;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, _)| *i < take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete decoder configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderConfig {
    /// Device identification
    pub device: DeviceConfig,
    /// Mode-button hold classification
    pub button: ButtonConfig,
    /// Animation window and audio clip settings
    pub animation: AnimationConfig,
    /// Learned-address storage and learning behavior
    pub address: AddressConfig,
}

impl DecoderConfig {
    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Set button configuration
    pub fn with_button(mut self, button: ButtonConfig) -> Self {
        self.button = button;
        self
    }

    /// Set animation configuration
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Set address configuration
    pub fn with_address(mut self, address: AddressConfig) -> Self {
        self.address = address;
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable device name, printed in the startup banner
    pub name: ShortString,
    /// Firmware version string, shown by information mode
    pub firmware: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("rs-accessory"),
            firmware: short_string(env!("CARGO_PKG_VERSION")),
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Set the firmware version string
    pub fn with_firmware(mut self, firmware: &str) -> Self {
        self.firmware = short_string(firmware);
        self
    }
}

// ============================================================================
// Button Config
// ============================================================================

/// Mode-button hold classification configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonConfig {
    /// Hold threshold in milliseconds: releases shorter than this select
    /// information mode, the threshold and above select address
    /// programming mode
    pub hold_threshold_ms: u64,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            hold_threshold_ms: 1000,
        }
    }
}

impl ButtonConfig {
    /// Set the hold threshold
    pub fn with_hold_threshold_ms(mut self, ms: u64) -> Self {
        self.hold_threshold_ms = ms;
        self
    }
}

// ============================================================================
// Animation Config
// ============================================================================

/// Animation window and audio clip configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationConfig {
    /// Total animation duration in milliseconds
    pub duration_ms: u64,
    /// Playback volume during the animation (0-30)
    ///
    /// The reference hardware browns out above ~20 (amplifier draw), so
    /// the default stays below the module maximum.
    pub volume: u8,
    /// Quiescent volume applied at startup (0-30)
    pub idle_volume: u8,
    /// Media folder holding the animation clip
    pub folder: u8,
    /// Track index of the animation clip inside the folder
    pub track: u8,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 55_000,
            volume: 20,
            idle_volume: 15,
            folder: 1,
            track: 1,
        }
    }
}

impl AnimationConfig {
    /// Set the animation duration
    pub fn with_duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    /// Set the animation volume (clamped to 0-30)
    pub fn with_volume(mut self, volume: u8) -> Self {
        self.volume = volume.min(MAX_VOLUME);
        self
    }

    /// Set the idle volume (clamped to 0-30)
    pub fn with_idle_volume(mut self, volume: u8) -> Self {
        self.idle_volume = volume.min(MAX_VOLUME);
        self
    }

    /// Set the clip location on the media
    pub fn with_clip(mut self, folder: u8, track: u8) -> Self {
        self.folder = folder;
        self.track = track;
        self
    }
}

// ============================================================================
// Address Config
// ============================================================================

/// Learned-address storage and learning configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddressConfig {
    /// Config slot id holding the address low byte
    pub slot_lsb: u8,
    /// Config slot id holding the address high byte
    pub slot_msb: u8,
    /// Factory-default address seeded on first boot
    pub factory_address: u16,
    /// Lockout after a learn, in milliseconds, suppressing re-learns from
    /// the packet burst of a single layout command
    pub learn_lockout_ms: u64,
}

impl Default for AddressConfig {
    fn default() -> Self {
        Self {
            slot_lsb: crate::address::SLOT_ADDRESS_LSB,
            slot_msb: crate::address::SLOT_ADDRESS_MSB,
            factory_address: crate::address::FACTORY_ADDRESS,
            learn_lockout_ms: 350,
        }
    }
}

impl AddressConfig {
    /// Set the slot ids for the address bytes
    pub fn with_slots(mut self, lsb: u8, msb: u8) -> Self {
        self.slot_lsb = lsb;
        self.slot_msb = msb;
        self
    }

    /// Set the factory-default address
    pub fn with_factory_address(mut self, address: u16) -> Self {
        self.factory_address = address;
        self
    }

    /// Set the learn lockout duration
    pub fn with_learn_lockout_ms(mut self, ms: u64) -> Self {
        self.learn_lockout_ms = ms;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = DecoderConfig::default();
        assert_eq!(config.button.hold_threshold_ms, 1000);
        assert_eq!(config.animation.duration_ms, 55_000);
        assert_eq!(config.animation.volume, 20);
        assert_eq!(config.address.slot_lsb, 47);
        assert_eq!(config.address.slot_msb, 48);
        assert_eq!(config.address.factory_address, 140);
        assert_eq!(config.address.learn_lockout_ms, 350);
    }

    #[test]
    fn builder_pattern() {
        let config = DecoderConfig::default()
            .with_device(DeviceConfig::default().with_name("DA02").with_firmware("1.0"))
            .with_button(ButtonConfig::default().with_hold_threshold_ms(1500))
            .with_animation(
                AnimationConfig::default()
                    .with_duration_ms(10_000)
                    .with_clip(2, 3),
            )
            .with_address(AddressConfig::default().with_factory_address(9));

        assert_eq!(config.device.name.as_str(), "DA02");
        assert_eq!(config.device.firmware.as_str(), "1.0");
        assert_eq!(config.button.hold_threshold_ms, 1500);
        assert_eq!(config.animation.duration_ms, 10_000);
        assert_eq!(config.animation.folder, 2);
        assert_eq!(config.animation.track, 3);
        assert_eq!(config.address.factory_address, 9);
    }

    #[test]
    fn volume_clamped_to_module_range() {
        let animation = AnimationConfig::default().with_volume(99).with_idle_volume(45);
        assert_eq!(animation.volume, 30);
        assert_eq!(animation.idle_volume, 30);
    }

    #[test]
    fn address_slots_builder() {
        let address = AddressConfig::default().with_slots(112, 113);
        assert_eq!(address.slot_lsb, 112);
        assert_eq!(address.slot_msb, 113);
    }

    #[test]
    fn short_string_truncation() {
        let long_input = "a".repeat(100);
        let s = short_string(&long_input);
        assert!(s.len() <= MAX_SHORT_STRING);
    }

    #[test]
    fn short_string_utf8_boundary() {
        let input = "🚂🚃🚄🚅🚂🚃🚄🚅🚂🚃"; // 4 bytes each
        let s = short_string(input);
        assert!(s.len() <= MAX_SHORT_STRING);
        assert!(core::str::from_utf8(s.as_bytes()).is_ok());
    }
}
