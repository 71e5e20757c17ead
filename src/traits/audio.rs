//! Audio playback abstraction for the animation's sound half.
//!
//! Models the command surface of file-based serial MP3 modules
//! (DFPlayer Mini / MP3-TF-16P class hardware): tracks are addressed by
//! a folder number and a track index on removable media, and the module
//! reports transient conditions (card events, timeouts) asynchronously.
//!
//! The decoder treats playback as fire-and-forget: it never waits for a
//! track to finish, the animation window is governed by its own timer.

/// Maximum accepted volume level, inclusive.
///
/// Matches the 0-30 range of DFPlayer-class modules. [`AudioPlayer`]
/// implementations must clamp to this.
pub const MAX_VOLUME: u8 = 30;

/// Transient notices reported by the audio module.
///
/// Purely informational: notices are logged to the diagnostic console and
/// never alter decoder state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AudioNotice {
    /// The storage card was inserted.
    CardInserted,
    /// The storage card was removed.
    CardRemoved,
    /// The storage card finished mounting and is ready.
    CardOnline,
    /// A command to the module timed out.
    TimedOut,
    /// The module returned a malformed response frame.
    WrongFrame,
    /// The module is busy (no card found).
    Busy,
    /// The requested file does not exist on the card.
    FileMissing,
}

impl AudioNotice {
    /// Human-readable description for the diagnostic console.
    pub const fn describe(&self) -> &'static str {
        match self {
            AudioNotice::CardInserted => "card inserted",
            AudioNotice::CardRemoved => "card removed",
            AudioNotice::CardOnline => "card online",
            AudioNotice::TimedOut => "command timed out",
            AudioNotice::WrongFrame => "malformed response frame",
            AudioNotice::Busy => "busy, card not found",
            AudioNotice::FileMissing => "cannot find file",
        }
    }
}

/// Audio playback module trait.
///
/// Implement this for the serial MP3 driver on real hardware. Only
/// [`begin`](Self::begin) is expected to fail in practice (module not
/// responding, media missing); that failure is fatal to decoder startup.
/// The playback commands return `Result` so drivers can surface serial
/// write failures, but the decoder treats them as best-effort.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use rs_accessory::traits::{AudioPlayer, AudioNotice};
///
/// struct SerialMp3 { /* uart handle */ }
///
/// impl AudioPlayer for SerialMp3 {
///     type Error = UartError;
///
///     fn begin(&mut self) -> Result<(), UartError> {
///         // Handshake with the module; fail if no response or no card.
///         Ok(())
///     }
///     // ...
/// }
/// ```
pub trait AudioPlayer {
    /// Error type for audio operations.
    type Error;

    /// Initialize the module.
    ///
    /// Called once at decoder startup. An error here is fatal: the decoder
    /// cannot run its animation without audio, so `init` propagates it and
    /// the embedding binary decides how to halt.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Apply post-init module settings (command timeout, DAC, idle volume).
    ///
    /// `idle_volume` is the quiescent level used outside animations.
    fn configure(&mut self, idle_volume: u8) -> Result<(), Self::Error>;

    /// Stop any current playback.
    fn stop(&mut self) -> Result<(), Self::Error>;

    /// Set the output volume (clamped to 0..=[`MAX_VOLUME`]).
    fn set_volume(&mut self, volume: u8) -> Result<(), Self::Error>;

    /// Disable track looping.
    fn disable_loop(&mut self) -> Result<(), Self::Error>;

    /// Start playback of `track` inside `folder` on the media.
    fn play_track(&mut self, folder: u8, track: u8) -> Result<(), Self::Error>;

    /// Drain one pending transient notice, if any.
    ///
    /// Called once per poll; return `None` when the module has nothing
    /// queued.
    fn poll_notice(&mut self) -> Option<AudioNotice>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_descriptions_are_distinct() {
        let notices = [
            AudioNotice::CardInserted,
            AudioNotice::CardRemoved,
            AudioNotice::CardOnline,
            AudioNotice::TimedOut,
            AudioNotice::WrongFrame,
            AudioNotice::Busy,
            AudioNotice::FileMissing,
        ];

        for (i, a) in notices.iter().enumerate() {
            for b in notices.iter().skip(i + 1) {
                assert_ne!(a.describe(), b.describe());
            }
        }
    }

    #[test]
    fn notice_copy_and_eq() {
        let notice = AudioNotice::Busy;
        let copied = notice;
        assert_eq!(notice, copied);
        assert_ne!(AudioNotice::CardInserted, AudioNotice::CardRemoved);
    }
}
