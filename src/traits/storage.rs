//! Persistent configuration storage (CV-style byte slots).
//!
//! The decoder's only persistent state is its learned bus address, kept in
//! two byte-sized slots addressed by small integer ids. The store is a
//! fixed table: slots are seeded with factory defaults on first boot,
//! updated by address learning, and never deleted.

/// Key/value store of byte-sized configuration slots.
///
/// Writes are fallible: unlike the original firmware, which assumed every
/// CV write succeeded, implementations surface media errors so the decoder
/// can report a failed learn instead of silently keeping a stale address.
pub trait ConfigStore {
    /// Error type for storage operations.
    type Error;

    /// Read the value of slot `id`.
    ///
    /// A slot that was never written reads as its seeded factory default.
    fn read_slot(&self, id: u8) -> Result<u8, Self::Error>;

    /// Write `value` to slot `id`, persisting it across power cycles.
    fn write_slot(&mut self, id: u8, value: u8) -> Result<(), Self::Error>;

    /// Seed slot `id` with a factory default.
    ///
    /// Writes `value` only if the slot has never been written; a slot that
    /// already holds a learned value is left untouched.
    fn seed_slot(&mut self, id: u8, value: u8) -> Result<(), Self::Error>;
}
