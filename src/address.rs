//! Learned-address persistence helpers.
//!
//! The decoder's bus address is mirrored into two byte-sized configuration
//! slots, split by the fixed convention `address = msb * 256 + lsb`. The
//! slot ids sit in the manufacturer-reserved CV range (47-64).

use crate::traits::ConfigStore;

/// Default slot id holding the low byte of the learned address.
pub const SLOT_ADDRESS_LSB: u8 = 47;

/// Default slot id holding the high byte of the learned address.
pub const SLOT_ADDRESS_MSB: u8 = 48;

/// Factory-default learned address, seeded on first boot.
pub const FACTORY_ADDRESS: u16 = 140;

/// Split an address into its `(lsb, msb)` slot values.
#[inline]
pub const fn split(address: u16) -> (u8, u8) {
    ((address & 0xFF) as u8, (address >> 8) as u8)
}

/// Combine `(lsb, msb)` slot values back into an address.
#[inline]
pub const fn combine(lsb: u8, msb: u8) -> u16 {
    (msb as u16) * 256 + lsb as u16
}

/// Read the learned address out of its two slots.
pub fn load<S: ConfigStore>(store: &S, slot_lsb: u8, slot_msb: u8) -> Result<u16, S::Error> {
    let lsb = store.read_slot(slot_lsb)?;
    let msb = store.read_slot(slot_msb)?;
    Ok(combine(lsb, msb))
}

/// Write an address into its two slots.
pub fn commit<S: ConfigStore>(
    store: &mut S,
    slot_lsb: u8,
    slot_msb: u8,
    address: u16,
) -> Result<(), S::Error> {
    let (lsb, msb) = split(address);
    store.write_slot(slot_lsb, lsb)?;
    store.write_slot(slot_msb, msb)
}

/// Seed the factory-default address into slots that were never written.
pub fn seed_factory<S: ConfigStore>(
    store: &mut S,
    slot_lsb: u8,
    slot_msb: u8,
    address: u16,
) -> Result<(), S::Error> {
    let (lsb, msb) = split(address);
    store.seed_slot(slot_lsb, lsb)?;
    store.seed_slot(slot_msb, msb)
}
