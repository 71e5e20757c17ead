//! Decoded command-bus packets and their delivery seam.
//!
//! Frame-level bus decoding (DCC electrical timing, preamble, checksums)
//! is an external concern. This module only models the already-decoded
//! accessory packet the bus layer hands to the decoder: an address, a
//! binary direction, and an output-power flag.

/// A decoded accessory packet from the layout-control bus.
///
/// The decoder matches on `address` only; `direction` and `output_power`
/// are carried through for completeness but any packet to the matching
/// address fires the single animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusPacket {
    /// The addressed accessory.
    pub address: u16,
    /// Requested state (thrown/closed for turnouts; unused here).
    pub direction: u8,
    /// Output activation flag (unused here).
    pub output_power: u8,
}

impl BusPacket {
    /// Convenience constructor for a packet to `address` with zeroed
    /// direction and power fields.
    pub const fn to_address(address: u16) -> Self {
        Self {
            address,
            direction: 0,
            output_power: 0,
        }
    }
}

/// Packet delivery seam between the bus layer and the decoder.
///
/// The embedding loop polls this each iteration and forwards any packet
/// into [`AccessoryDecoder::handle_packet`]. Delivery is synchronous and
/// single-threaded; the bus layer may buffer internally but no delivery
/// guarantee exists while the loop is busy.
///
/// [`AccessoryDecoder::handle_packet`]: crate::AccessoryDecoder::handle_packet
pub trait BusReceiver {
    /// Returns the next decoded packet, if one is pending.
    fn poll_packet(&mut self) -> Option<BusPacket>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_address_zeroes_flags() {
        let packet = BusPacket::to_address(140);
        assert_eq!(packet.address, 140);
        assert_eq!(packet.direction, 0);
        assert_eq!(packet.output_power, 0);
    }

    #[test]
    fn packet_equality_covers_all_fields() {
        let a = BusPacket {
            address: 7,
            direction: 1,
            output_power: 1,
        };
        let b = BusPacket {
            address: 7,
            direction: 0,
            output_power: 1,
        };
        assert_ne!(a, b);
        assert_eq!(a, a);
    }
}
