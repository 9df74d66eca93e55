//! Static address-to-room lookup.
//!
//! The deployment is small and fixed, so a compile-time table scanned
//! linearly is sufficient; there is no general map and no mutation.

/// One known gadget placement.
pub struct RoomEntry {
    pub address: &'static str,
    pub room: &'static str,
}

/// Where each known gadget lives.
pub const ROOM_MAP: &[RoomEntry] = &[
    RoomEntry {
        address: "f9:3f:1d:46:f4:0c",
        room: "Kitchen",
    },
    RoomEntry {
        address: "f8:ce:3f:2b:5e:55",
        room: "Living Room",
    },
    RoomEntry {
        address: "eb:d9:7e:a1:e1:08",
        room: "Computer Desk",
    },
];

/// Room label for an address, or `"Unknown Room"` if it is not mapped.
pub fn room_for_address(address: &str) -> &'static str {
    ROOM_MAP
        .iter()
        .find(|e| e.address == address)
        .map(|e| e.room)
        .unwrap_or("Unknown Room")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_addresses_resolve() {
        assert_eq!(room_for_address("f9:3f:1d:46:f4:0c"), "Kitchen");
        assert_eq!(room_for_address("eb:d9:7e:a1:e1:08"), "Computer Desk");
    }

    #[test]
    fn unmapped_address_falls_back() {
        assert_eq!(room_for_address("00:00:00:00:00:00"), "Unknown Room");
        assert_eq!(room_for_address(""), "Unknown Room");
    }
}
