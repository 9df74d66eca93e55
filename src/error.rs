//! Unified error type for humigate.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Nothing here is fatal: every variant is logged by the dispatch layer
//! and the controller returns to scanning with the registry intact.

use crate::ble::SensorKind;
use core::fmt;

/// Top-level error type used across the gateway core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A radio transport call reported failure.
    Transport(TransportError),

    /// GATT attribute discovery failed post-connect; the link is torn
    /// down and the device treated as never connected.
    DiscoveryFailed,

    /// All registry slots are occupied; the new gadget stays unmanaged
    /// until a disconnect frees a slot.
    RegistryFull,

    /// Notification payload shorter than the attribute's minimum length.
    /// The previous reading is retained.
    PayloadTooShort { kind: SensorKind, len: usize },

    /// Event referenced an address with no registry record (benign race
    /// with a just-processed disconnect).
    UnknownAddress,
}

/// Subset of transport failures we propagate (keeps the enum `Copy`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Connection request was refused or dropped.
    ConnectFailed,
    /// Characteristic subscribe failed.
    SubscribeFailed,
    /// One-shot characteristic read failed.
    ReadFailed,
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "transport failure: {}", e),
            Error::DiscoveryFailed => write!(f, "attribute discovery failed"),
            Error::RegistryFull => write!(f, "no free registry slot for new peripheral"),
            Error::PayloadTooShort { kind, len } => {
                write!(
                    f,
                    "payload for {} too short ({} of {} bytes)",
                    kind.label(),
                    len,
                    kind.min_payload_len()
                )
            }
            Error::UnknownAddress => write!(f, "address not registered"),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportError::ConnectFailed => "connect failed",
            TransportError::SubscribeFailed => "subscribe failed",
            TransportError::ReadFailed => "read failed",
        };
        f.write_str(s)
    }
}
