//! Bluetooth Low Energy subsystem.
//!
//! This module drives the gateway's Central role against an abstract
//! radio transport:
//!
//! 1. **Registry** - fixed-capacity table of known gadgets keyed by
//!    hardware address.
//! 2. **Central controller** - consumes discovery / connection /
//!    notification events, negotiates attribute subscriptions and
//!    mutates the registry.
//! 3. **Decoder** - interprets fixed-width little-endian payloads into
//!    typed sensor values.
//!
//! The transport itself (scan control, GATT calls) sits behind the
//! [`RadioLink`] trait so the whole subsystem runs on the host in tests.

pub mod central;
pub mod decode;
pub mod registry;

use crate::config;

/// The attribute groups a gadget may expose.
///
/// Each kind maps to one (service, characteristic) UUID pair and one
/// field of the registry record; a notification for one kind never
/// writes any other field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorKind {
    Humidity,
    Temperature,
    Co2,
    Battery,
}

impl SensorKind {
    /// Kinds that get a notification subscription on connect, in setup
    /// order. Battery additionally gets a one-shot read first.
    pub const ALL: [SensorKind; 4] = [
        SensorKind::Humidity,
        SensorKind::Temperature,
        SensorKind::Co2,
        SensorKind::Battery,
    ];

    /// GATT service UUID hosting this attribute.
    pub const fn service_uuid(self) -> &'static str {
        match self {
            SensorKind::Humidity => config::HUMIDITY_SERVICE_UUID,
            SensorKind::Temperature => config::TEMPERATURE_SERVICE_UUID,
            SensorKind::Co2 => config::CO2_SERVICE_UUID,
            SensorKind::Battery => config::BATTERY_SERVICE_UUID,
        }
    }

    /// GATT characteristic UUID carrying the value.
    pub const fn characteristic_uuid(self) -> &'static str {
        match self {
            SensorKind::Humidity => config::HUMIDITY_CHARACTERISTIC_UUID,
            SensorKind::Temperature => config::TEMPERATURE_CHARACTERISTIC_UUID,
            SensorKind::Co2 => config::CO2_CHARACTERISTIC_UUID,
            SensorKind::Battery => config::BATTERY_LEVEL_CHARACTERISTIC_UUID,
        }
    }

    /// Minimum notification payload length for this attribute.
    pub const fn min_payload_len(self) -> usize {
        match self {
            SensorKind::Humidity | SensorKind::Temperature => 4,
            SensorKind::Co2 => 2,
            SensorKind::Battery => 1,
        }
    }

    /// Human-readable tag for log lines.
    pub const fn label(self) -> &'static str {
        match self {
            SensorKind::Humidity => "humidity",
            SensorKind::Temperature => "temperature",
            SensorKind::Co2 => "CO2",
            SensorKind::Battery => "battery",
        }
    }
}

/// The closed set of events the radio transport delivers to the
/// controller.
///
/// The transport guarantees per-device ordering: at most one
/// `Discovered`, then at most one `Connected`, then exactly one
/// `Disconnected` if the device was ever connected.
#[derive(Debug, Clone, Copy)]
pub enum CentralEvent<'a> {
    /// An advertisement was received while scanning.
    Discovered { name: &'a str, address: &'a str },
    /// A previously requested connection is established.
    Connected { address: &'a str },
    /// A connected gadget dropped the link (or we tore it down).
    Disconnected { address: &'a str },
    /// A subscribed characteristic pushed a fresh value.
    Notified {
        address: &'a str,
        kind: SensorKind,
        payload: &'a [u8],
    },
}

/// Operations the controller issues against the radio transport.
///
/// Every fallible call reports failure as `false` / `None`, distinct
/// from a successful empty result. Implementations may block until the
/// transport's own success/failure callback fires; the core adds no
/// timeout layer of its own.
pub trait RadioLink {
    /// Suspend discovery scanning (single connection attempt in flight
    /// at a time).
    fn stop_scan(&mut self);

    /// Resume discovery scanning.
    fn scan(&mut self);

    /// Request a connection to the given peripheral.
    fn connect(&mut self, address: &str) -> bool;

    /// Tear down the link to the given peripheral.
    fn disconnect(&mut self, address: &str);

    /// Run GATT attribute discovery on an established link.
    fn discover_attributes(&mut self, address: &str) -> bool;

    /// Whether the peripheral exposes this attribute and it supports
    /// notifications.
    fn can_subscribe(&mut self, address: &str, kind: SensorKind) -> bool;

    /// Enable notifications for this attribute.
    fn subscribe(&mut self, address: &str, kind: SensorKind) -> bool;

    /// Whether the attribute is present and readable.
    fn can_read(&mut self, address: &str, kind: SensorKind) -> bool;

    /// Synchronous one-shot read of the attribute value into `buf`.
    /// Returns the number of bytes read, or `None` on failure.
    fn read(&mut self, address: &str, kind: SensorKind, buf: &mut [u8]) -> Option<usize>;

    /// Last known signal strength of the link (dBm).
    fn rssi(&mut self, address: &str) -> i8;
}
