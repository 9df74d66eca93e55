//! humigate - BLE environmental-sensor gateway core.
//!
//! Discovers nearby Sensirion humidity gadgets, maintains a live
//! reading per gadget in a fixed-capacity registry, and renders the
//! registry for local (HTTP) and remote (InfluxDB) consumers.
//!
//! The crate owns the gateway's state machine and data contracts; the
//! actual transports are collaborators wired up by the firmware:
//!
//! - the radio stack feeds [`ble::CentralEvent`]s into
//!   [`ble::central::SensorCentral::handle_event`] and services the
//!   [`ble::RadioLink`] calls the controller issues back;
//! - the web server serves bodies produced by [`web`];
//! - the publisher ships the line protocol produced by [`publish`].
//!
//! Everything here is `no_std` and allocation-free, so the whole
//! pipeline is testable on the host: `cargo test`.

#![cfg_attr(not(test), no_std)]

pub mod ble;
pub mod config;
pub mod error;
pub mod publish;
pub mod rooms;
pub mod web;

pub use ble::central::{ScanPhase, SensorCentral};
pub use ble::registry::{GadgetRecord, GadgetRegistry};
pub use ble::{CentralEvent, RadioLink, SensorKind};
pub use error::{Error, TransportError};
