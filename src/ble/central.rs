//! Connection lifecycle controller.
//!
//! Owns the gadget registry and drives it from the radio event stream:
//!
//! 1. **Discovery** - advertisements are filtered by product name; a
//!    match suspends scanning and requests a connection (one handshake
//!    in flight at a time, so attribute-discovery sessions never
//!    overlap).
//! 2. **Connect** - the gadget is resolved to a registry slot (existing
//!    record on reconnect, first free slot otherwise), attributes are
//!    discovered and each present group is subscribed; battery gets an
//!    immediate one-shot read first. Scanning then resumes.
//! 3. **Notifications** - decoded and written into the one matching
//!    record field.
//! 4. **Disconnect** - the slot is reset to all-defaults, so a
//!    reconnect always starts from a blank reading set.
//!
//! Every failure path logs and falls back to scanning; the retry
//! mechanism is simply that the gadget keeps advertising.

use crate::ble::decode;
use crate::ble::registry::GadgetRegistry;
use crate::ble::{CentralEvent, RadioLink, SensorKind};
use crate::config::{self, ADDRESS_CAPACITY, NAME_CAPACITY};
use crate::error::{Error, TransportError};
use heapless::String;
use log::{debug, info, warn};

/// What the radio is currently doing on our behalf.
///
/// `Connecting` doubles as the re-entrancy guard: further matching
/// advertisements are ignored until the handshake resolves.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanPhase {
    /// Passively scanning for the next gadget.
    Scanning,
    /// Scan suspended; one connection handshake in flight. Carries the
    /// advertised name so the connect handler can record it.
    Connecting {
        address: String<ADDRESS_CAPACITY>,
        name: String<NAME_CAPACITY>,
    },
}

/// The Central-role controller: registry owner plus event dispatch.
///
/// External consumers (HTTP handler, periodic publisher) read the
/// registry through [`SensorCentral::registry`]; only the controller
/// mutates it.
pub struct SensorCentral {
    registry: GadgetRegistry,
    phase: ScanPhase,
}

impl SensorCentral {
    pub const fn new() -> Self {
        Self {
            registry: GadgetRegistry::new(),
            phase: ScanPhase::Scanning,
        }
    }

    /// Read-only view of the gadget table.
    pub fn registry(&self) -> &GadgetRegistry {
        &self.registry
    }

    pub fn phase(&self) -> &ScanPhase {
        &self.phase
    }

    /// Dispatch one radio event. Runs to completion before the caller
    /// polls the next event; there is no concurrent registry mutation.
    pub fn handle_event<R: RadioLink>(&mut self, event: CentralEvent<'_>, radio: &mut R) {
        match event {
            CentralEvent::Discovered { name, address } => {
                self.on_discovered(name, address, radio);
            }
            CentralEvent::Connected { address } => {
                if let Err(e) = self.on_connected(address, radio) {
                    warn!("setup for {} aborted: {}", address, e);
                }
            }
            CentralEvent::Disconnected { address } => self.on_disconnected(address),
            CentralEvent::Notified {
                address,
                kind,
                payload,
            } => match self.on_notified(address, kind, payload) {
                Ok(()) => {}
                // Benign race with a just-processed disconnect.
                Err(Error::UnknownAddress) => {
                    debug!("discarding {} update for unknown {}", kind.label(), address);
                }
                Err(e) => warn!("{}: {}", address, e),
            },
        }
    }

    fn on_discovered<R: RadioLink>(&mut self, name: &str, address: &str, radio: &mut R) {
        if !config::GADGET_NAMES.contains(&name) {
            return;
        }
        if let ScanPhase::Connecting { .. } = self.phase {
            // One handshake at a time; the gadget will re-advertise.
            debug!("ignoring {} while a connection attempt is in flight", address);
            return;
        }

        info!("found gadget {} at {}", name, address);
        radio.stop_scan();
        self.phase = ScanPhase::Connecting {
            address: bounded(address),
            name: bounded(name),
        };

        if !radio.connect(address) {
            warn!(
                "{}: {}; resuming scanning",
                address,
                Error::from(TransportError::ConnectFailed)
            );
            self.resume_scan(radio);
        }
    }

    fn on_connected<R: RadioLink>(&mut self, address: &str, radio: &mut R) -> Result<(), Error> {
        let pending_name = match &self.phase {
            ScanPhase::Connecting { address: a, name } if a.as_str() == address => {
                Some(name.clone())
            }
            _ => None,
        };

        // Reconnects land back in their original slot; new gadgets take
        // the first free one.
        let index = match self.registry.find(address) {
            Some(i) => i,
            None => match self.registry.first_free() {
                Some(i) => i,
                None => {
                    self.resume_scan(radio);
                    return Err(Error::RegistryFull);
                }
            },
        };

        if let Some(slot) = self.registry.get_mut(index) {
            slot.address = bounded(address);
            if let Some(name) = pending_name {
                slot.name = name;
            }
        }

        info!("connected to {}; discovering attributes", address);
        if !radio.discover_attributes(address) {
            // No partial-subscription state is left behind; the record
            // holds only the address until the disconnect clears it.
            radio.disconnect(address);
            self.resume_scan(radio);
            return Err(Error::DiscoveryFailed);
        }

        for kind in SensorKind::ALL {
            if kind == SensorKind::Battery && radio.can_read(address, kind) {
                // Battery updates are rare; take an immediate snapshot
                // in addition to the subscription.
                self.initial_battery_read(index, address, radio);
            }
            if radio.can_subscribe(address, kind) {
                if !radio.subscribe(address, kind) {
                    warn!(
                        "{}: {} for {}",
                        address,
                        Error::from(TransportError::SubscribeFailed),
                        kind.label()
                    );
                }
            }
            // An absent attribute group is not an error: the field just
            // stays unread.
        }

        let rssi = radio.rssi(address);
        if let Some(slot) = self.registry.get_mut(index) {
            slot.rssi = Some(rssi);
        }

        // Never stop scanning for long: back to looking for the next one.
        self.resume_scan(radio);
        Ok(())
    }

    fn on_disconnected(&mut self, address: &str) {
        match self.registry.find(address) {
            Some(index) => {
                info!("disconnected from {}", address);
                self.registry.reset(index);
            }
            // Never registered (e.g. rejected while the table was full).
            None => debug!("disconnect for unregistered {}", address),
        }
        // Scanning was never halted after the initial handshake, so
        // there is nothing to resume here.
    }

    fn on_notified(
        &mut self,
        address: &str,
        kind: SensorKind,
        payload: &[u8],
    ) -> Result<(), Error> {
        let index = self.registry.find(address).ok_or(Error::UnknownAddress)?;
        let slot = self.registry.get_mut(index).ok_or(Error::UnknownAddress)?;

        let too_short = Error::PayloadTooShort {
            kind,
            len: payload.len(),
        };

        // On a short payload the prior value is retained unchanged.
        match kind {
            SensorKind::Humidity => {
                let value = decode::read_f32_le(payload).ok_or(too_short)?;
                slot.humidity = Some(value);
                info!("humidity: {}", value);
            }
            SensorKind::Temperature => {
                let value = decode::read_f32_le(payload).ok_or(too_short)?;
                slot.temperature = Some(value);
                info!("temperature: {}", value);
            }
            SensorKind::Co2 => {
                let value = decode::read_u16_le(payload).ok_or(too_short)?;
                slot.co2_ppm = Some(value);
                info!("CO2: {} ppm", value);
            }
            SensorKind::Battery => {
                let value = decode::read_u8(payload).ok_or(too_short)?;
                slot.battery_percent = Some(value);
                info!("battery level: {}%", value);
            }
        }
        Ok(())
    }

    fn initial_battery_read<R: RadioLink>(&mut self, index: usize, address: &str, radio: &mut R) {
        let mut buf = [0u8; 4];
        match radio.read(address, SensorKind::Battery, &mut buf) {
            Some(len) => {
                let len = len.min(buf.len());
                match decode::read_u8(&buf[..len]) {
                    Some(level) => {
                        if let Some(slot) = self.registry.get_mut(index) {
                            slot.battery_percent = Some(level);
                        }
                        info!("battery level: {}%", level);
                    }
                    None => warn!(
                        "{}: {}",
                        address,
                        Error::PayloadTooShort {
                            kind: SensorKind::Battery,
                            len,
                        }
                    ),
                }
            }
            None => warn!(
                "{}: {} for battery",
                address,
                Error::from(TransportError::ReadFailed)
            ),
        }
    }

    fn resume_scan<R: RadioLink>(&mut self, radio: &mut R) {
        self.phase = ScanPhase::Scanning;
        radio.scan();
    }
}

impl Default for SensorCentral {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy a borrowed string into a fixed-capacity one, truncating if the
/// source exceeds the capacity.
fn bounded<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
