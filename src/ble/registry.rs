//! Fixed-capacity registry of known sensor gadgets.
//!
//! One record per slot, keyed by hardware address; an empty address
//! marks a free slot. Slot indices are stable for the life of a
//! connection - there is no compaction, no eviction, no resize.

use crate::config::{ADDRESS_CAPACITY, MAX_PERIPHERALS, NAME_CAPACITY};
use heapless::String;

/// Live state of one tracked gadget.
///
/// Reading fields are `None` until the first notification (or initial
/// battery read) arrives, and go back to `None` when the gadget
/// disconnects.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GadgetRecord {
    /// Hardware address; empty means the slot is free.
    pub address: String<ADDRESS_CAPACITY>,
    /// Advertised product name.
    pub name: String<NAME_CAPACITY>,
    /// Relative humidity (%RH).
    pub humidity: Option<f32>,
    /// Temperature (degrees Celsius).
    pub temperature: Option<f32>,
    /// CO2 concentration (ppm).
    pub co2_ppm: Option<u16>,
    /// Battery charge (percent).
    pub battery_percent: Option<u8>,
    /// Signal strength captured at connect time (dBm).
    pub rssi: Option<i8>,
}

impl GadgetRecord {
    /// A free slot with no readings.
    pub const EMPTY: GadgetRecord = GadgetRecord {
        address: String::new(),
        name: String::new(),
        humidity: None,
        temperature: None,
        co2_ppm: None,
        battery_percent: None,
        rssi: None,
    };

    /// `true` when no gadget occupies this slot.
    pub fn is_free(&self) -> bool {
        self.address.is_empty()
    }
}

impl Default for GadgetRecord {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Fixed table of [`MAX_PERIPHERALS`] gadget slots.
///
/// Lookups are linear scans - with ten slots there is nothing to gain
/// from hashing.
pub struct GadgetRegistry {
    slots: [GadgetRecord; MAX_PERIPHERALS],
}

impl GadgetRegistry {
    pub const fn new() -> Self {
        Self {
            slots: [GadgetRecord::EMPTY; MAX_PERIPHERALS],
        }
    }

    /// Number of slots in the table (free or not).
    pub const fn capacity(&self) -> usize {
        MAX_PERIPHERALS
    }

    /// Index of the record for `address`, first exact match wins.
    pub fn find(&self, address: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| !s.is_free() && s.address.as_str() == address)
    }

    /// Index of the first free slot, if any.
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_free())
    }

    /// Number of occupied slots.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_free()).count()
    }

    /// Reset a slot back to the all-default record.
    pub fn reset(&mut self, index: usize) {
        if index < MAX_PERIPHERALS {
            self.slots[index] = GadgetRecord::EMPTY;
        }
    }

    pub fn get(&self, index: usize) -> Option<&GadgetRecord> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut GadgetRecord> {
        self.slots.get_mut(index)
    }

    /// Iterate every capacity slot, free ones included.
    ///
    /// This is the enumeration contract presentation consumers rely on:
    /// an empty address means "no device", a `None` field means "value
    /// not yet available".
    pub fn iter(&self) -> impl Iterator<Item = &GadgetRecord> {
        self.slots.iter()
    }

    /// Iterate only the occupied slots.
    pub fn live(&self) -> impl Iterator<Item = &GadgetRecord> {
        self.slots.iter().filter(|s| !s.is_free())
    }
}

impl Default for GadgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
