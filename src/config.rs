//! Application-wide constants and compile-time configuration.
//!
//! All capacity limits, product-name filters and GATT UUIDs live here
//! so they can be tuned in one place.

// Registry

/// Maximum number of sensor gadgets tracked at once.
///
/// The registry is a fixed array of this many slots; an 11th gadget is
/// rejected until a slot frees up through a disconnect.
pub const MAX_PERIPHERALS: usize = 10;

/// Capacity of a stored hardware address ("aa:bb:cc:dd:ee:ff" = 17 bytes).
pub const ADDRESS_CAPACITY: usize = 17;

/// Capacity of a stored advertised device name.
pub const NAME_CAPACITY: usize = 32;

// Discovery filter

/// Advertised names we are willing to connect to (exact match).
pub const GADGET_NAMES: &[&str] = &["Smart Humigadget", "SHT40 Gadget"];

// GATT UUIDs
//
// The Sensirion gadgets expose each reading through its own custom
// service; battery level uses the standard Battery Service.

pub const BATTERY_SERVICE_UUID: &str = "180F";
pub const BATTERY_LEVEL_CHARACTERISTIC_UUID: &str = "2A19";

pub const HUMIDITY_SERVICE_UUID: &str = "00001234-B38D-4985-720E-0F993A68EE41";
pub const HUMIDITY_CHARACTERISTIC_UUID: &str = "00001235-B38D-4985-720E-0F993A68EE41";

pub const TEMPERATURE_SERVICE_UUID: &str = "00002234-B38D-4985-720E-0F993A68EE41";
pub const TEMPERATURE_CHARACTERISTIC_UUID: &str = "00002235-B38D-4985-720E-0F993A68EE41";

pub const CO2_SERVICE_UUID: &str = "00003234-B38D-4985-720E-0F993A68EE41";
pub const CO2_CHARACTERISTIC_UUID: &str = "00003235-B38D-4985-720E-0F993A68EE41";

// Publishing

/// InfluxDB measurement name for sensor points.
pub const MEASUREMENT_NAME: &str = "sensor_measurement";
