//! Time-series payload rendering for the publishing boundary.
//!
//! The periodic publisher pushes each live record to InfluxDB as one
//! `sensor_measurement` point, tagged with the device address and its
//! room. The network client lives outside the core; these renderers
//! produce the line-protocol body it writes.

use crate::ble::registry::{GadgetRecord, GadgetRegistry};
use crate::config::MEASUREMENT_NAME;
use crate::rooms::room_for_address;
use core::fmt::{self, Write};

/// Render one record as an InfluxDB line-protocol point.
///
/// Unread fields are omitted; if the record carries no readable field
/// at all, nothing is written and `Ok(false)` is returned (a point with
/// zero fields is invalid line protocol).
pub fn render_point<W: Write>(
    w: &mut W,
    record: &GadgetRecord,
    timestamp: Option<i64>,
) -> Result<bool, fmt::Error> {
    if record.humidity.is_none()
        && record.temperature.is_none()
        && record.co2_ppm.is_none()
        && record.battery_percent.is_none()
        && record.rssi.is_none()
    {
        return Ok(false);
    }

    let address = record.address.as_str();
    w.write_str(MEASUREMENT_NAME)?;
    w.write_str(",deviceId=")?;
    write_tag_value(w, address)?;
    w.write_str(",location=")?;
    write_tag_value(w, room_for_address(address))?;

    let mut first = true;
    if let Some(v) = record.temperature {
        write_sep(w, &mut first)?;
        write!(w, "temperature={:.2}", v)?;
    }
    if let Some(v) = record.humidity {
        write_sep(w, &mut first)?;
        write!(w, "humidity={:.2}", v)?;
    }
    if let Some(v) = record.co2_ppm {
        write_sep(w, &mut first)?;
        write!(w, "co2={}i", v)?;
    }
    if let Some(v) = record.battery_percent {
        write_sep(w, &mut first)?;
        write!(w, "battery={}i", v)?;
    }
    if let Some(v) = record.rssi {
        write_sep(w, &mut first)?;
        write!(w, "rssi={}i", v)?;
    }

    if let Some(ts) = timestamp {
        write!(w, " {}", ts)?;
    }
    Ok(true)
}

/// Render all live records, one point per line.
///
/// Returns the number of points written; gadgets with no readings yet
/// contribute nothing.
pub fn render_all_points<W: Write>(
    w: &mut W,
    registry: &GadgetRegistry,
    timestamp: Option<i64>,
) -> Result<usize, fmt::Error> {
    let mut written = 0;
    for record in registry.live() {
        if render_point(w, record, timestamp)? {
            w.write_char('\n')?;
            written += 1;
        }
    }
    Ok(written)
}

// Space separates the tag set from the field set; commas separate the
// fields after that.
fn write_sep<W: Write>(w: &mut W, first: &mut bool) -> fmt::Result {
    if *first {
        *first = false;
        w.write_char(' ')
    } else {
        w.write_char(',')
    }
}

/// Tag values must escape commas, equals signs and spaces.
fn write_tag_value<W: Write>(w: &mut W, s: &str) -> fmt::Result {
    for c in s.chars() {
        if matches!(c, ',' | '=' | ' ') {
            w.write_char('\\')?;
        }
        w.write_char(c)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;

    fn record(address: &str) -> GadgetRecord {
        let mut r = GadgetRecord::EMPTY;
        r.address.push_str(address).unwrap();
        r
    }

    #[test]
    fn full_record_renders_every_field() {
        let mut r = record("f9:3f:1d:46:f4:0c");
        r.temperature = Some(21.5);
        r.humidity = Some(45.5);
        r.co2_ppm = Some(800);
        r.battery_percent = Some(93);
        r.rssi = Some(-61);

        let mut out = String::new();
        assert!(render_point(&mut out, &r, Some(1690000000)).unwrap());
        assert_eq!(
            out,
            "sensor_measurement,deviceId=f9:3f:1d:46:f4:0c,location=Kitchen \
             temperature=21.50,humidity=45.50,co2=800i,battery=93i,rssi=-61i 1690000000"
        );
    }

    #[test]
    fn unread_fields_are_omitted() {
        let mut r = record("f9:3f:1d:46:f4:0c");
        r.humidity = Some(45.5);
        r.rssi = Some(-61);

        let mut out = String::new();
        assert!(render_point(&mut out, &r, None).unwrap());
        assert!(out.ends_with(" humidity=45.50,rssi=-61i"));
        assert!(!out.contains("temperature"));
        assert!(!out.contains("co2"));
        assert!(!out.contains("battery"));
    }

    #[test]
    fn record_without_readings_produces_no_point() {
        let r = record("f9:3f:1d:46:f4:0c");
        let mut out = String::new();
        assert!(!render_point(&mut out, &r, Some(1690000000)).unwrap());
        assert!(out.is_empty());
    }

    #[test]
    fn tag_values_are_escaped() {
        let mut r = record("f8:ce:3f:2b:5e:55"); // maps to "Living Room"
        r.temperature = Some(20.0);

        let mut out = String::new();
        render_point(&mut out, &r, None).unwrap();
        assert!(out.contains("location=Living\\ Room"));
    }

    #[test]
    fn render_all_skips_free_and_empty_records() {
        let mut reg = GadgetRegistry::new();
        {
            let slot = reg.get_mut(0).unwrap();
            slot.address.push_str("f9:3f:1d:46:f4:0c").unwrap();
            slot.humidity = Some(40.0);
        }
        {
            // Live but nothing read yet.
            let slot = reg.get_mut(1).unwrap();
            slot.address.push_str("aa:bb:cc:dd:ee:ff").unwrap();
        }

        let mut out = String::new();
        let written = render_all_points(&mut out, &reg, None).unwrap();
        assert_eq!(written, 1);
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("deviceId=f9:3f:1d:46:f4:0c"));
    }
}
