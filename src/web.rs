//! Presentation renderers for the HTTP boundary.
//!
//! The HTTP server itself lives outside the core; it calls these
//! renderers to produce response bodies. Both are generic over
//! `core::fmt::Write` so they work against an embedded response buffer
//! as well as a host test string.
//!
//! Enumeration contract: the JSON snapshot walks **all** capacity
//! slots (an empty address means "no device"), the dashboard only the
//! live ones; unread fields render as `null` / `N/A`.

use crate::ble::registry::{GadgetRecord, GadgetRegistry};
use crate::rooms::room_for_address;
use core::fmt::{self, Write};

/// Render the machine-readable registry snapshot as a JSON array.
pub fn render_snapshot_json<W: Write>(w: &mut W, registry: &GadgetRegistry) -> fmt::Result {
    w.write_char('[')?;
    for (i, record) in registry.iter().enumerate() {
        if i > 0 {
            w.write_char(',')?;
        }
        render_record_json(w, record)?;
    }
    w.write_char(']')
}

fn render_record_json<W: Write>(w: &mut W, record: &GadgetRecord) -> fmt::Result {
    w.write_str("{\"address\": ")?;
    write_json_str(w, record.address.as_str())?;
    w.write_str(", \"name\": ")?;
    write_json_str(w, record.name.as_str())?;

    w.write_str(", \"humidity\": ")?;
    match record.humidity {
        Some(v) => write!(w, "{:.2}", v)?,
        None => w.write_str("null")?,
    }
    w.write_str(", \"temperature\": ")?;
    match record.temperature {
        Some(v) => write!(w, "{:.2}", v)?,
        None => w.write_str("null")?,
    }
    w.write_str(", \"co2\": ")?;
    match record.co2_ppm {
        Some(v) => write!(w, "{}", v)?,
        None => w.write_str("null")?,
    }
    w.write_str(", \"battery\": ")?;
    match record.battery_percent {
        Some(v) => write!(w, "{}", v)?,
        None => w.write_str("null")?,
    }
    w.write_str(", \"rssi\": ")?;
    match record.rssi {
        Some(v) => write!(w, "{}", v)?,
        None => w.write_str("null")?,
    }
    w.write_char('}')
}

/// JSON string literal with quote/backslash escaping.
fn write_json_str<W: Write>(w: &mut W, s: &str) -> fmt::Result {
    w.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => w.write_str("\\\"")?,
            '\\' => w.write_str("\\\\")?,
            c if (c as u32) < 0x20 => write!(w, "\\u{:04x}", c as u32)?,
            c => w.write_char(c)?,
        }
    }
    w.write_char('"')
}

const DASHBOARD_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Sensor Dashboard</title>
  <meta http-equiv="refresh" content="10">
  <style>
    body { font-family: Arial; text-align: center; background: #f0f0f0; }
    .tile {
      display: inline-block;
      background: #fff;
      border-radius: 10px;
      box-shadow: 0 2px 8px rgba(0,0,0,0.1);
      margin: 20px;
      padding: 20px 40px;
      min-width: 220px;
    }
    .value { font-size: 2em; }
    .addr { font-size: 0.8em; color: #888; }
  </style>
</head>
<body>
  <h2>Humidity &amp; Temperature Dashboard</h2>
"#;

const DASHBOARD_FOOT: &str = "</body>\n</html>\n";

/// Render the human-readable dashboard page, one tile per live gadget.
pub fn render_dashboard<W: Write>(w: &mut W, registry: &GadgetRegistry) -> fmt::Result {
    w.write_str(DASHBOARD_HEAD)?;
    for record in registry.live() {
        render_tile(w, record)?;
    }
    w.write_str(DASHBOARD_FOOT)
}

fn render_tile<W: Write>(w: &mut W, record: &GadgetRecord) -> fmt::Result {
    let address = record.address.as_str();
    w.write_str("<div class='tile'>")?;
    write!(w, "<div><b>{}</b></div>", room_for_address(address))?;
    write!(w, "<div class='addr'>{}</div>", address)?;

    w.write_str("<div>Humidity: <span class='value'>")?;
    match record.humidity {
        Some(v) => write!(w, "{:.1} %", v)?,
        None => w.write_str("N/A")?,
    }
    w.write_str("</span></div>")?;

    w.write_str("<div>Temperature: <span class='value'>")?;
    match record.temperature {
        Some(v) => write!(w, "{:.1} &deg;C", v)?,
        None => w.write_str("N/A")?,
    }
    w.write_str("</span></div>")?;

    w.write_str("<div>CO2: <span class='value'>")?;
    match record.co2_ppm {
        Some(v) => write!(w, "{} ppm", v)?,
        None => w.write_str("N/A")?,
    }
    w.write_str("</span></div>")?;

    w.write_str("<div>Battery: <span class='value'>")?;
    match record.battery_percent {
        Some(v) => write!(w, "{} %", v)?,
        None => w.write_str("N/A")?,
    }
    w.write_str("</span></div>")?;

    w.write_str("<div>RSSI: <span class='value'>")?;
    match record.rssi {
        Some(v) => write!(w, "{} dBm", v)?,
        None => w.write_str("N/A")?,
    }
    w.write_str("</span></div>")?;

    w.write_str("</div>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_PERIPHERALS;
    use std::string::String;

    fn occupied_registry() -> GadgetRegistry {
        let mut reg = GadgetRegistry::new();
        let slot = reg.get_mut(0).unwrap();
        slot.address.push_str("f9:3f:1d:46:f4:0c").unwrap();
        slot.name.push_str("SHT40 Gadget").unwrap();
        slot.humidity = Some(45.5);
        slot.temperature = Some(21.5);
        slot.battery_percent = Some(93);
        slot.rssi = Some(-61);
        reg
    }

    #[test]
    fn json_emits_every_capacity_slot() {
        let reg = GadgetRegistry::new();
        let mut out = String::new();
        render_snapshot_json(&mut out, &reg).unwrap();
        assert_eq!(out.matches("\"address\": \"\"").count(), MAX_PERIPHERALS);
        assert!(out.starts_with('['));
        assert!(out.ends_with(']'));
    }

    #[test]
    fn json_renders_values_and_nulls() {
        let reg = occupied_registry();
        let mut out = String::new();
        render_snapshot_json(&mut out, &reg).unwrap();
        assert!(out.contains("\"address\": \"f9:3f:1d:46:f4:0c\""));
        assert!(out.contains("\"humidity\": 45.50"));
        assert!(out.contains("\"temperature\": 21.50"));
        // CO2 was never read on this gadget.
        assert!(out.contains("\"co2\": null"));
        assert!(out.contains("\"battery\": 93"));
        assert!(out.contains("\"rssi\": -61"));
    }

    #[test]
    fn json_escapes_quotes_in_names() {
        let mut reg = GadgetRegistry::new();
        let slot = reg.get_mut(0).unwrap();
        slot.address.push_str("aa:bb").unwrap();
        slot.name.push_str("he said \"hi\"").unwrap();
        let mut out = String::new();
        render_snapshot_json(&mut out, &reg).unwrap();
        assert!(out.contains("\"name\": \"he said \\\"hi\\\"\""));
    }

    #[test]
    fn dashboard_shows_live_tiles_only() {
        let reg = occupied_registry();
        let mut out = String::new();
        render_dashboard(&mut out, &reg).unwrap();
        assert_eq!(out.matches("class='tile'").count(), 1);
        assert!(out.contains("<b>Kitchen</b>"));
        assert!(out.contains("f9:3f:1d:46:f4:0c"));
        assert!(out.contains("45.5 %"));
        assert!(out.contains("21.5 &deg;C"));
        assert!(out.contains("-61 dBm"));
        // Unread CO2 renders as N/A.
        assert!(out.contains("CO2: <span class='value'>N/A"));
    }

    #[test]
    fn empty_registry_dashboard_has_no_tiles() {
        let reg = GadgetRegistry::new();
        let mut out = String::new();
        render_dashboard(&mut out, &reg).unwrap();
        assert!(!out.contains("class='tile'"));
        assert!(out.contains("Dashboard"));
    }
}
