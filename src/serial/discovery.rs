//! Serial port enumeration and ESP32 bridge detection.
//!
//! ESP32 dev boards show up behind a CH340 or CP210x USB-serial bridge, so a
//! port whose USB strings mention either chip is flagged as a likely device.
//! Best-effort only; a board behind a different bridge will not be flagged.

use serialport::{SerialPortInfo, SerialPortType};

const BRIDGE_CHIPS: [&str; 2] = ["CH340", "CP210"];

/// A port flagged as a likely ESP32 USB-serial bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub description: String,
}

pub fn scan() -> Result<Vec<SerialPortInfo>, serialport::Error> {
    serialport::available_ports()
}

/// Human-readable description for one enumerated port.
pub fn describe(port: &SerialPortInfo) -> String {
    match &port.port_type {
        SerialPortType::UsbPort(usb) => {
            let mut parts = Vec::new();
            if let Some(product) = &usb.product {
                parts.push(product.clone());
            }
            if let Some(manufacturer) = &usb.manufacturer {
                parts.push(manufacturer.clone());
            }
            if parts.is_empty() {
                format!("USB device {:04x}:{:04x}", usb.vid, usb.pid)
            } else {
                format!("{} ({:04x}:{:04x})", parts.join(", "), usb.vid, usb.pid)
            }
        }
        SerialPortType::PciPort => "PCI serial port".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth serial port".to_string(),
        SerialPortType::Unknown => "unknown serial port".to_string(),
    }
}

pub fn is_bridge_description(description: &str) -> bool {
    BRIDGE_CHIPS.iter().any(|chip| description.contains(chip))
}

/// Filter (port name, description) pairs down to likely bridges, sorted by
/// port name so the choice of which candidate to open is deterministic.
pub fn candidates_from<I>(ports: I) -> Vec<Candidate>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut candidates: Vec<Candidate> = ports
        .into_iter()
        .filter(|(_, description)| is_bridge_description(description))
        .map(|(name, description)| Candidate { name, description })
        .collect();
    candidates.sort_by(|a, b| a.name.cmp(&b.name));
    candidates
}

pub fn find_candidates(ports: &[SerialPortInfo]) -> Vec<Candidate> {
    candidates_from(
        ports
            .iter()
            .map(|p| (p.port_name.clone(), describe(p))),
    )
}
