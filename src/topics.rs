//! Topic layout helpers matching the ESP32 firmware's MQTT convention.
//!
//! Everything lives under `devices/{device_id}`. Commands go to
//! `.../ch{N}/{facet}/set`; the firmware answers on its own sub-topics, which
//! the bench tools observe through the `devices/{device_id}/#` wildcard
//! without parsing them.

pub const ROOT: &str = "devices";

pub const SWITCH_ON: &str = "ON";
pub const SWITCH_OFF: &str = "OFF";

/// One of the two controllable outputs on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Channel 1, the light.
    Ch1,
    /// Channel 2, the fan.
    Ch2,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Ch1 => "ch1",
            Channel::Ch2 => "ch2",
        }
    }
}

pub fn base(device_id: &str) -> String {
    format!("{ROOT}/{device_id}")
}

/// Wildcard covering the device's whole subtree, for passive observation.
pub fn wildcard(device_id: &str) -> String {
    format!("{}/#", base(device_id))
}

pub fn switch_set(device_id: &str, channel: Channel) -> String {
    format!("{}/{}/switch/set", base(device_id), channel.as_str())
}

pub fn sim_set(device_id: &str, channel: Channel) -> String {
    format!("{}/{}/sim/set", base(device_id), channel.as_str())
}
