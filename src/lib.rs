//! Bench diagnostics for an ESP32 dual-channel power controller.
//!
//! The device speaks a flat MQTT convention under `devices/{device_id}` and
//! logs over a USB-serial bridge. Each binary in this crate performs one
//! fixed diagnostic procedure: scan serial ports, tail device logs, watch the
//! device's topic subtree, or publish a scripted command sequence.

pub mod config;
pub mod error;
pub mod mqtt;
pub mod sequence;
pub mod serial;
pub mod topics;

pub use error::BenchError;
