//! Line-oriented reading of device log output.
//!
//! The firmware logs UTF-8 text, but boot noise and baud glitches inject
//! garbage bytes, so decoding is lossy rather than strict.

use std::io::ErrorKind;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serialport::SerialPort;

use crate::error::BenchError;

/// Splits a raw serial byte stream into trimmed, non-empty lines. Malformed
/// byte sequences become replacement characters; an incomplete trailing line
/// stays buffered until its newline arrives.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buf: Vec<u8>,
}

impl LineDecoder {
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);
        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw).trim().to_string();
            if !line.is_empty() {
                lines.push(line);
            }
        }
        lines
    }
}

pub fn open(
    port_name: &str,
    baud: u32,
    timeout: Duration,
) -> Result<Box<dyn SerialPort>, serialport::Error> {
    serialport::new(port_name, baud).timeout(timeout).open()
}

fn read_chunk(
    port: &mut dyn SerialPort,
    decoder: &mut LineDecoder,
    chunk: &mut [u8],
) -> Result<(), BenchError> {
    match port.read(chunk) {
        Ok(n) => {
            for line in decoder.push(&chunk[..n]) {
                println!("{line}");
            }
            Ok(())
        }
        // A read timeout just means the device was quiet for a moment.
        Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::Interrupted) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Print decoded log lines until the stop flag is set. Blocking; run it on a
/// blocking thread and flip the flag from the async side.
pub fn tail(port: &mut dyn SerialPort, stop: &AtomicBool) -> Result<(), BenchError> {
    let mut decoder = LineDecoder::default();
    let mut chunk = [0u8; 256];
    while !stop.load(Ordering::Relaxed) {
        read_chunk(port, &mut decoder, &mut chunk)?;
    }
    Ok(())
}

/// Print decoded log lines for a fixed window, then return.
pub fn read_window(port: &mut dyn SerialPort, window: Duration) -> Result<(), BenchError> {
    let deadline = Instant::now() + window;
    let mut decoder = LineDecoder::default();
    let mut chunk = [0u8; 256];
    while Instant::now() < deadline {
        read_chunk(port, &mut decoder, &mut chunk)?;
    }
    Ok(())
}
