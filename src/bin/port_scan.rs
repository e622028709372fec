//! Enumerate serial ports, flag likely ESP32 bridges, and read the first
//! candidate's log output for ten seconds.

use std::time::Duration;

use tracing::error;

use esp32_bench::config::SerialConfig;
use esp32_bench::serial::{OPEN_REMEDIATION, discovery, tail};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match SerialConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", "=".repeat(60));
    println!("SERIAL PORT SCAN");
    println!("{}", "=".repeat(60));

    let ports = match discovery::scan() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to enumerate serial ports: {}", e);
            std::process::exit(1);
        }
    };

    if ports.is_empty() {
        println!("\nNo serial ports found.");
        return;
    }

    for port in &ports {
        println!("\n{}", port.port_name);
        println!("  description: {}", discovery::describe(port));
    }

    let candidates = discovery::find_candidates(&ports);
    println!("\n{}", "=".repeat(60));

    if candidates.is_empty() {
        println!("No ESP32 found (no CH340/CP210 bridge among {} ports).", ports.len());
        println!("Check the USB cable and the bridge driver, then rerun.");
        return;
    }

    println!("Likely ESP32 bridges:");
    for candidate in &candidates {
        println!("  * {} — {}", candidate.name, candidate.description);
    }

    // Lowest port name wins; every candidate was listed above so the user
    // can point serial-tail at a different one.
    let chosen = &candidates[0];
    println!("\nOpening {} at {} baud...", chosen.name, config.baud);

    match tail::open(&chosen.name, config.baud, Duration::from_secs(2)) {
        Ok(mut port) => {
            println!("Reading log for 10 seconds...\n");
            println!("--- LOG ---");
            if let Err(e) = tail::read_window(port.as_mut(), Duration::from_secs(10)) {
                error!("Read failed: {}", e);
                std::process::exit(1);
            }
            println!("\nDone, port closed.");
        }
        Err(e) => {
            error!("Could not open {}: {}", chosen.name, e);
            println!("\n{OPEN_REMEDIATION}");
            std::process::exit(1);
        }
    }
}
