//! Tail the configured serial port until Ctrl-C.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{error, info};

use esp32_bench::config::SerialConfig;
use esp32_bench::serial::{OPEN_REMEDIATION, tail};

#[tokio::main]
async fn main() {
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
    let port_name = match config.require_port() {
        Ok(p) => p.to_string(),
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Connecting to {port_name}...");
    let mut port = match tail::open(&port_name, config.baud, Duration::from_secs(1)) {
        Ok(p) => p,
        Err(e) => {
            error!("Could not open {}: {}", port_name, e);
            println!("\n{OPEN_REMEDIATION}");
            std::process::exit(1);
        }
    };

    // Opening the port toggles DTR and usually resets the board; give it a
    // moment to boot before printing.
    tokio::time::sleep(Duration::from_secs(2)).await;

    println!("{}", "=".repeat(60));
    println!("Serial monitor running — press Ctrl-C to stop");
    println!("{}", "=".repeat(60));

    let stop = Arc::new(AtomicBool::new(false));
    let flag = stop.clone();
    let mut reader = tokio::task::spawn_blocking(move || {
        let result = tail::tail(port.as_mut(), &flag);
        drop(port);
        result
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received SIGINT, closing serial port");
            stop.store(true, Ordering::Relaxed);
        }
        result = &mut reader => {
            match result {
                Ok(Err(e)) => error!("Serial read failed: {}", e),
                Err(e) => error!("Reader task failed: {}", e),
                Ok(Ok(())) => {}
            }
            std::process::exit(1);
        }
    }

    // The reader notices the flag within one read timeout.
    match reader.await {
        Ok(Ok(())) => println!("\nSerial monitor stopped"),
        Ok(Err(e)) => error!("Serial read failed during shutdown: {}", e),
        Err(e) => error!("Reader task failed: {}", e),
    }
}
