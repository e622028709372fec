//! Staged power-fault simulation: ramp channel 1's simulated power reduction
//! from 0% to 100% (open circuit) and back while watching telemetry react.

use tracing::{error, info, warn};

use esp32_bench::config::MqttConfig;
use esp32_bench::mqtt::Session;
use esp32_bench::sequence;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match MqttConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", "=".repeat(60));
    println!("ESP32 POWER-FAULT SIMULATION");
    println!("{}", "=".repeat(60));
    println!("Broker: {}:{}", config.broker_host, config.broker_port);
    println!("Device: {}", config.device_id);

    let steps = sequence::fault_simulation(&config.device_id);
    let mut session = Session::new(&config, "sim");

    let interrupted = tokio::select! {
        result = session.run_steps(&steps) => {
            if let Err(e) = result {
                error!("MQTT error: {}", e);
                std::process::exit(1);
            }
            false
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received SIGINT, disconnecting");
            true
        }
    };

    if let Err(e) = session.shutdown().await {
        warn!("Disconnect failed: {}", e);
    }
    if interrupted {
        println!("\nInterrupted, simulation incomplete");
        return;
    }

    println!("\n{}", "=".repeat(60));
    println!("SIMULATION DONE");
    println!("{}", "=".repeat(60));
    println!("\nIn mqtt-monitor you should have seen:");
    println!("- voltage/current/power tracking the simulator percentage");
    println!("- current and power dropping as the percentage rose");
    println!("- current near zero at 100% (simulated open circuit)");
}
