//! Watch everything the device publishes under its topic subtree.

use tracing::{error, info, warn};

use esp32_bench::config::MqttConfig;
use esp32_bench::mqtt::Session;
use esp32_bench::topics;

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

    let subtree = topics::wildcard(&config.device_id);

    println!("{}", "=".repeat(60));
    println!("ESP32 MQTT MONITOR");
    println!("{}", "=".repeat(60));
    println!("Broker: {}:{}", config.broker_host, config.broker_port);
    println!("Device: {}", config.device_id);
    println!("Topic:  {subtree}");
    println!("{}", "=".repeat(60));
    println!();

    let mut session = Session::new(&config, "monitor");

    tokio::select! {
        result = session.watch(&subtree) => {
            if let Err(e) = result {
                error!("MQTT connection error: {}", e);
                println!(
                    "\nCheck network access to {}:{} and rerun.",
                    config.broker_host, config.broker_port
                );
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received SIGINT, disconnecting");
        }
    }

    if let Err(e) = session.shutdown().await {
        warn!("Disconnect failed: {}", e);
    }
    println!("\nMonitor stopped");
}
