//! Exercise both switch channels: on, on, off, off, at QoS 1.

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
    println!("ESP32 CONTROL TEST");
    println!("{}", "=".repeat(60));
    println!("Broker: {}:{}", config.broker_host, config.broker_port);
    println!("Device: {}", config.device_id);

    let steps = sequence::control(&config.device_id);
    let mut session = Session::new(&config, "control");

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
        println!("\nInterrupted, test incomplete");
        return;
    }

    println!("\n{}", "=".repeat(60));
    println!("CONTROL TEST DONE");
    println!("{}", "=".repeat(60));
    println!("\nVerify:");
    println!("- the serial monitor shows the device receiving each command");
    println!("- the MQTT monitor shows status/telemetry responses");
    println!("- the light and fan toggled with the commands");
}
