use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, Incoming, MqttOptions, QoS};
use tracing::{debug, info};

use crate::config::MqttConfig;
use crate::error::BenchError;
use crate::sequence::Sequence;

/// One broker session owned by one bench tool: plain TCP, no auth, 30 s
/// keep-alive. The event loop is polled inline rather than on a spawned task
/// so every tool shares the same connect/publish/disconnect contract.
pub struct Session {
    client: AsyncClient,
    eventloop: EventLoop,
}

impl Session {
    pub fn new(config: &MqttConfig, client_suffix: &str) -> Self {
        let mut mqttopts = MqttOptions::new(
            config.client_id_for(client_suffix),
            &config.broker_host,
            config.broker_port,
        );
        mqttopts.set_keep_alive(Duration::from_secs(30));

        let (client, eventloop) = AsyncClient::new(mqttopts, 100);
        Self { client, eventloop }
    }

    /// Poll until the broker acknowledges the connection.
    async fn wait_connected(&mut self) -> Result<(), BenchError> {
        loop {
            match self.eventloop.poll().await? {
                Event::Incoming(Incoming::ConnAck(_)) => {
                    info!("Connected to MQTT broker");
                    return Ok(());
                }
                event => debug!("Event before ConnAck: {event:?}"),
            }
        }
    }

    /// Publish a scripted sequence: one publish per step, then hold the
    /// connection idle for the step's pause. No acknowledgement from the
    /// device is awaited; pacing is fixed. The caller still owns the session
    /// and is expected to call [`Session::shutdown`] afterwards.
    pub async fn run_steps(&mut self, sequence: &Sequence) -> Result<(), BenchError> {
        self.wait_connected().await?;
        for step in &sequence.steps {
            println!("\n>> {}", step.description);
            println!("   topic: {}", step.topic);
            println!("   value: {}", step.payload);
            self.client
                .publish(&step.topic, sequence.qos, false, step.payload.as_bytes())
                .await?;
            self.idle(step.pause).await?;
        }
        Ok(())
    }

    /// Keep the event loop polled while the pause elapses, so QoS 1 acks and
    /// keep-alive pings keep flowing between steps.
    async fn idle(&mut self, pause: Duration) -> Result<(), BenchError> {
        let deadline = tokio::time::Instant::now() + pause;
        loop {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => return Ok(()),
                event = self.eventloop.poll() => {
                    debug!("Event during pause: {:?}", event?);
                }
            }
        }
    }

    /// Watch a topic subtree and print every message verbatim. Subscribes on
    /// ConnAck so the subscription survives a broker-side session reset. Only
    /// returns on a connection error.
    pub async fn watch(&mut self, subscribe_topic: &str) -> Result<(), BenchError> {
        loop {
            match self.eventloop.poll().await? {
                Event::Incoming(Incoming::ConnAck(_)) => {
                    info!("Connected to MQTT broker");
                    self.client
                        .subscribe(subscribe_topic, QoS::AtLeastOnce)
                        .await?;
                    println!("--- waiting for device traffic on {subscribe_topic} ---\n");
                }
                Event::Incoming(Incoming::Publish(publish)) => {
                    let payload = String::from_utf8_lossy(&publish.payload);
                    let stamp = chrono::Local::now().format("%H:%M:%S");
                    println!("[{stamp}] {}", publish.topic);
                    println!("   {payload}\n");
                }
                event => debug!("Ignoring event: {event:?}"),
            }
        }
    }

    /// Disconnect and drain the event loop until the broker closes the
    /// socket, so the DISCONNECT packet actually reaches the wire.
    pub async fn shutdown(mut self) -> Result<(), BenchError> {
        self.client.disconnect().await?;
        let drain = async {
            loop {
                match self.eventloop.poll().await {
                    Ok(Event::Incoming(Incoming::Disconnect)) | Err(_) => break,
                    Ok(event) => debug!("Event while draining: {event:?}"),
                }
            }
        };
        // A stalled broker must not keep the tool alive after its sequence.
        let _ = tokio::time::timeout(Duration::from_secs(5), drain).await;
        Ok(())
    }
}
