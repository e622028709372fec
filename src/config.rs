use std::env;

#[derive(Debug, Clone)]
pub struct MqttConfig {
    pub broker_host: String,
    pub broker_port: u16,
    pub device_id: String,
    /// Base client id; each binary appends its own suffix so that two bench
    /// tools can run against the broker at the same time.
    pub client_id: String,
}

#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub port: Option<String>,
    pub baud: u32,
}

fn env_required(key: &str) -> Result<String, String> {
    env::var(key).map_err(|_| format!("{key} environment variable is required"))
}

fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_or_default<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl MqttConfig {
    pub fn from_env() -> Result<Self, String> {
        let config = Self {
            broker_host: env_or_default("MQTT_BROKER_HOST", "broker.hivemq.com".to_string()),
            broker_port: env_or_default("MQTT_BROKER_PORT", 1883),
            device_id: env_required("DEVICE_ID")?,
            client_id: env_or_default("MQTT_CLIENT_ID", "esp32-bench".to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.broker_host.is_empty() {
            return Err("MQTT_BROKER_HOST must not be empty".into());
        }
        if self.device_id.is_empty() {
            return Err("DEVICE_ID must not be empty".into());
        }
        // The device id is spliced into topic strings, so topic separators
        // and wildcards would silently change the subscription shape.
        if self.device_id.contains(['/', '+', '#']) {
            return Err(format!(
                "DEVICE_ID '{}' must not contain '/', '+' or '#'",
                self.device_id
            ));
        }
        Ok(())
    }

    /// Client id for one bench tool, e.g. "esp32-bench-monitor".
    pub fn client_id_for(&self, suffix: &str) -> String {
        format!("{}-{}", self.client_id, suffix)
    }
}

impl SerialConfig {
    pub fn from_env() -> Result<Self, String> {
        let config = Self {
            port: env_optional("SERIAL_PORT"),
            baud: env_or_default("SERIAL_BAUD", 115_200),
        };
        if config.baud == 0 {
            return Err("SERIAL_BAUD must be > 0".into());
        }
        Ok(config)
    }

    /// The tailer needs an explicit port; discovery does not.
    pub fn require_port(&self) -> Result<&str, String> {
        self.port
            .as_deref()
            .ok_or_else(|| "SERIAL_PORT environment variable is required".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mqtt_config(device_id: &str) -> MqttConfig {
        MqttConfig {
            broker_host: "broker.hivemq.com".into(),
            broker_port: 1883,
            device_id: device_id.into(),
            client_id: "esp32-bench".into(),
        }
    }

    #[test]
    fn accepts_opaque_device_id() {
        assert!(mqtt_config("anh_hong_dep_trai_ittn").validate().is_ok());
    }

    #[test]
    fn rejects_topic_separators_in_device_id() {
        assert!(mqtt_config("a/b").validate().is_err());
        assert!(mqtt_config("a+b").validate().is_err());
        assert!(mqtt_config("a#").validate().is_err());
        assert!(mqtt_config("").validate().is_err());
    }

    #[test]
    fn client_id_suffix() {
        assert_eq!(mqtt_config("dev").client_id_for("monitor"), "esp32-bench-monitor");
    }

    #[test]
    fn serial_port_is_optional_until_required() {
        let config = SerialConfig {
            port: None,
            baud: 115_200,
        };
        assert!(config.require_port().is_err());

        let config = SerialConfig {
            port: Some("COM4".into()),
            baud: 115_200,
        };
        assert_eq!(config.require_port().unwrap(), "COM4");
    }
}
