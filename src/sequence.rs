//! The fixed command sequences the bench tools publish.
//!
//! Each step is a (topic, payload, description) triple plus the pause to hold
//! after publishing. Payloads are opaque strings; nothing here validates
//! simulator percentages or switch states, the device is the judge.

use std::time::Duration;

use rumqttc::QoS;

use crate::topics::{self, Channel, SWITCH_OFF, SWITCH_ON};

#[derive(Debug, Clone)]
pub struct Step {
    pub topic: String,
    pub payload: String,
    pub description: String,
    /// How long to keep the connection idle after this publish.
    pub pause: Duration,
}

impl Step {
    pub fn new(
        topic: String,
        payload: impl Into<String>,
        description: impl Into<String>,
        pause_secs: u64,
    ) -> Self {
        Self {
            topic,
            payload: payload.into(),
            description: description.into(),
            pause: Duration::from_secs(pause_secs),
        }
    }
}

/// A named sequence with a single QoS level for all of its publishes.
#[derive(Debug, Clone)]
pub struct Sequence {
    pub name: &'static str,
    pub qos: QoS,
    pub steps: Vec<Step>,
}

/// Full switch exercise: both channels on, then both off. QoS 1, matching
/// the firmware's expectation that control commands survive a flaky link.
pub fn control(device_id: &str) -> Sequence {
    let ch1 = topics::switch_set(device_id, Channel::Ch1);
    let ch2 = topics::switch_set(device_id, Channel::Ch2);
    Sequence {
        name: "control",
        qos: QoS::AtLeastOnce,
        steps: vec![
            Step::new(ch1.clone(), SWITCH_ON, "[1] channel 1 ON (light)", 3),
            Step::new(ch2.clone(), SWITCH_ON, "[2] channel 2 ON (fan)", 3),
            Step::new(ch1, SWITCH_OFF, "[3] channel 1 OFF (light)", 3),
            Step::new(ch2, SWITCH_OFF, "[4] channel 2 OFF (fan)", 2),
        ],
    }
}

/// Minimal smoke test: switch both channels on and leave them. Fire-and-forget
/// at QoS 0.
pub fn smoke(device_id: &str) -> Sequence {
    Sequence {
        name: "smoke",
        qos: QoS::AtMostOnce,
        steps: vec![
            Step::new(
                topics::switch_set(device_id, Channel::Ch1),
                SWITCH_ON,
                "[1] channel 1 ON",
                2,
            ),
            Step::new(
                topics::switch_set(device_id, Channel::Ch2),
                SWITCH_ON,
                "[2] channel 2 ON",
                2,
            ),
        ],
    }
}

/// Staged power-fault simulation on channel 1: ramp the simulated power
/// reduction from 0% up to 100% (open circuit) and back, with the light on
/// so the telemetry response is visible.
pub fn fault_simulation(device_id: &str) -> Sequence {
    let switch = topics::switch_set(device_id, Channel::Ch1);
    let sim = topics::sim_set(device_id, Channel::Ch1);
    Sequence {
        name: "fault-simulation",
        qos: QoS::AtLeastOnce,
        steps: vec![
            Step::new(switch.clone(), SWITCH_ON, "[1] channel 1 ON, normal operation", 2),
            Step::new(sim.clone(), "0", "[2] simulator 0% - no fault", 2),
            Step::new(sim.clone(), "30", "[3] simulator 30% - reduce power by 30%", 2),
            Step::new(sim.clone(), "60", "[4] simulator 60% - reduce power by 60%", 2),
            Step::new(sim.clone(), "100", "[5] simulator 100% - open circuit", 2),
            Step::new(sim, "0", "[6] simulator 0% - back to normal", 2),
            Step::new(switch, SWITCH_OFF, "[7] channel 1 OFF", 2),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_sequence_toggles_both_channels_in_order() {
        let seq = control("esp1");
        assert_eq!(seq.qos, QoS::AtLeastOnce);
        let pairs: Vec<(&str, &str)> = seq
            .steps
            .iter()
            .map(|s| (s.topic.as_str(), s.payload.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("devices/esp1/ch1/switch/set", "ON"),
                ("devices/esp1/ch2/switch/set", "ON"),
                ("devices/esp1/ch1/switch/set", "OFF"),
                ("devices/esp1/ch2/switch/set", "OFF"),
            ]
        );
    }

    #[test]
    fn smoke_sequence_is_fire_and_forget() {
        let seq = smoke("esp1");
        assert_eq!(seq.qos, QoS::AtMostOnce);
        assert_eq!(seq.steps.len(), 2);
        assert!(seq.steps.iter().all(|s| s.payload == "ON"));
    }

    #[test]
    fn fault_sequence_ramps_to_open_circuit_and_back() {
        let seq = fault_simulation("esp1");
        let sim_values: Vec<&str> = seq
            .steps
            .iter()
            .filter(|s| s.topic.ends_with("/sim/set"))
            .map(|s| s.payload.as_str())
            .collect();
        assert_eq!(sim_values, vec!["0", "30", "60", "100", "0"]);
        assert_eq!(seq.steps.first().unwrap().payload, "ON");
        assert_eq!(seq.steps.last().unwrap().payload, "OFF");
    }

    #[test]
    fn payloads_are_opaque_strings() {
        // Out-of-range simulator values are not the sender's problem.
        let step = Step::new(topics::sim_set("esp1", Channel::Ch1), "150", "overdrive", 2);
        assert_eq!(step.payload, "150");
        let step = Step::new(topics::sim_set("esp1", Channel::Ch1), "-5", "underdrive", 2);
        assert_eq!(step.payload, "-5");
    }

    #[test]
    fn pauses_match_script_timings() {
        let control = control("esp1");
        let pauses: Vec<u64> = control.steps.iter().map(|s| s.pause.as_secs()).collect();
        assert_eq!(pauses, vec![3, 3, 3, 2]);
        assert!(
            fault_simulation("esp1")
                .steps
                .iter()
                .all(|s| s.pause.as_secs() == 2)
        );
    }
}
