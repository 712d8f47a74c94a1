use crate::sim::{CsmaPolicy, ScenarioSpec, SimConfig};

#[test]
fn minimal_scenario_fills_in_defaults() {
    let spec: ScenarioSpec = serde_json::from_str(
        r#"{ "node_count": 3, "arrival_rate": 2.0, "simulation_time": 5.0 }"#,
    )
    .expect("parse scenario");
    let cfg = spec.to_config();
    let d = SimConfig::default();

    assert_eq!(cfg.node_count, 3);
    assert_eq!(cfg.arrival_rate, 2.0);
    assert_eq!(cfg.simulation_time, 5.0);
    assert_eq!(cfg.policy, d.policy);
    assert_eq!(cfg.retry_max, d.retry_max);
    assert_eq!(cfg.packet_bytes, d.packet_bytes);
    assert_eq!(cfg.rate_bps, d.rate_bps);
    assert_eq!(spec.seed, None);
}

#[test]
fn full_scenario_overrides_every_field() {
    let spec: ScenarioSpec = serde_json::from_str(
        r#"{
            "node_count": 8,
            "arrival_rate": 12.0,
            "simulation_time": 2.0,
            "policy": "persistent",
            "retry_max": 4,
            "packet_bytes": 1000,
            "rate_bps": 10000000,
            "spacing_m": 25.0,
            "prop_speed": 3.0e8,
            "seed": 9
        }"#,
    )
    .expect("parse scenario");
    let cfg = spec.to_config();

    assert_eq!(cfg.node_count, 8);
    assert_eq!(cfg.policy, CsmaPolicy::Persistent);
    assert_eq!(cfg.retry_max, 4);
    assert_eq!(cfg.packet_bytes, 1000);
    assert_eq!(cfg.rate_bps, 10_000_000);
    assert_eq!(cfg.spacing_m, 25.0);
    assert_eq!(cfg.prop_speed, 3.0e8);
    assert_eq!(spec.seed, Some(9));
}

#[test]
fn scenario_round_trips_through_json() {
    let spec: ScenarioSpec = serde_json::from_str(
        r#"{ "node_count": 2, "arrival_rate": 1.0, "simulation_time": 1.0, "policy": "non_persistent" }"#,
    )
    .expect("parse scenario");
    let raw = serde_json::to_string(&spec).expect("serialize scenario");
    let back: ScenarioSpec = serde_json::from_str(&raw).expect("reparse scenario");
    assert_eq!(back.node_count, spec.node_count);
    assert_eq!(back.policy, Some(CsmaPolicy::NonPersistent));
}

#[test]
fn unknown_policy_value_is_a_parse_error() {
    let res: Result<ScenarioSpec, _> = serde_json::from_str(
        r#"{ "node_count": 1, "arrival_rate": 1.0, "simulation_time": 1.0, "policy": "aloha" }"#,
    );
    assert!(res.is_err());
}
