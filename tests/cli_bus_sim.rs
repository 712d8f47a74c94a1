use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("csma-rs-{prefix}-{}-{nanos}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn run_bus_sim(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_bus_sim"))
        .args(args)
        .output()
        .expect("run bus_sim")
}

#[test]
fn bus_sim_writes_a_consistent_json_summary() {
    let dir = unique_temp_dir("summary");
    let out_json = dir.join("summary.json");

    let output = run_bus_sim(&[
        "--node-count",
        "3",
        "--arrival-rate",
        "5",
        "--simulation-time",
        "0.2",
        "--seed",
        "3",
        "--json",
        out_json.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "bus_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let raw = fs::read_to_string(&out_json).expect("read summary.json");
    let v: Value = serde_json::from_str(&raw).expect("parse summary.json");

    let generated = v["generated"].as_u64().expect("generated");
    let transmitted = v["transmitted"].as_u64().expect("transmitted");
    let dropped = v["dropped"].as_u64().expect("dropped");
    let residual = v["residual"].as_u64().expect("residual");
    assert_eq!(transmitted + dropped + residual, generated);

    let efficiency = v["efficiency"].as_f64().expect("efficiency");
    assert!((0.0..=1.0).contains(&efficiency));
    assert!(v["throughput_bps"].as_f64().expect("throughput") >= 0.0);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn bus_sim_is_deterministic_for_a_fixed_seed() {
    let dir = unique_temp_dir("determinism");
    let out_a = dir.join("a.json");
    let out_b = dir.join("b.json");

    for out in [&out_a, &out_b] {
        let output = run_bus_sim(&[
            "--node-count",
            "4",
            "--arrival-rate",
            "20",
            "--simulation-time",
            "0.1",
            "--seed",
            "11",
            "--json",
            out.to_str().unwrap(),
        ]);
        assert!(output.status.success());
    }

    let a = fs::read_to_string(&out_a).expect("read a.json");
    let b = fs::read_to_string(&out_b).expect("read b.json");
    assert_eq!(a, b, "same seed must reproduce the same summary");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn bus_sim_runs_a_scenario_file() {
    let dir = unique_temp_dir("scenario");
    let scenario = dir.join("scenario.json");
    fs::write(
        &scenario,
        r#"
{
    "node_count": 2,
    "arrival_rate": 10.0,
    "simulation_time": 0.1,
    "policy": "persistent",
    "seed": 5
}
        "#,
    )
    .expect("write scenario");
    let out_json = dir.join("summary.json");

    let output = run_bus_sim(&[
        "--scenario",
        scenario.to_str().unwrap(),
        "--json",
        out_json.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "bus_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let v: Value =
        serde_json::from_str(&fs::read_to_string(&out_json).expect("read summary.json"))
            .expect("parse summary.json");
    assert!(v["generated"].as_u64().expect("generated") >= 2);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn bus_sim_exits_nonzero_on_invalid_config() {
    let output = run_bus_sim(&["--node-count", "0"]);
    assert!(!output.status.success(), "expected non-zero exit");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("node_count"),
        "stderr did not mention node_count: {stderr}"
    );
}

#[test]
fn bus_sim_exits_nonzero_on_malformed_scenario() {
    let dir = unique_temp_dir("bad-scenario");
    let scenario = dir.join("scenario.json");
    fs::write(&scenario, r#"{ "node_count": "not a number" }"#).expect("write scenario");

    let output = run_bus_sim(&["--scenario", scenario.to_str().unwrap()]);
    assert!(!output.status.success(), "expected non-zero exit");

    let _ = fs::remove_dir_all(&dir);
}
