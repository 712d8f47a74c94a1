//! 总线竞争仿真
//!
//! 运行一次 CSMA/CD 线性总线仿真并输出效率/吞吐统计

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use csma_rs::sim::{CsmaPolicy, ScenarioSpec, SimConfig, Simulator};
use csma_rs::traffic::StdSource;

#[derive(Debug, Parser)]
#[command(name = "bus_sim", about = "CSMA/CD 总线竞争仿真：效率与吞吐量统计")]
struct Args {
    /// 场景 JSON 文件；给出时其余配置参数以文件为准
    #[arg(long)]
    scenario: Option<PathBuf>,

    #[arg(long, default_value_t = 20)]
    node_count: usize,
    /// 每站到达率 λ（次/秒）
    #[arg(long, default_value_t = 5.0)]
    arrival_rate: f64,
    /// 仿真边界（秒）
    #[arg(long, default_value_t = 50.0)]
    simulation_time: f64,
    /// persistent 载波侦听（默认 non-persistent）
    #[arg(long)]
    persistent: bool,
    #[arg(long, default_value_t = 10)]
    retry_max: u32,
    #[arg(long, default_value_t = 1500)]
    packet_bytes: u32,
    /// 发送速率（bit/s）
    #[arg(long, default_value_t = 1_000_000)]
    rate_bps: u64,
    /// 相邻站间距（米）
    #[arg(long, default_value_t = 10.0)]
    spacing_m: f64,
    /// 随机种子
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// 摘要 JSON 输出路径
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let (cfg, seed) = match load_config(&args) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("bus_sim: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut sim = match Simulator::new(cfg) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("bus_sim: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut src = StdSource::from_seed(seed);
    let report = sim.run(&mut src);
    let summary = report.summary();

    println!(
        "done @ {:?}, efficiency={:.4}, throughput_bps={:.1}, transmitted={}, dropped={}, residual={}",
        sim.now(),
        summary.efficiency,
        summary.throughput_bps,
        summary.transmitted,
        summary.dropped,
        summary.residual,
    );

    if let Some(path) = &args.json {
        let out = serde_json::to_string_pretty(&summary).expect("summary serializes");
        if let Err(e) = fs::write(path, out) {
            eprintln!("bus_sim: write {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn load_config(args: &Args) -> Result<(SimConfig, u64), String> {
    if let Some(path) = &args.scenario {
        let raw =
            fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
        let spec: ScenarioSpec =
            serde_json::from_str(&raw).map_err(|e| format!("parse {}: {e}", path.display()))?;
        let seed = spec.seed.unwrap_or(args.seed);
        Ok((spec.to_config(), seed))
    } else {
        let policy = if args.persistent {
            CsmaPolicy::Persistent
        } else {
            CsmaPolicy::NonPersistent
        };
        Ok((
            SimConfig {
                node_count: args.node_count,
                arrival_rate: args.arrival_rate,
                simulation_time: args.simulation_time,
                policy,
                retry_max: args.retry_max,
                packet_bytes: args.packet_bytes,
                rate_bps: args.rate_bps,
                spacing_m: args.spacing_m,
                ..SimConfig::default()
            },
            args.seed,
        ))
    }
}
