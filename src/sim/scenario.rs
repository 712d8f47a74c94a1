//! 场景文件
//!
//! JSON 场景描述，映射到 `SimConfig`；缺省字段沿用默认配置。

use serde::{Deserialize, Serialize};

use super::config::{CsmaPolicy, SimConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub node_count: usize,
    pub arrival_rate: f64,
    pub simulation_time: f64,
    #[serde(default)]
    pub policy: Option<CsmaPolicy>,
    #[serde(default)]
    pub retry_max: Option<u32>,
    #[serde(default)]
    pub packet_bytes: Option<u32>,
    #[serde(default)]
    pub rate_bps: Option<u64>,
    #[serde(default)]
    pub spacing_m: Option<f64>,
    #[serde(default)]
    pub prop_speed: Option<f64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ScenarioSpec {
    /// 展开为完整配置；校验交给 `Simulator::new`。
    pub fn to_config(&self) -> SimConfig {
        let d = SimConfig::default();
        SimConfig {
            node_count: self.node_count,
            arrival_rate: self.arrival_rate,
            simulation_time: self.simulation_time,
            policy: self.policy.unwrap_or(d.policy),
            retry_max: self.retry_max.unwrap_or(d.retry_max),
            packet_bytes: self.packet_bytes.unwrap_or(d.packet_bytes),
            rate_bps: self.rate_bps.unwrap_or(d.rate_bps),
            spacing_m: self.spacing_m.unwrap_or(d.spacing_m),
            prop_speed: self.prop_speed.unwrap_or(d.prop_speed),
        }
    }
}
