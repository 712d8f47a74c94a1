//! 仿真配置
//!
//! 集中定义配置项及其快速失败校验：非法配置在构造期即报错，
//! 绝不静默回落到默认值。

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::time::SimTime;

/// 载波侦听退避策略。
///
/// `Persistent` 在介质转清时刻立即重试，不让出优先级；
/// `NonPersistent` 退避一段随机时长后重新侦听。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsmaPolicy {
    Persistent,
    NonPersistent,
}

/// 配置错误。
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("node_count must be >= 1")]
    NoStations,
    #[error("arrival_rate must be positive and finite, got {0}")]
    InvalidArrivalRate(f64),
    #[error("simulation_time must be positive and finite, got {0}")]
    InvalidSimulationTime(f64),
    #[error("packet_bytes must be >= 1")]
    InvalidPacketBytes,
    #[error("transmission rate must be >= 1 bps")]
    InvalidRate,
    #[error("station spacing must be positive and finite, got {0}")]
    InvalidSpacing(f64),
    #[error("propagation speed must be positive and finite, got {0}")]
    InvalidPropSpeed(f64),
}

/// 一次总线仿真的完整配置。
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// 总线上的站点数
    pub node_count: usize,
    /// 每站到达率 λ（次/秒）
    pub arrival_rate: f64,
    /// 仿真边界（秒）
    pub simulation_time: f64,
    pub policy: CsmaPolicy,
    /// 单个尝试的重试上限，超出即丢弃
    pub retry_max: u32,
    pub packet_bytes: u32,
    /// 发送速率（bit/s）
    pub rate_bps: u64,
    /// 相邻站间距（米）
    pub spacing_m: f64,
    /// 介质传播速度（米/秒）
    pub prop_speed: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        // 2/3 光速对应铜介质；10 m 等距与 1 Mbps 速率沿用原型参数
        Self {
            node_count: 20,
            arrival_rate: 5.0,
            simulation_time: 50.0,
            policy: CsmaPolicy::NonPersistent,
            retry_max: 10,
            packet_bytes: 1500,
            rate_bps: 1_000_000,
            spacing_m: 10.0,
            prop_speed: 2.0e8,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_count == 0 {
            return Err(ConfigError::NoStations);
        }
        if !self.arrival_rate.is_finite() || self.arrival_rate <= 0.0 {
            return Err(ConfigError::InvalidArrivalRate(self.arrival_rate));
        }
        if !self.simulation_time.is_finite() || self.simulation_time <= 0.0 {
            return Err(ConfigError::InvalidSimulationTime(self.simulation_time));
        }
        if self.packet_bytes == 0 {
            return Err(ConfigError::InvalidPacketBytes);
        }
        if self.rate_bps == 0 {
            return Err(ConfigError::InvalidRate);
        }
        if !self.spacing_m.is_finite() || self.spacing_m <= 0.0 {
            return Err(ConfigError::InvalidSpacing(self.spacing_m));
        }
        if !self.prop_speed.is_finite() || self.prop_speed <= 0.0 {
            return Err(ConfigError::InvalidPropSpeed(self.prop_speed));
        }
        Ok(())
    }

    /// 仿真边界换算到内部时间单位。
    pub fn horizon(&self) -> SimTime {
        SimTime::from_secs_f64(self.simulation_time)
    }
}
