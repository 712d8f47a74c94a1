//! 运行统计
//!
//! 终态记录上的纯归约：效率与吞吐量，运行结束时计算一次。

use serde::Serialize;

use super::time::SimTime;
use crate::net::Attempt;

/// 一次运行的完整结果。
#[derive(Debug, Default)]
pub struct RunReport {
    /// 成功发送的尝试，按完成顺序追加
    pub transmitted: Vec<Attempt>,
    /// 重试耗尽被丢弃的尝试
    pub dropped: Vec<Attempt>,
    /// 调度次数：每次选出一个候选计一次，含以碰撞收场的调度
    pub attempts: u64,
    pub generated: u64,
    /// 运行结束时仍滞留在队列中的越界尝试
    pub residual: u64,
    pub collision_events: u64,
    pub carrier_fail_events: u64,
    /// 生成流量中观测到的最大到达时间
    pub max_arrival: SimTime,
}

impl RunReport {
    /// 效率 = 成功发送数 / 调度次数；没有任何调度时为 0。
    pub fn efficiency(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.transmitted.len() as f64 / self.attempts as f64
    }

    /// 吞吐量（bit/s）= 成功送达的比特数 / 最大到达时间。
    pub fn throughput_bps(&self) -> f64 {
        let secs = self.max_arrival.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        let bits: u64 = self
            .transmitted
            .iter()
            .map(|a| a.bytes as u64 * 8)
            .sum();
        bits as f64 / secs
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            efficiency: self.efficiency(),
            throughput_bps: self.throughput_bps(),
            generated: self.generated,
            attempts: self.attempts,
            transmitted: self.transmitted.len() as u64,
            dropped: self.dropped.len() as u64,
            residual: self.residual,
            collision_events: self.collision_events,
            carrier_fail_events: self.carrier_fail_events,
            max_arrival_ns: self.max_arrival.0,
        }
    }
}

/// 面向机器读取（`--json`）的扁平摘要。
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub efficiency: f64,
    pub throughput_bps: f64,
    pub generated: u64,
    pub attempts: u64,
    pub transmitted: u64,
    pub dropped: u64,
    pub residual: u64,
    pub collision_events: u64,
    pub carrier_fail_events: u64,
    pub max_arrival_ns: u64,
}
