//! 到达过程
//!
//! 每个站点独立的泊松更新过程：指数间隔累加出严格递增的到达序列，
//! 直到越过仿真边界。越界后的首个时间戳一并入队，供引擎做边界判断。

use tracing::debug;

use super::source::RandomSource;
use crate::net::{Attempt, Station};
use crate::sim::{SimConfig, SimTime};

/// 注入结果：生成总数与全局最大到达时间（吞吐量分母）。
#[derive(Debug, Default, Clone, Copy)]
pub struct TrafficSummary {
    pub generated: u64,
    pub max_arrival: SimTime,
}

/// 为所有站点生成到达队列。
pub fn populate(
    stations: &mut [Station],
    cfg: &SimConfig,
    src: &mut dyn RandomSource,
) -> TrafficSummary {
    let horizon = cfg.horizon();
    let mut next_id = 0u64;
    let mut summary = TrafficSummary::default();

    for station in stations.iter_mut() {
        let mut clock = 0.0f64;
        loop {
            clock += src.exponential(cfg.arrival_rate);
            let arrival = SimTime::from_secs_f64(clock);
            station.enqueue(Attempt::new(
                next_id,
                station.id(),
                arrival,
                cfg.packet_bytes,
                cfg.rate_bps,
            ));
            next_id = next_id.wrapping_add(1);
            summary.generated += 1;
            summary.max_arrival = summary.max_arrival.max(arrival);
            if arrival > horizon {
                break;
            }
        }
        debug!(station = station.id().0, pending = station.pending(), "到达队列生成完毕");
    }
    summary
}
