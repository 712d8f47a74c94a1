//! 线性总线拓扑构建

use crate::net::{Station, StationId};
use crate::sim::{ConfigError, SimTime};

/// 线性总线拓扑配置选项
#[derive(Debug, Clone)]
pub struct BusOpts {
    pub node_count: usize,
    pub spacing_m: f64,
    pub prop_speed: f64,
}

impl Default for BusOpts {
    fn default() -> Self {
        Self {
            node_count: 20,
            spacing_m: 10.0,
            prop_speed: 2.0e8,
        }
    }
}

/// 构建线性总线：N 个站点等距排布在一条直线上。
///
/// 时延表按站点下标密集存储，一次性迭代算出：
/// delay(i, j) = spacing * |i - j| / speed。
/// 表是对称的，对角线为 0，随下标距离单调增加。
pub fn build_bus(opts: &BusOpts) -> Result<Vec<Station>, ConfigError> {
    if opts.node_count == 0 {
        return Err(ConfigError::NoStations);
    }
    let hop = SimTime::from_secs_f64(opts.spacing_m / opts.prop_speed);
    let stations = (0..opts.node_count)
        .map(|i| {
            let delays = (0..opts.node_count)
                .map(|j| SimTime(hop.0.saturating_mul(i.abs_diff(j) as u64)))
                .collect();
            Station::new(StationId(i), delays)
        })
        .collect();
    Ok(stations)
}

/// 全表最大传播时延（单站拓扑退化为 0）。
pub fn max_delay(stations: &[Station]) -> SimTime {
    stations
        .iter()
        .map(|s| s.max_delay())
        .max()
        .unwrap_or(SimTime::ZERO)
}
