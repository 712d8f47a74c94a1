//! 发送尝试类型
//!
//! 一次发送尝试携带可变的到达时间与固定的发送时延。

use super::id::StationId;
use crate::sim::SimTime;

/// 一次发送尝试。`arrival` 表示首个 bit 进入介质的时刻，退避与
/// 介质占用级联会将其向后推移；`tx_delay` 一经计算不再变化。
#[derive(Debug, Clone)]
pub struct Attempt {
    pub id: u64,
    pub station: StationId,
    pub arrival: SimTime,
    pub bytes: u32,
    pub tx_delay: SimTime,
}

impl Attempt {
    /// 创建发送尝试，按序列化公式计算发送时延。
    pub fn new(id: u64, station: StationId, arrival: SimTime, bytes: u32, rate_bps: u64) -> Self {
        Self {
            id,
            station,
            arrival,
            bytes,
            tx_delay: tx_time(bytes, rate_bps),
        }
    }

    /// 发送结束时刻（首 bit 进入介质 + 发送时延）。
    pub fn tx_end(&self) -> SimTime {
        self.arrival.saturating_add(self.tx_delay)
    }
}

/// 计算传输指定字节数所需的时间
pub(crate) fn tx_time(bytes: u32, rate_bps: u64) -> SimTime {
    // ceil(bytes*8 / bps) 秒 -> 纳秒
    if rate_bps == 0 {
        return SimTime(u64::MAX / 4);
    }
    let bits = (bytes as u128).saturating_mul(8);
    let nanos =
        (bits.saturating_mul(1_000_000_000u128) + (rate_bps as u128 - 1)) / rate_bps as u128;
    SimTime(nanos.min(u64::MAX as u128) as u64)
}
