//! 截断二进制指数退避
//!
//! 以 512 bit-time 为退避时隙，窗口随重试次数指数扩张。

use super::time::SimTime;
use crate::traffic::RandomSource;

/// 第 `retry` 次重试的退避时长：R * slot，R ~ U[0, 2^retry - 1]。
/// 调用方负责先把 `retry` 截断到配置的重试上限。
pub fn backoff(src: &mut dyn RandomSource, retry: u32, rate_bps: u64) -> SimTime {
    let span = 1u64
        .checked_shl(retry)
        .map_or(u64::MAX, |v| v.saturating_sub(1));
    let slots = src.uniform_int(span);
    SimTime::from_secs_f64(slots as f64 * slot_secs(rate_bps))
}

/// 退避时隙：512 bit-time 换算到秒。
fn slot_secs(rate_bps: u64) -> f64 {
    512.0 / rate_bps as f64
}
