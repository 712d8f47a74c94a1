//! 流量生成模块
//!
//! 此模块包含到达过程与其消费的窄随机接口。

// 子模块声明
mod arrivals;
mod source;

// 重新导出公共接口
pub use arrivals::{TrafficSummary, populate};
pub use source::{RandomSource, StdSource};
