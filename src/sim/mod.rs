//! 仿真核心模块
//!
//! 此模块包含竞争消解仿真的核心组件：仿真时间、配置、退避律、
//! 引擎与运行统计。

// 子模块声明
mod backoff;
mod config;
mod report;
mod scenario;
mod simulator;
mod time;

// 重新导出公共接口
pub use backoff::backoff;
pub use config::{ConfigError, CsmaPolicy, SimConfig};
pub use report::{RunReport, RunSummary};
pub use scenario::ScenarioSpec;
pub use simulator::Simulator;
pub use time::SimTime;
