//! 总线介质模块
//!
//! 此模块包含共享总线上的基本类型：站点、发送尝试与标识符。

// 子模块声明
mod attempt;
mod id;
mod station;

// 重新导出公共接口
pub use attempt::Attempt;
pub use id::StationId;
pub use station::Station;
