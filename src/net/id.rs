//! 标识符类型
//!
//! 定义总线站点的唯一标识符。

/// 站点标识符（总线上的序号，同时是时延表的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(pub usize);
