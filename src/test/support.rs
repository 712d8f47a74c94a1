use std::collections::VecDeque;

use crate::traffic::RandomSource;

/// 脚本化随机源：按既定序列回放间隔与整数抽取，并记录每次
/// uniform_int 收到的上界，供断言退避窗口用。
pub struct ScriptedSource {
    gaps: VecDeque<f64>,
    ints: VecDeque<u64>,
    pub uppers: Vec<u64>,
}

impl ScriptedSource {
    pub fn new(gaps: &[f64], ints: &[u64]) -> Self {
        Self {
            gaps: gaps.iter().copied().collect(),
            ints: ints.iter().copied().collect(),
            uppers: Vec::new(),
        }
    }
}

impl RandomSource for ScriptedSource {
    fn exponential(&mut self, _rate: f64) -> f64 {
        self.gaps.pop_front().expect("scripted gaps exhausted")
    }

    fn uniform_int(&mut self, upper: u64) -> u64 {
        self.uppers.push(upper);
        self.ints.pop_front().map_or(0, |v| v.min(upper))
    }
}
