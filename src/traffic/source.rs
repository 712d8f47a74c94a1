//! 随机源
//!
//! 到达过程与退避共用的窄随机接口；测试可注入脚本化实现
//! 以获得逐事件可复现的运行。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};

/// 随机源接口。
pub trait RandomSource {
    /// 按速率 `rate` 抽取一个指数分布间隔（秒）。
    fn exponential(&mut self, rate: f64) -> f64;
    /// 在 [0, upper] 上均匀抽取整数（含端点）。
    fn uniform_int(&mut self, upper: u64) -> u64;
}

/// 基于 StdRng 的默认随机源；种子固定则整次运行可复现。
#[derive(Debug)]
pub struct StdSource {
    rng: StdRng,
}

impl StdSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdSource {
    fn exponential(&mut self, rate: f64) -> f64 {
        // 速率在配置校验处保证为正
        Exp::new(rate).expect("rate validated positive").sample(&mut self.rng)
    }

    fn uniform_int(&mut self, upper: u64) -> u64 {
        if upper == 0 {
            return 0;
        }
        self.rng.gen_range(0..=upper)
    }
}
