//! 站点类型
//!
//! 站点持有按到达时间排序的待发队列、到各站的传播时延表，
//! 以及碰撞/载波失败两类重试计数。

use std::collections::VecDeque;

use super::attempt::Attempt;
use super::id::StationId;
use crate::sim::SimTime;

/// 总线上的一个站点。
#[derive(Debug)]
pub struct Station {
    id: StationId,
    /// 到各站的单向传播时延，按站点下标索引；自身为 0
    delays: Vec<SimTime>,
    q: VecDeque<Attempt>,
    /// 碰撞重试计数，发送成功或丢弃时清零
    pub collisions: u32,
    /// 载波失败重试计数（仅 non-persistent 模式推进）
    pub carrier_failures: u32,
}

impl Station {
    pub fn new(id: StationId, delays: Vec<SimTime>) -> Self {
        Self {
            id,
            delays,
            q: VecDeque::new(),
            collisions: 0,
            carrier_failures: 0,
        }
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    /// 到 `other` 的单向传播时延。
    pub fn delay_to(&self, other: StationId) -> SimTime {
        self.delays[other.0]
    }

    /// 本站视角下的最大传播时延；单站拓扑退化为 0。
    pub fn max_delay(&self) -> SimTime {
        self.delays.iter().copied().max().unwrap_or(SimTime::ZERO)
    }

    /// 入队。生成器按到达时间递增产出，队列因此天然有序。
    pub fn enqueue(&mut self, attempt: Attempt) {
        debug_assert!(
            self.q.back().is_none_or(|b| b.arrival <= attempt.arrival),
            "enqueue must keep arrivals non-decreasing"
        );
        self.q.push_back(attempt);
    }

    pub fn head(&self) -> Option<&Attempt> {
        self.q.front()
    }

    pub fn pop_head(&mut self) -> Option<Attempt> {
        self.q.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.q.len()
    }

    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, Attempt> {
        self.q.iter()
    }

    /// 把队首重排到 `at`（只会向后推），并把其后所有早于 `at` 的尝试
    /// 抬升到同一时间线，队列保持非降序。
    pub fn reschedule_head(&mut self, at: SimTime) {
        if let Some(head) = self.q.front_mut() {
            debug_assert!(head.arrival <= at, "head may only move forward");
            head.arrival = at;
        }
        self.raise_from(1, at);
        debug_assert!(self.is_sorted(), "queue unsorted after reschedule");
    }

    /// 介质占用级联：队列中所有早于 `floor` 的尝试抬升到 `floor`。
    /// 队列有序，遇到第一个不早于 `floor` 的尝试即可停下。
    pub fn raise_floor(&mut self, floor: SimTime) {
        self.raise_from(0, floor);
        debug_assert!(self.is_sorted(), "queue unsorted after raise_floor");
    }

    fn raise_from(&mut self, start: usize, floor: SimTime) {
        for a in self.q.iter_mut().skip(start) {
            if a.arrival < floor {
                a.arrival = floor;
            } else {
                break;
            }
        }
    }

    fn is_sorted(&self) -> bool {
        self.q
            .iter()
            .zip(self.q.iter().skip(1))
            .all(|(a, b)| a.arrival <= b.arrival)
    }
}
