//! 仿真器
//!
//! 事件序竞争消解引擎：反复选出全局最早的待发尝试，对其做载波侦听
//! 与碰撞判定，并驱动各站点的退避/丢弃状态机。整个运行是对按时间
//! 排序的尝试流的同步归约，没有真实并发。

use tracing::{debug, info, trace};

use super::backoff::backoff;
use super::config::{ConfigError, CsmaPolicy, SimConfig};
use super::report::RunReport;
use super::time::SimTime;
use crate::net::{Attempt, StationId, Station};
use crate::topo::bus::{BusOpts, build_bus, max_delay};
use crate::traffic::{self, RandomSource};

/// 单次调度的判定结果。
#[derive(Debug)]
enum Verdict {
    /// 介质空闲且无竞争者
    Clear,
    /// 载波侦听失败；携带介质转清时刻
    CarrierBusy { clear_at: SimTime },
    /// 与一个或多个对端队首交叠
    Collision { peers: Vec<StationId> },
}

/// 事件序竞争消解引擎：持有站点竞技场与两份终态记录。
pub struct Simulator {
    cfg: SimConfig,
    stations: Vec<Station>,
    max_delay: SimTime,
    horizon: SimTime,
    now: SimTime,
    report: RunReport,
}

impl Simulator {
    /// 构建仿真器；配置在此处快速失败。
    pub fn new(cfg: SimConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let stations = build_bus(&BusOpts {
            node_count: cfg.node_count,
            spacing_m: cfg.spacing_m,
            prop_speed: cfg.prop_speed,
        })?;
        let max_delay = max_delay(&stations);
        let horizon = cfg.horizon();
        Ok(Self {
            cfg,
            stations,
            max_delay,
            horizon,
            now: SimTime::ZERO,
            report: RunReport::default(),
        })
    }

    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 站点竞技场的只读视图（计数器与残留队列可由此检视）。
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// 注入到达流量并排空引擎，归约出运行统计。
    #[tracing::instrument(skip(self, src), fields(nodes = self.cfg.node_count))]
    pub fn run(&mut self, src: &mut dyn RandomSource) -> RunReport {
        info!(
            nodes = self.cfg.node_count,
            policy = ?self.cfg.policy,
            horizon = ?self.horizon,
            "🚌 开始总线竞争仿真"
        );

        let traffic = traffic::populate(&mut self.stations, &self.cfg, src);
        self.report.generated = traffic.generated;
        self.report.max_arrival = traffic.max_arrival;
        debug!(
            generated = traffic.generated,
            max_arrival = ?traffic.max_arrival,
            "流量注入完成"
        );

        while let Some(sender) = self.next_sender() {
            self.dispatch(sender, src);
        }

        self.report.residual = self.stations.iter().map(|s| s.pending() as u64).sum();

        info!(
            transmitted = self.report.transmitted.len(),
            dropped = self.report.dropped.len(),
            residual = self.report.residual,
            attempts = self.report.attempts,
            efficiency = self.report.efficiency(),
            "✅ 仿真完成"
        );
        std::mem::take(&mut self.report)
    }

    /// 选出队首到达时间全局最小的站点；并列取最小站号。
    /// 所有队首都越过仿真边界（或全部排空）时返回 None，运行终止。
    fn next_sender(&self) -> Option<StationId> {
        let mut best: Option<(SimTime, StationId)> = None;
        for s in &self.stations {
            let Some(head) = s.head() else { continue };
            match best {
                Some((t, _)) if t <= head.arrival => {}
                _ => best = Some((head.arrival, s.id())),
            }
        }
        match best {
            Some((t, id)) if t <= self.horizon => Some(id),
            _ => None,
        }
    }

    /// 调度一个候选：判定并分派到状态机。
    #[tracing::instrument(skip(self, src), fields(station = sender.0))]
    fn dispatch(&mut self, sender: StationId, src: &mut dyn RandomSource) {
        self.report.attempts += 1;
        let head = self.stations[sender.0]
            .head()
            .expect("selected station has a head")
            .clone();
        self.now = self.now.max(head.arrival);

        let verdict = self.classify(&head);
        trace!(attempt = head.id, arrival = ?head.arrival, verdict = ?verdict, "候选判定");

        match verdict {
            Verdict::Collision { peers } => self.on_collision(sender, peers, src),
            Verdict::CarrierBusy { clear_at } => self.on_carrier_busy(sender, clear_at, src),
            Verdict::Clear => self.on_transmit(sender),
        }
    }

    /// 碰撞优先于载波失败。
    fn classify(&self, head: &Attempt) -> Verdict {
        let peers = self.colliding_peers(head);
        if !peers.is_empty() {
            return Verdict::Collision { peers };
        }
        if let Some(clear_at) = self.carrier_busy_until(head) {
            return Verdict::CarrierBusy { clear_at };
        }
        Verdict::Clear
    }

    /// 载波侦听：逆序扫描成功记录，检查其他站的信号是否恰在候选
    /// 发起时刻覆盖发送方所在位置。返回介质转清时刻，None 表示空闲。
    ///
    /// 某条记录一旦满足 arrival + max_delay + tx_delay <= 候选到达时间，
    /// 其信号不可能再覆盖任何站点的侦听窗口；记录按完成顺序追加、到达
    /// 时间非降，更早的记录同理，扫描到此为止。
    fn carrier_busy_until(&self, head: &Attempt) -> Option<SimTime> {
        let sender = &self.stations[head.station.0];
        for prev in self.report.transmitted.iter().rev() {
            if prev
                .arrival
                .saturating_add(self.max_delay)
                .saturating_add(prev.tx_delay)
                <= head.arrival
            {
                break;
            }
            if prev.station == head.station {
                continue;
            }
            let first_bit = prev.arrival.saturating_add(sender.delay_to(prev.station));
            let clear = first_bit.saturating_add(prev.tx_delay);
            if head.arrival > first_bit && head.arrival < clear {
                trace!(
                    blocker = prev.id,
                    window_start = ?first_bit,
                    window_end = ?clear,
                    "侦听窗口命中"
                );
                return Some(clear);
            }
        }
        None
    }

    /// 碰撞判定：某对端队首若在候选首 bit 抵达对端之前（含同时）
    /// 已经开始发送，双方信号必然在介质上交叠。候选持有全局最小
    /// 到达时间，该判定因此对称。
    fn colliding_peers(&self, head: &Attempt) -> Vec<StationId> {
        let sender = &self.stations[head.station.0];
        let mut peers = Vec::new();
        for other in &self.stations {
            if other.id() == head.station {
                continue;
            }
            let Some(peer_head) = other.head() else { continue };
            let first_bit_at_peer = head.arrival.saturating_add(sender.delay_to(other.id()));
            if peer_head.arrival <= first_bit_at_peer {
                peers.push(other.id());
            }
        }
        peers
    }

    /// 发送成功：移入成功记录，清零重试计数，
    /// 同站后续尝试的时间下限抬升到发送结束时刻。
    fn on_transmit(&mut self, sender: StationId) {
        let station = &mut self.stations[sender.0];
        let attempt = station.pop_head().expect("dispatch checked head");
        station.collisions = 0;
        station.carrier_failures = 0;
        station.raise_floor(attempt.tx_end());
        debug!(
            attempt = attempt.id,
            station = sender.0,
            done = ?attempt.tx_end(),
            "📡 发送成功"
        );
        self.report.transmitted.push(attempt);
    }

    /// 载波失败分派：persistent 贴着介质转清时刻重试，不计重试；
    /// non-persistent 计数、退避，超限丢弃。
    fn on_carrier_busy(&mut self, sender: StationId, clear_at: SimTime, src: &mut dyn RandomSource) {
        self.report.carrier_fail_events += 1;
        let retry_max = self.cfg.retry_max;
        let rate_bps = self.cfg.rate_bps;
        let station = &mut self.stations[sender.0];
        match self.cfg.policy {
            CsmaPolicy::Persistent => {
                station.reschedule_head(clear_at);
                debug!(station = sender.0, retry_at = ?clear_at, "载波忙，坚持等待");
            }
            CsmaPolicy::NonPersistent => {
                station.carrier_failures += 1;
                if station.carrier_failures > retry_max {
                    station.carrier_failures = 0;
                    let attempt = station.pop_head().expect("dispatch checked head");
                    debug!(attempt = attempt.id, station = sender.0, "🗑️ 载波重试耗尽，丢弃");
                    self.report.dropped.push(attempt);
                    return;
                }
                let retry = station.carrier_failures.min(retry_max);
                let wait = backoff(src, retry, rate_bps);
                let own = station.head().expect("dispatch checked head").arrival;
                let at = own.saturating_add(wait);
                station.reschedule_head(at);
                debug!(station = sender.0, retry, retry_at = ?at, "载波忙，退避重试");
            }
        }
    }

    /// 碰撞处理：候选与全部碰撞对端各自计数并按上限丢弃；幸存者
    /// 对齐到最晚参与者的时间戳后，再叠加各自的随机退避。
    fn on_collision(&mut self, sender: StationId, peers: Vec<StationId>, src: &mut dyn RandomSource) {
        self.report.collision_events += 1;
        let latest = std::iter::once(&sender)
            .chain(peers.iter())
            .filter_map(|id| self.stations[id.0].head())
            .map(|a| a.arrival)
            .max()
            .expect("collision participants have heads");
        debug!(
            station = sender.0,
            peers = peers.len(),
            latest = ?latest,
            "💥 检测到碰撞"
        );

        for id in std::iter::once(sender).chain(peers) {
            let retry_max = self.cfg.retry_max;
            let station = &mut self.stations[id.0];
            station.collisions += 1;
            if station.collisions > retry_max {
                station.collisions = 0;
                let attempt = station.pop_head().expect("collision participant has a head");
                debug!(attempt = attempt.id, station = id.0, "🗑️ 碰撞重试耗尽，丢弃");
                self.report.dropped.push(attempt);
                continue;
            }
            let retry = station.collisions.min(retry_max);
            let wait = backoff(src, retry, self.cfg.rate_bps);
            let own = station
                .head()
                .expect("collision participant has a head")
                .arrival;
            let at = own.max(latest).saturating_add(wait);
            station.reschedule_head(at);
            trace!(station = id.0, retry, retry_at = ?at, "碰撞退避重排");
        }
    }
}
