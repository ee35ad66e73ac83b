use crate::process::Pcb;
use crate::ready_queue::ReadyQueue;
use crate::schedulers::Policy;
use std::collections::HashMap;
use std::fmt;

/// Read-only view of the simulation taken at the end of a tick, after the
/// CPU has run.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub now: f64,
    pub step: f64,
    pub ready: &'a ReadyQueue,
    pub running: Option<&'a Pcb>,
    pub finished: &'a [Pcb],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessStats {
    pub pid: u32,
    pub arrival: f64,
    pub burst: f64,
    pub priority: i32,
    pub finish: f64,
    pub turnaround: f64,
    pub wait: f64,
    pub switches: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub policy: Policy,
    pub total_time: f64,
    pub avg_wait: f64,
    pub avg_turnaround: f64,
    pub context_switches: u32,
    pub cpu_utilization: f64,
    pub throughput: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub processes: Vec<ProcessStats>,
    pub summary: Summary,
}

/// Collects per-tick observations and turns them into the final report.
///
/// A process accrues wait for every tick it is seen sitting in the ready
/// queue, plus whatever the dispatcher charged it for being switched out.
#[derive(Debug, Default)]
pub struct StatUpdater {
    queued: HashMap<u32, f64>,
    retired: usize,
    busy: f64,
    elapsed: f64,
}

impl StatUpdater {
    pub fn new() -> Self {
        StatUpdater::default()
    }

    pub fn observe(&mut self, snapshot: &Snapshot) {
        for pcb in snapshot.ready.iter() {
            *self.queued.entry(pcb.pid()).or_insert(0.0) += snapshot.step;
        }
        // a process that retired this tick still used the CPU for it
        if snapshot.running.is_some() || snapshot.finished.len() > self.retired {
            self.busy += snapshot.step;
        }
        self.retired = snapshot.finished.len();
        self.elapsed = snapshot.now + snapshot.step;
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn busy(&self) -> f64 {
        self.busy
    }

    /// Time `pid` has spent in the ready queue so far.
    pub fn queued(&self, pid: u32) -> f64 {
        self.queued.get(&pid).copied().unwrap_or(0.0)
    }

    pub fn report(&self, policy: Policy, finished: &[Pcb]) -> Report {
        let mut processes: Vec<ProcessStats> = finished
            .iter()
            .map(|pcb| {
                let finish = pcb.finish().unwrap_or(self.elapsed);
                ProcessStats {
                    pid: pcb.pid(),
                    arrival: pcb.arrival(),
                    burst: pcb.burst(),
                    priority: pcb.priority(),
                    finish,
                    turnaround: finish - pcb.arrival(),
                    wait: self.queued(pcb.pid()) + pcb.wait(),
                    switches: pcb.switches(),
                }
            })
            .collect();
        processes.sort_by_key(|p| p.pid);

        let count = processes.len() as f64;
        let average = |total: f64| if count > 0.0 { total / count } else { 0.0 };
        let per_time = |value: f64| {
            if self.elapsed > 0.0 {
                value / self.elapsed
            } else {
                0.0
            }
        };

        let summary = Summary {
            policy,
            total_time: self.elapsed,
            avg_wait: average(processes.iter().map(|p| p.wait).sum()),
            avg_turnaround: average(processes.iter().map(|p| p.turnaround).sum()),
            context_switches: processes.iter().map(|p| p.switches).sum(),
            cpu_utilization: per_time(self.busy),
            throughput: per_time(count),
        };

        Report { processes, summary }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary.policy)?;
        writeln!(
            f,
            "{:>5}: {:>7} {:>7} {:>4} {:>7} {:>7} {:>7} {:>4}",
            "PID", "AT", "BURST", "PRIO", "FT", "TT", "WT", "CS"
        )?;
        for p in &self.processes {
            writeln!(
                f,
                "{:5}: {:7.1} {:7.1} {:4} {:7.1} {:7.1} {:7.1} {:4}",
                p.pid, p.arrival, p.burst, p.priority, p.finish, p.turnaround, p.wait, p.switches
            )?;
        }
        let s = &self.summary;
        writeln!(
            f,
            "SUM: {:.1} {:.2} {:.2} {} {:.4} {:.4}",
            s.total_time,
            s.avg_wait,
            s.avg_turnaround,
            s.context_switches,
            s.cpu_utilization,
            s.throughput
        )
    }
}
