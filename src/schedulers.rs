use crate::cpu::Cpu;
use crate::dispatcher::Dispatcher;
use crate::error::ParsePolicyError;
use crate::rand_generator::{RandomSource, XorShift};
use crate::ready_queue::ReadyQueue;
use std::fmt;
use std::str::FromStr;

/// Scheduling policy, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Policy {
    /// First come first served, non-preemptive
    Fcfs,
    /// Shortest remaining time first
    Srtf,
    RoundRobin { quantum: f64 },
    /// Preemptive priority, round robin among equal priorities
    PriorityPreemptive { quantum: f64 },
    /// Random pick whenever the CPU idles or the quantum expires
    PriorityRandom { quantum: f64 },
}

impl Policy {
    pub fn quantum(&self) -> Option<f64> {
        match *self {
            Policy::Fcfs | Policy::Srtf => None,
            Policy::RoundRobin { quantum }
            | Policy::PriorityPreemptive { quantum }
            | Policy::PriorityRandom { quantum } => Some(quantum),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Srtf => "SRTF",
            Policy::RoundRobin { .. } => "RR",
            Policy::PriorityPreemptive { .. } => "PP",
            Policy::PriorityRandom { .. } => "PR",
        }
    }

    /// Only the random policy may differ between runs on the same input.
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, Policy::PriorityRandom { .. })
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quantum() {
            Some(quantum) => write!(f, "{} {}", self.name(), quantum),
            None => write!(f, "{}", self.name()),
        }
    }
}

impl FromStr for Policy {
    type Err = ParsePolicyError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let err = || ParsePolicyError(spec.to_string());
        let (name, quantum) = match spec.split_once(':') {
            Some((name, quantum)) => {
                let quantum: f64 = quantum.parse().map_err(|_| err())?;
                if !(quantum > 0.0) || !quantum.is_finite() {
                    return Err(err());
                }
                (name, Some(quantum))
            }
            None => (spec, None),
        };

        match (name.to_ascii_uppercase().as_str(), quantum) {
            ("FCFS", None) => Ok(Policy::Fcfs),
            ("SRTF", None) => Ok(Policy::Srtf),
            ("RR", Some(quantum)) => Ok(Policy::RoundRobin { quantum }),
            ("PP", Some(quantum)) => Ok(Policy::PriorityPreemptive { quantum }),
            ("PR", Some(quantum)) => Ok(Policy::PriorityRandom { quantum }),
            _ => Err(err()),
        }
    }
}

/// Policy engine. Evaluated once per tick; when a switch is warranted it
/// records the ready-queue index to load and interrupts the dispatcher.
pub struct Scheduler {
    policy: Policy,
    timer: f64,
    next_index: Option<usize>,
    rng: Box<dyn RandomSource>,
}

impl Scheduler {
    pub fn new(policy: Policy) -> Self {
        Scheduler::with_random(policy, Box::new(XorShift::from_time()))
    }

    pub fn with_random(policy: Policy, rng: Box<dyn RandomSource>) -> Self {
        Scheduler {
            policy,
            timer: policy.quantum().unwrap_or(0.0),
            next_index: None,
            rng,
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Ready-queue index chosen by the last switch decision.
    pub fn next_index(&self) -> Option<usize> {
        self.next_index
    }

    /// Time left in the current quantum.
    pub fn timer(&self) -> f64 {
        self.timer
    }

    fn expired(&self) -> bool {
        self.timer <= 0.0
    }

    pub fn evaluate(
        &mut self,
        step: f64,
        queue: &ReadyQueue,
        cpu: &Cpu,
        dispatcher: &mut Dispatcher,
    ) {
        if self.timer > 0.0 {
            self.timer -= step;
        }
        if queue.is_empty() {
            return;
        }

        let policy = self.policy;
        let target = match policy {
            Policy::Fcfs => self.fcfs(cpu),
            Policy::Srtf => self.srtf(queue, cpu),
            Policy::RoundRobin { .. } => self.rr(cpu),
            Policy::PriorityPreemptive { .. } => self.pp(queue, cpu),
            Policy::PriorityRandom { .. } => self.pr(queue, cpu),
        };

        if let Some(index) = target {
            log::trace!("{}: {} --> {}", policy.name(), queue, index);
            self.next_index = Some(index);
            if let Some(quantum) = policy.quantum() {
                self.timer = quantum;
            }
            dispatcher.interrupt();
        }
    }

    fn fcfs(&self, cpu: &Cpu) -> Option<usize> {
        cpu.is_idle().then(|| 0)
    }

    fn srtf(&self, queue: &ReadyQueue, cpu: &Cpu) -> Option<usize> {
        let (mut shortest, mut index) = match cpu.running() {
            Some(pcb) => (pcb.remaining(), None),
            None => (queue.head()?.remaining(), Some(0)),
        };

        // strictly less keeps the earlier entry (or the incumbent) on ties
        for (i, pcb) in queue.iter().enumerate() {
            if pcb.remaining() < shortest {
                shortest = pcb.remaining();
                index = Some(i);
            }
        }
        index
    }

    fn rr(&self, cpu: &Cpu) -> Option<usize> {
        (cpu.is_idle() || self.expired()).then(|| 0)
    }

    fn pp(&self, queue: &ReadyQueue, cpu: &Cpu) -> Option<usize> {
        // min_by_key returns the first of equal minima
        let (index, best) = queue.iter().enumerate().min_by_key(|(_, pcb)| pcb.priority())?;

        match cpu.running() {
            None => Some(index),
            Some(running) if best.priority() < running.priority() => Some(index),
            Some(running) if best.priority() == running.priority() && self.expired() => {
                Some(index)
            }
            Some(_) => None,
        }
    }

    fn pr(&mut self, queue: &ReadyQueue, cpu: &Cpu) -> Option<usize> {
        if cpu.is_idle() || self.expired() {
            Some(self.rng.next_index(queue.len()))
        } else {
            None
        }
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("policy", &self.policy)
            .field("timer", &self.timer)
            .field("next_index", &self.next_index)
            .finish()
    }
}
