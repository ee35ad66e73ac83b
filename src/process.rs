use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    /// Generated, arrival time not reached yet
    New,
    Ready,
    Running,
    Finished,
}

/// Process control block.
///
/// Lower `priority` values mean higher priority. `wait` only holds the time
/// charged by the dispatcher on preemption; time spent sitting in the ready
/// queue is accounted by the stats collector.
#[derive(Debug, Clone, PartialEq)]
pub struct Pcb {
    pid: u32,
    arrival: f64,
    burst: f64,
    remaining: f64,
    priority: i32,

    state: ProcState,
    wait: f64,
    switches: u32,
    finish: Option<f64>,
}

impl Pcb {
    pub fn new(pid: u32, arrival: f64, burst: f64, priority: i32) -> Pcb {
        Pcb {
            pid,
            arrival,
            burst,
            remaining: burst,
            priority,
            state: ProcState::New,
            wait: 0.0,
            switches: 0,
            finish: None,
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn arrival(&self) -> f64 {
        self.arrival
    }

    pub fn burst(&self) -> f64 {
        self.burst
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn state(&self) -> ProcState {
        self.state
    }

    pub fn wait(&self) -> f64 {
        self.wait
    }

    pub fn switches(&self) -> u32 {
        self.switches
    }

    /// Time at which the process retired, `None` until `Finished`.
    pub fn finish(&self) -> Option<f64> {
        self.finish
    }

    pub fn turnaround(&self) -> Option<f64> {
        self.finish.map(|finish| finish - self.arrival)
    }

    pub(crate) fn admit(&mut self) {
        self.state = ProcState::Ready;
    }

    pub(crate) fn load(&mut self) {
        self.state = ProcState::Running;
    }

    /// Taken off the CPU before completion; the switch itself costs one step.
    pub(crate) fn preempt(&mut self, step: f64) {
        self.switches += 1;
        self.wait += step;
        self.state = ProcState::Ready;
    }

    /// Runs for `step` time units. Returns true once the burst is exhausted.
    pub(crate) fn run_for(&mut self, step: f64) -> bool {
        self.remaining = (self.remaining - step).max(0.0);
        self.remaining == 0.0
    }

    pub(crate) fn retire(&mut self, at: f64) {
        self.state = ProcState::Finished;
        self.finish = Some(at);
    }
}

impl fmt::Display for Pcb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{}[at={} rem={} prio={}]",
            self.pid, self.arrival, self.remaining, self.priority
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pcb_is_untouched() {
        let pcb = Pcb::new(3, 1.5, 4.0, 2);
        assert_eq!(pcb.state(), ProcState::New);
        assert_eq!(pcb.remaining(), 4.0);
        assert_eq!(pcb.wait(), 0.0);
        assert_eq!(pcb.switches(), 0);
        assert_eq!(pcb.finish(), None);
    }

    #[test]
    fn remaining_never_goes_negative() {
        let mut pcb = Pcb::new(0, 0.0, 0.7, 0);
        assert!(!pcb.run_for(0.5));
        assert!(pcb.run_for(0.5));
        assert_eq!(pcb.remaining(), 0.0);
    }

    #[test]
    fn preemption_charges_one_step() {
        let mut pcb = Pcb::new(0, 0.0, 3.0, 0);
        pcb.load();
        pcb.preempt(0.5);
        pcb.load();
        pcb.preempt(0.5);
        assert_eq!(pcb.switches(), 2);
        assert_eq!(pcb.wait(), 1.0);
        assert_eq!(pcb.state(), ProcState::Ready);
    }

    #[test]
    fn turnaround_after_retire() {
        let mut pcb = Pcb::new(1, 2.0, 1.0, 0);
        assert_eq!(pcb.turnaround(), None);
        pcb.retire(5.5);
        assert_eq!(pcb.state(), ProcState::Finished);
        assert_eq!(pcb.turnaround(), Some(3.5));
    }
}
