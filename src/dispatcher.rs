use crate::clock::Clock;
use crate::cpu::Cpu;
use crate::ready_queue::ReadyQueue;
use crate::schedulers::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Idle,
    Interrupted,
}

/// A context switch performed by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switch {
    /// Preempted PCB, `None` when the CPU was idle
    pub from: Option<u32>,
    pub to: u32,
}

/// Moves PCBs between the ready queue and the CPU when the scheduler asks.
#[derive(Debug)]
pub struct Dispatcher {
    state: DispatcherState,
}

impl Dispatcher {
    pub fn new() -> Self {
        Dispatcher {
            state: DispatcherState::Idle,
        }
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    pub fn is_interrupted(&self) -> bool {
        self.state == DispatcherState::Interrupted
    }

    pub fn interrupt(&mut self) {
        self.state = DispatcherState::Interrupted;
    }

    /// Performs at most one switch, to the queue index the scheduler picked.
    /// A preempted PCB is charged one clock step of wait and goes to the tail
    /// of the ready queue. The interrupt is always cleared.
    pub fn execute(
        &mut self,
        scheduler: &Scheduler,
        queue: &mut ReadyQueue,
        cpu: &mut Cpu,
        clock: &Clock,
    ) -> Option<Switch> {
        if !self.is_interrupted() {
            return None;
        }
        self.state = DispatcherState::Idle;

        let pcb = scheduler.next_index().and_then(|index| queue.remove(index))?;
        let to = pcb.pid();
        let from = cpu.switch_to(pcb).map(|mut old| {
            old.preempt(clock.step());
            let pid = old.pid();
            queue.add_end(old);
            pid
        });

        match from {
            Some(from) => log::debug!("{}: switch {} -> {}", clock.now(), from, to),
            None => log::debug!("{}: dispatch {}", clock.now(), to),
        }
        Some(Switch { from, to })
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{Pcb, ProcState};
    use crate::schedulers::Policy;

    fn setup(policy: Policy, pids: &[(u32, f64)]) -> (Scheduler, ReadyQueue) {
        let mut queue = ReadyQueue::new();
        for &(pid, burst) in pids {
            queue.add_end(Pcb::new(pid, 0.0, burst, 0));
        }
        (Scheduler::new(policy), queue)
    }

    #[test]
    fn not_interrupted_is_a_noop() {
        let clock = Clock::new();
        let (scheduler, mut queue) = setup(Policy::Fcfs, &[(0, 1.0)]);
        let mut cpu = Cpu::new();
        let mut dispatcher = Dispatcher::new();

        assert_eq!(dispatcher.execute(&scheduler, &mut queue, &mut cpu, &clock), None);
        assert!(cpu.is_idle());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn loads_idle_cpu_without_charging_anyone() {
        let clock = Clock::new();
        let (mut scheduler, mut queue) = setup(Policy::Fcfs, &[(0, 1.0), (1, 1.0)]);
        let mut cpu = Cpu::new();
        let mut dispatcher = Dispatcher::new();

        scheduler.evaluate(clock.step(), &queue, &cpu, &mut dispatcher);
        assert_eq!(dispatcher.state(), DispatcherState::Interrupted);

        let switch = dispatcher.execute(&scheduler, &mut queue, &mut cpu, &clock);
        assert_eq!(switch, Some(Switch { from: None, to: 0 }));
        assert_eq!(dispatcher.state(), DispatcherState::Idle);

        let running = cpu.running().unwrap();
        assert_eq!(running.state(), ProcState::Running);
        assert_eq!(running.switches(), 0);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn preempted_pcb_goes_to_tail() {
        let clock = Clock::new();
        let (mut scheduler, mut queue) = setup(Policy::Srtf, &[(1, 4.0), (2, 1.0)]);
        let mut cpu = Cpu::new();
        cpu.switch_to(Pcb::new(0, 0.0, 3.0, 0));
        let mut dispatcher = Dispatcher::new();

        scheduler.evaluate(clock.step(), &queue, &cpu, &mut dispatcher);
        let switch = dispatcher.execute(&scheduler, &mut queue, &mut cpu, &clock);
        assert_eq!(switch, Some(Switch { from: Some(0), to: 2 }));

        let pids: Vec<u32> = queue.iter().map(|p| p.pid()).collect();
        assert_eq!(pids, vec![1, 0]);
        let preempted = queue.get(1).unwrap();
        assert_eq!(preempted.switches(), 1);
        assert_eq!(preempted.wait(), clock.step());
        assert_eq!(preempted.state(), ProcState::Ready);
    }
}
