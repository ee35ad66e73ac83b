use crate::clock::Clock;
use crate::cpu::Cpu;
use crate::dispatcher::{Dispatcher, Switch};
use crate::error::InputError;
use crate::generator::Arrivals;
use crate::process::Pcb;
use crate::ready_queue::ReadyQueue;
use crate::schedulers::Scheduler;
use crate::stats::{Report, Snapshot, StatUpdater};

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tick {
    pub time: f64,
    pub arrived: Vec<u32>,
    pub switch: Option<Switch>,
    pub retired: Option<u32>,
}

/// The driving loop. Owns every PCB for the whole run and moves them
/// between the arrival source, the ready queue, the CPU and the finished set.
pub struct Simulation<A> {
    clock: Clock,
    arrivals: A,
    queue: ReadyQueue,
    cpu: Cpu,
    scheduler: Scheduler,
    dispatcher: Dispatcher,
    finished: Vec<Pcb>,
    stats: StatUpdater,
}

impl<A: Arrivals> Simulation<A> {
    pub fn new(arrivals: A, scheduler: Scheduler) -> Self {
        Simulation::with_clock(arrivals, scheduler, Clock::new())
    }

    pub fn with_clock(arrivals: A, scheduler: Scheduler, clock: Clock) -> Self {
        Simulation {
            clock,
            arrivals,
            queue: ReadyQueue::new(),
            cpu: Cpu::new(),
            scheduler,
            dispatcher: Dispatcher::new(),
            finished: Vec::new(),
            stats: StatUpdater::new(),
        }
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn ready_queue(&self) -> &ReadyQueue {
        &self.queue
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Retired PCBs in completion order.
    pub fn finished(&self) -> &[Pcb] {
        &self.finished
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            now: self.clock.now(),
            step: self.clock.step(),
            ready: &self.queue,
            running: self.cpu.running(),
            finished: &self.finished,
        }
    }

    /// Nothing left to arrive, wait or run.
    pub fn is_done(&self) -> bool {
        self.arrivals.finished() && self.queue.is_empty() && self.cpu.is_idle()
    }

    /// Runs one tick: admit arrivals, evaluate the policy, dispatch, run the
    /// CPU, record statistics, advance the clock.
    pub fn step(&mut self) -> Result<Tick, InputError> {
        let now = self.clock.now();
        let mut tick = Tick {
            time: now,
            ..Tick::default()
        };

        // at most one admission per tick
        if let Some(mut pcb) = self.arrivals.pull(now)? {
            log::debug!("{}: {} arrives", now, pcb);
            pcb.admit();
            tick.arrived.push(pcb.pid());
            self.queue.add_end(pcb);
        }

        self.scheduler
            .evaluate(self.clock.step(), &self.queue, &self.cpu, &mut self.dispatcher);
        tick.switch =
            self.dispatcher
                .execute(&self.scheduler, &mut self.queue, &mut self.cpu, &self.clock);

        if let Some(pcb) = self.cpu.tick(&self.clock) {
            log::debug!("{}: {} finished", now, pcb.pid());
            tick.retired = Some(pcb.pid());
            self.finished.push(pcb);
        }

        let snapshot = Snapshot {
            now,
            step: self.clock.step(),
            ready: &self.queue,
            running: self.cpu.running(),
            finished: &self.finished,
        };
        self.stats.observe(&snapshot);
        log::trace!("{}: ready {}", now, self.queue);

        self.clock.advance();
        Ok(tick)
    }

    /// Steps until done. Any input error aborts the run without a report.
    pub fn run(mut self) -> Result<Report, InputError> {
        log::info!("running {}", self.scheduler.policy());
        while !self.is_done() {
            self.step()?;
        }
        Ok(self.report())
    }

    pub fn report(&self) -> Report {
        self.stats.report(self.scheduler.policy(), &self.finished)
    }
}
