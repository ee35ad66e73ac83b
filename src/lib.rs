//! Discrete-time simulation of single-CPU process scheduling.
//!
//! Every tick runs in a fixed order: arrivals are admitted to the ready
//! queue, the scheduler evaluates its policy, the dispatcher performs at
//! most one context switch, the CPU runs its process for one clock step,
//! statistics are recorded and the clock advances.

pub mod clock;
pub mod config;
pub mod cpu;
pub mod dispatcher;
pub mod error;
pub mod generator;
pub mod logger;
pub mod process;
pub mod rand_generator;
pub mod ready_queue;
pub mod schedulers;
pub mod simulation;
pub mod stats;

pub use clock::{Clock, TICK};
pub use config::{RandomChoice, SimConfig};
pub use cpu::Cpu;
pub use dispatcher::{Dispatcher, DispatcherState, Switch};
pub use error::{InputError, ParsePolicyError};
pub use generator::{Arrivals, PcbGenerator};
pub use process::{Pcb, ProcState};
pub use rand_generator::{RandGenerator, RandomSource, XorShift};
pub use ready_queue::ReadyQueue;
pub use schedulers::{Policy, Scheduler};
pub use simulation::{Simulation, Tick};
pub use stats::{ProcessStats, Report, Snapshot, StatUpdater, Summary};
