/// Simulated time advanced per tick.
pub const TICK: f64 = 0.5;

/// Global simulated time source.
///
/// Only the driving loop advances the clock, once per tick, after dispatch
/// and CPU execution have run.
#[derive(Debug, Clone)]
pub struct Clock {
    time: f64,
    step: f64,
}

impl Clock {
    pub fn new() -> Self {
        Clock::with_step(TICK)
    }

    pub fn with_step(step: f64) -> Self {
        assert!(step > 0.0, "clock step must be positive");
        Clock { time: 0.0, step }
    }

    pub fn now(&self) -> f64 {
        self.time
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn advance(&mut self) {
        self.time += self.step;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::new()
    }
}
