use crate::clock::Clock;
use crate::process::Pcb;

/// The single CPU slot. The only place a PCB's remaining time changes.
#[derive(Debug, Default)]
pub struct Cpu {
    pcb: Option<Pcb>,
}

impl Cpu {
    pub fn new() -> Self {
        Cpu { pcb: None }
    }

    pub fn is_idle(&self) -> bool {
        self.pcb.is_none()
    }

    pub fn running(&self) -> Option<&Pcb> {
        self.pcb.as_ref()
    }

    /// Installs `pcb` and hands back whatever was running before.
    pub(crate) fn switch_to(&mut self, mut pcb: Pcb) -> Option<Pcb> {
        pcb.load();
        self.pcb.replace(pcb)
    }

    /// Runs the loaded PCB for one clock step. A PCB whose burst runs out is
    /// retired at the end of this tick and returned; the slot goes idle.
    pub fn tick(&mut self, clock: &Clock) -> Option<Pcb> {
        let done = match self.pcb.as_mut() {
            Some(pcb) => pcb.run_for(clock.step()),
            None => return None,
        };
        if !done {
            return None;
        }

        let mut pcb = self.pcb.take()?;
        pcb.retire(clock.now() + clock.step());
        Some(pcb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcState;

    #[test]
    fn idle_tick_does_nothing() {
        let mut cpu = Cpu::new();
        assert!(cpu.is_idle());
        assert!(cpu.tick(&Clock::new()).is_none());
        assert!(cpu.running().is_none());
    }

    #[test]
    fn retires_when_burst_exhausted() {
        let mut clock = Clock::new();
        let mut cpu = Cpu::new();
        assert!(cpu.switch_to(Pcb::new(0, 0.0, 1.0, 0)).is_none());
        assert_eq!(cpu.running().map(|p| p.state()), Some(ProcState::Running));

        assert!(cpu.tick(&clock).is_none());
        assert_eq!(cpu.running().map(|p| p.remaining()), Some(0.5));
        clock.advance();

        let done = cpu.tick(&clock).expect("burst should be exhausted");
        assert!(cpu.is_idle());
        assert_eq!(done.state(), ProcState::Finished);
        assert_eq!(done.finish(), Some(1.0));
    }

    #[test]
    fn switch_returns_previous_occupant() {
        let mut cpu = Cpu::new();
        cpu.switch_to(Pcb::new(0, 0.0, 2.0, 0));
        let old = cpu.switch_to(Pcb::new(1, 0.0, 2.0, 0)).unwrap();
        assert_eq!(old.pid(), 0);
        assert_eq!(cpu.running().map(|p| p.pid()), Some(1));
    }
}
