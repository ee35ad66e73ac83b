use crate::error::InputError;
use crate::process::Pcb;
use std::collections::{HashSet, VecDeque};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Pull interface for arriving processes, delivered in arrival order.
pub trait Arrivals {
    /// No more processes will ever be delivered.
    fn finished(&self) -> bool;

    /// Hands out the next process if its arrival time has been reached.
    fn pull(&mut self, now: f64) -> Result<Option<Pcb>, InputError>;
}

/// Pre-built arrival lists are delivered as-is, without validation.
impl Arrivals for VecDeque<Pcb> {
    fn finished(&self) -> bool {
        self.is_empty()
    }

    fn pull(&mut self, now: f64) -> Result<Option<Pcb>, InputError> {
        match self.front() {
            Some(pcb) if pcb.arrival() <= now => Ok(self.pop_front()),
            _ => Ok(None),
        }
    }
}

/// Reads and validates the process list one record ahead of the clock.
///
/// Each record is `pid arrival burst priority`. Lines starting with `#`
/// and lines of at most two characters are skipped; a line with fewer than
/// four finite numbers ends the input.
pub struct PcbGenerator<R> {
    reader: R,
    line: usize,
    next: Option<Pcb>,
    last_arrival: Option<f64>,
    pids: HashSet<u32>,
}

impl PcbGenerator<BufReader<File>> {
    pub fn open(filename: &Path) -> Result<Self, InputError> {
        let file = File::open(filename)?;
        PcbGenerator::new(BufReader::new(file))
    }
}

impl<R: BufRead> PcbGenerator<R> {
    pub fn new(reader: R) -> Result<Self, InputError> {
        let mut generator = PcbGenerator {
            reader,
            line: 0,
            next: None,
            last_arrival: None,
            pids: HashSet::new(),
        };
        generator.next = generator.read_next()?;
        Ok(generator)
    }

    fn read_next(&mut self) -> Result<Option<Pcb>, InputError> {
        let mut text = String::new();
        loop {
            text.clear();
            if self.reader.read_line(&mut text)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let line = text.trim_end_matches(|c: char| c == '\n' || c == '\r');
            if line.len() <= 2 || line.starts_with('#') {
                continue;
            }

            let vals: Vec<f64> = line
                .split_whitespace()
                .take(4)
                .map_while(|word| word.parse::<f64>().ok().filter(|v| v.is_finite()))
                .collect();
            if vals.len() < 4 {
                log::debug!("line {}: incomplete record, end of input", self.line);
                return Ok(None);
            }

            return self.validate(vals[0], vals[1], vals[2], vals[3]).map(Some);
        }
    }

    fn validate(
        &mut self,
        pid: f64,
        arrival: f64,
        burst: f64,
        priority: f64,
    ) -> Result<Pcb, InputError> {
        let line = self.line;
        if pid < 0.0 || pid.fract() != 0.0 || pid > u32::MAX as f64 {
            return Err(InputError::InvalidPid { line, value: pid });
        }
        let pid = pid as u32;

        if arrival < 0.0 {
            return Err(InputError::NegativeArrival { line, arrival });
        }
        if burst <= 0.0 {
            return Err(InputError::NonPositiveBurst { line, burst });
        }
        if let Some(previous) = self.last_arrival {
            if arrival < previous {
                return Err(InputError::UnsortedArrival {
                    line,
                    arrival,
                    previous,
                });
            }
        }
        if self.pids.contains(&pid) {
            return Err(InputError::DuplicatePid { line, pid });
        }
        // sorted input puts any repeated arrival right after its twin
        if self.last_arrival == Some(arrival) {
            return Err(InputError::DuplicateArrival { line, arrival });
        }

        self.pids.insert(pid);
        self.last_arrival = Some(arrival);
        Ok(Pcb::new(pid, arrival, burst, priority as i32))
    }
}

impl<R: BufRead> Arrivals for PcbGenerator<R> {
    fn finished(&self) -> bool {
        self.next.is_none()
    }

    fn pull(&mut self, now: f64) -> Result<Option<Pcb>, InputError> {
        match &self.next {
            Some(pcb) if pcb.arrival() <= now => {}
            _ => return Ok(None),
        }
        let upcoming = self.read_next()?;
        Ok(std::mem::replace(&mut self.next, upcoming))
    }
}
