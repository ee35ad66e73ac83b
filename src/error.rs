use std::error::Error;
use std::fmt;
use std::io;

/// Fatal problems found while reading the process list. Any of these aborts
/// the whole run before another tick is simulated.
#[derive(Debug)]
pub enum InputError {
    Io(io::Error),
    InvalidPid { line: usize, value: f64 },
    NegativeArrival { line: usize, arrival: f64 },
    NonPositiveBurst { line: usize, burst: f64 },
    UnsortedArrival { line: usize, arrival: f64, previous: f64 },
    DuplicatePid { line: usize, pid: u32 },
    DuplicateArrival { line: usize, arrival: f64 },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Io(err) => write!(f, "failed to read input: {}", err),
            InputError::InvalidPid { line, value } => write!(
                f,
                "line {}: PID must be a non-negative integer, got {}",
                line, value
            ),
            InputError::NegativeArrival { line, arrival } => write!(
                f,
                "line {}: arrival time can't be less than zero ({})",
                line, arrival
            ),
            InputError::NonPositiveBurst { line, burst } => write!(
                f,
                "line {}: CPU burst time must be greater than 0 ({})",
                line, burst
            ),
            InputError::UnsortedArrival {
                line,
                arrival,
                previous,
            } => write!(
                f,
                "line {}: input must be sorted by arrival time ({} after {})",
                line, arrival, previous
            ),
            InputError::DuplicatePid { line, pid } => {
                write!(f, "line {}: duplicate PID {}", line, pid)
            }
            InputError::DuplicateArrival { line, arrival } => {
                write!(f, "line {}: duplicate arrival time {}", line, arrival)
            }
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InputError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for InputError {
    fn from(err: io::Error) -> Self {
        InputError::Io(err)
    }
}

/// A scheduler specification that names no known policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePolicyError(pub String);

impl fmt::Display for ParsePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid scheduler specification: {}. Must be one of FCFS, SRTF, RR:<q>, PP:<q> or PR:<q>",
            self.0
        )
    }
}

impl Error for ParsePolicyError {}
