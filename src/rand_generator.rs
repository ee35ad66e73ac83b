use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of random ready-queue positions for the random policy.
pub trait RandomSource {
    /// Returns a value in `0..bound`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Replays numbers from a random-number file.
///
/// The first line holds the count, the following lines the numbers. Once
/// the list is used up it starts over from the beginning.
pub struct RandGenerator {
    values: Vec<u64>,
    offset: usize,
}

impl RandGenerator {
    pub fn new(filename: &Path) -> io::Result<Self> {
        let file = File::open(filename)?;
        let values = read_values(BufReader::new(file))?;
        RandGenerator::from_values(values)
    }

    pub fn from_values(values: Vec<u64>) -> io::Result<Self> {
        if values.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "random file holds no numbers",
            ));
        }
        Ok(RandGenerator {
            values,
            offset: 0,
        })
    }

    pub fn get_rand(&mut self) -> u64 {
        let value = self.values[self.offset];
        self.offset = (self.offset + 1) % self.values.len();
        value
    }
}

impl RandomSource for RandGenerator {
    fn next_index(&mut self, bound: usize) -> usize {
        (self.get_rand() % bound as u64) as usize
    }
}

fn read_values<R: BufRead>(reader: R) -> io::Result<Vec<u64>> {
    let invalid = |what: &str| io::Error::new(io::ErrorKind::InvalidData, what.to_string());

    let mut lines = reader.lines();
    let count: usize = lines
        .next()
        .ok_or_else(|| invalid("random file is empty"))??
        .trim()
        .parse()
        .map_err(|_| invalid("failed to parse the number of random numbers"))?;

    let mut values = Vec::with_capacity(count);
    for line in lines {
        let line = line?;
        for word in line.split_whitespace() {
            if values.len() == count {
                return Ok(values);
            }
            let value = word
                .parse()
                .map_err(|_| invalid("failed to parse a random number"))?;
            values.push(value);
        }
    }
    Ok(values)
}

/// Seeded xorshift64 generator.
pub struct XorShift {
    state: u64,
}

impl XorShift {
    pub fn new(seed: u64) -> Self {
        // xorshift never leaves the all-zero state
        XorShift {
            state: if seed == 0 { 0xDEAD_BEEF } else { seed },
        }
    }

    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        XorShift::new(nanos)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl RandomSource for XorShift {
    fn next_index(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}
