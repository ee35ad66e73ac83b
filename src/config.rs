use crate::rand_generator::{RandGenerator, RandomSource, XorShift};
use crate::schedulers::Policy;
use clap::{App, Arg};
use regex::Regex;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

const SCHEDSPEC: &str = r"^(?i)(FCFS|SRTF|(RR|PP|PR):\d+(\.\d+)?)$";

/// Where the random policy draws its picks from.
#[derive(Debug, Clone, PartialEq)]
pub enum RandomChoice {
    Seed(u64),
    File(PathBuf),
    Clock,
}

/// Run configuration, fixed once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub inputfile: PathBuf,
    pub outputfile: Option<PathBuf>,
    pub policy: Policy,
    pub random: RandomChoice,
    pub verbose: bool,
    pub queue_trace: bool,
}

impl SimConfig {
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().try_get_matches_from(args)?;

        // the validators already accepted these
        let policy = matches
            .value_of("schedspec")
            .and_then(|spec| spec.parse().ok())
            .unwrap_or(Policy::Fcfs);
        let random = match (matches.value_of("seed"), matches.value_of("rfile")) {
            (Some(seed), _) => RandomChoice::Seed(seed.parse().unwrap_or_default()),
            (None, Some(rfile)) => RandomChoice::File(PathBuf::from(rfile)),
            (None, None) => RandomChoice::Clock,
        };

        Ok(SimConfig {
            inputfile: matches.value_of("inputfile").map(PathBuf::from).unwrap_or_default(),
            outputfile: matches.value_of("outputfile").map(PathBuf::from),
            policy,
            random,
            verbose: matches.is_present("v_flag"),
            queue_trace: matches.is_present("q_flag"),
        })
    }

    pub fn random_source(&self) -> io::Result<Box<dyn RandomSource>> {
        Ok(match &self.random {
            RandomChoice::Seed(seed) => Box::new(XorShift::new(*seed)),
            RandomChoice::File(rfile) => Box::new(RandGenerator::new(rfile)?),
            RandomChoice::Clock => Box::new(XorShift::from_time()),
        })
    }
}

fn app() -> App<'static> {
    App::new("cpusched")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Single-CPU process scheduling simulator")
        .arg(
            Arg::with_name("inputfile")
                .help("Process list: pid arrival burst priority per line")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("schedspec")
                .short('s')
                .long("schedspec")
                .required(true)
                .help("Scheduler specification (FCFS, SRTF, RR:<q>, PP:<q> or PR:<q>)")
                .takes_value(true)
                .validator(valid_schedspec),
        )
        .arg(
            Arg::with_name("outputfile")
                .short('o')
                .long("outputfile")
                .required(false)
                .help("Write the report here instead of stdout")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .required(false)
                .help("Seed for the random policy")
                .takes_value(true)
                .validator(|s| s.parse::<u64>().map(|_| ()).map_err(|e| e.to_string())),
        )
        .arg(
            Arg::with_name("rfile")
                .long("rfile")
                .required(false)
                .help("Random number file for the random policy")
                .takes_value(true)
                .conflicts_with("seed"),
        )
        .arg(
            Arg::with_name("v_flag")
                .short('v')
                .required(false)
                .help("Trace scheduling events")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("q_flag")
                .short('q')
                .required(false)
                .help("Trace the ready queue every tick")
                .takes_value(false),
        )
}

fn valid_schedspec(value: &str) -> Result<(), String> {
    let re = Regex::new(SCHEDSPEC).map_err(|e| e.to_string())?;
    if !re.is_match(value) {
        return Err(format!(
            "Invalid scheduler specification: {}. Must be one of FCFS, SRTF, RR:<q>, PP:<q> or PR:<q>",
            value
        ));
    }
    value.parse::<Policy>().map(|_| ()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<SimConfig, clap::Error> {
        SimConfig::from_args(std::iter::once("cpusched").chain(args.iter().copied()))
    }

    #[test]
    fn minimal_invocation() {
        let config = parse(&["input1", "-s", "FCFS"]).unwrap();
        assert_eq!(config.inputfile, PathBuf::from("input1"));
        assert_eq!(config.policy, Policy::Fcfs);
        assert_eq!(config.random, RandomChoice::Clock);
        assert_eq!(config.outputfile, None);
        assert!(!config.verbose);
    }

    #[test]
    fn quantum_policies_and_flags() {
        let config = parse(&["input1", "-s", "RR:2", "-o", "out", "-v", "-q", "--seed", "9"]).unwrap();
        assert_eq!(config.policy, Policy::RoundRobin { quantum: 2.0 });
        assert_eq!(config.outputfile, Some(PathBuf::from("out")));
        assert_eq!(config.random, RandomChoice::Seed(9));
        assert!(config.verbose && config.queue_trace);

        let config = parse(&["input1", "--schedspec", "pr:1.5", "--rfile", "rfile"]).unwrap();
        assert_eq!(config.policy, Policy::PriorityRandom { quantum: 1.5 });
        assert_eq!(config.random, RandomChoice::File(PathBuf::from("rfile")));
    }

    #[test]
    fn rejects_bad_schedspec() {
        for spec in ["RR", "X:2", "RR:0", "SRTF:1", "R2"] {
            assert!(parse(&["input1", "-s", spec]).is_err(), "{} accepted", spec);
        }
    }

    #[test]
    fn requires_input_and_spec() {
        assert!(parse(&["-s", "FCFS"]).is_err());
        assert!(parse(&["input1"]).is_err());
        assert!(parse(&["input1", "-s", "FCFS", "--seed", "1", "--rfile", "r"]).is_err());
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let config = parse(&["input1", "-s", "PR:1", "--seed", "3"]).unwrap();
        let mut a = config.random_source().unwrap();
        let mut b = config.random_source().unwrap();
        assert_eq!(a.next_index(10), b.next_index(10));
    }
}
