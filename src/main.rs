use anyhow::Context;
use cpusched::{logger, PcbGenerator, Report, Scheduler, SimConfig, Simulation};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process;

fn print_summary(report: &Report, outputfile: Option<&Path>) -> io::Result<()> {
    match outputfile {
        Some(path) => {
            let mut file = File::create(path)?;
            write!(file, "{}", report)?;
            file.flush()
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write!(out, "{}", report)
        }
    }
}

fn actual_main_fn(config: &SimConfig) -> anyhow::Result<()> {
    let rng = config
        .random_source()
        .context("failed to set up the random number source")?;
    let source = PcbGenerator::open(&config.inputfile)
        .with_context(|| format!("failed to load {}", config.inputfile.display()))?;

    let scheduler = Scheduler::with_random(config.policy, rng);
    let report = Simulation::new(source, scheduler)
        .run()
        .context("simulation aborted")?;

    print_summary(&report, config.outputfile.as_deref()).context("failed to write the report")
}

fn main() {
    let config = match SimConfig::from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(err) => err.exit(),
    };

    if let Err(err) = logger::init(logger::level_for(config.verbose, config.queue_trace)) {
        eprintln!("logger already set: {}", err);
    }

    if let Err(err) = actual_main_fn(&config) {
        log::error!("{:#}", err);
        process::exit(1);
    }
}
