use std::{
    fmt::{self, Display, Formatter},
    process,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, level_filters::LevelFilter};

use crate::{config::Config, rate::ByteRate, target::Target, writer::write_file};

mod config;
mod rate;
mod size;
mod target;
mod writer;

#[derive(Debug, Parser)]
#[command(author, version = env!("VERSION"), about)]
struct Opt {
    #[clap(
        long,
        default_value = "1g",
        help = "number of bytes to write. accepts k, m and g suffixes (powers of 1024)"
    )]
    bytes: String,

    #[clap(
        long,
        default_value = "",
        help = "file or block device to write to. temporary file is created and removed if empty"
    )]
    file: String,

    #[clap(
        long,
        default_value = "false",
        help = "sync the file to the device before the timer is stopped"
    )]
    fsync: bool,
}

#[derive(Debug)]
struct Report {
    written: u64,
    elapsed: Duration,
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} bytes in {:?} ({})",
            self.written,
            self.elapsed,
            ByteRate::new(self.written, self.elapsed)
        )
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let opt = Opt::parse();
    // every resource of the run is released by the time run returns,
    // process::exit below skips destructors.
    match Config::try_from(opt).and_then(|cfg| run(&cfg)) {
        Ok(report) => println!("{}", report),
        Err(err) => {
            println!("{:#}", err);
            process::exit(1);
        }
    }
}

fn run(cfg: &Config) -> Result<Report> {
    debug!("running with {:?}", cfg);
    let mut target = Target::open(cfg.target.as_deref())?;
    info!("writing {} bytes to {}", cfg.bytes, target.path().display());
    let start = Instant::now();
    let written = match write_file(target.file_mut(), cfg.bytes, cfg.fsync) {
        Ok(written) => written,
        Err(err) => {
            debug!("aborted after {} bytes", err.written());
            return Err(err).with_context(|| format!("writing to {}", target.path().display()));
        }
    };
    let elapsed = start.elapsed();
    info!("wrote {} bytes in {:?}", written, elapsed);
    target.close();
    Ok(Report { written, elapsed })
}
