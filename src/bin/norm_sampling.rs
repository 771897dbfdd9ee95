//! Squared norm of uniformly sampled data, single then double precision.

use std::io;

use clap::Parser;
use diffquot::experiments::SamplingConfig;
use diffquot::logging::init_tracing;
use diffquot::report::{ignore_broken_pipe, write_norm_sampling};
use diffquot::{run_norm_sampling, DiffQuotError, SampleRng};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Seed the generator explicitly instead of from the time of day
    #[arg(long)]
    seed: Option<u64>,

    /// Number of leading components summed into the norm
    #[arg(long, default_value_t = SamplingConfig::default().n)]
    n: usize,

    /// Half-width of the uniform distribution [-a, a]
    #[arg(long, default_value_t = SamplingConfig::default().half_width)]
    half_width: f32,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), DiffQuotError> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = SamplingConfig {
        n: args.n,
        half_width: args.half_width,
        ..SamplingConfig::default()
    };

    let mut rng = match args.seed {
        Some(seed) => SampleRng::with_seed(seed),
        None => SampleRng::from_time_of_day()?,
    };

    let report = run_norm_sampling(&mut rng, &config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    ignore_broken_pipe(write_norm_sampling(&report, &mut out).map_err(DiffQuotError::from))
}
