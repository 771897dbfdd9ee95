//! Forward-difference error scan with prescaling, until the difference underflows.

use std::io;

use clap::Parser;
use diffquot::experiments::ScanConfig;
use diffquot::logging::init_tracing;
use diffquot::report::{ignore_broken_pipe, write_scan, ScanOutput};
use diffquot::{DiffQuotError, Precision, SummationOrder, UnderflowScan};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Prescaling factor gamma
    #[arg(long, default_value_t = ScanConfig::default().gamma)]
    gamma: f64,

    /// Buffer capacity bounding the largest problem size
    #[arg(long, default_value_t = ScanConfig::default().capacity)]
    capacity: usize,

    /// Run in single precision instead of double
    #[arg(long, default_value_t = false)]
    single: bool,

    /// Accumulate the norm from the last component to the first
    #[arg(long, default_value_t = false)]
    reverse: bool,

    /// Append the best approximation found for each problem size
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Print the whole trace as JSON instead of text lines
    #[arg(long, default_value_t = false, conflicts_with = "summary")]
    json: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run<T: Precision>(config: &ScanConfig, output: ScanOutput) -> Result<(), DiffQuotError> {
    let scan = UnderflowScan::<T>::new(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_scan(scan, output, &mut out)
}

fn main() -> Result<(), DiffQuotError> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = ScanConfig {
        gamma: args.gamma,
        capacity: args.capacity,
        order: if args.reverse {
            SummationOrder::Reverse
        } else {
            SummationOrder::Forward
        },
    };
    let output = if args.json {
        ScanOutput::Json
    } else if args.summary {
        ScanOutput::Summary
    } else {
        ScanOutput::Lines
    };

    let result = if args.single {
        run::<f32>(&config, output)
    } else {
        run::<f64>(&config, output)
    };
    ignore_broken_pipe(result)
}
