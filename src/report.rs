//! Text and JSON rendering of experiment results.
//!
//! Everything goes through an [`io::Write`] so the binaries can hand in a
//! locked stdout and stop quietly when the reader goes away.

use std::io::{self, Write};

use crate::error::DiffQuotError;
use crate::experiments::{NormSamplingReport, ScanTrace, UnderflowScan};
use crate::math::Precision;

/// How a scan is written out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanOutput {
    /// One line per event, streamed as the scan runs (default)
    #[default]
    Lines,
    /// All lines, then the best approximation per problem size
    Summary,
    /// The whole trace as pretty JSON
    Json,
}

/// Run `scan` to completion, writing it to `out` in the requested form.
pub fn write_scan<T: Precision, W: Write>(
    scan: UnderflowScan<T>,
    output: ScanOutput,
    out: &mut W,
) -> Result<(), DiffQuotError> {
    match output {
        ScanOutput::Lines => {
            for event in scan {
                writeln!(out, "{}", event)?;
            }
        }
        ScanOutput::Summary => {
            let trace: ScanTrace<T> = scan.collect();
            for event in trace.events() {
                writeln!(out, "{}", event)?;
            }
            for best in trace.best_per_size() {
                writeln!(out, "best for n: {} k: {} err {:.6}", best.n, best.k, best.err)?;
            }
        }
        ScanOutput::Json => {
            let trace: ScanTrace<T> = scan.collect();
            writeln!(out, "{}", trace.to_json()?)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Write the two lines of the sampling experiment.
pub fn write_norm_sampling<W: Write>(report: &NormSamplingReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", report)?;
    out.flush()
}

/// Treat a closed stdout as a normal end of output.
pub fn ignore_broken_pipe(result: Result<(), DiffQuotError>) -> Result<(), DiffQuotError> {
    match result {
        Err(e) if e.is_broken_pipe() => Ok(()),
        other => other,
    }
}
