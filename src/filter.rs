//! JSON-lines change-event filtering.

use anyhow::Context;
use filters::{FilterOutcome, FilterPipeline};
use std::io::{BufRead, Write};
use sync_core::ChangeEvent;
use tracing::{debug, info};

/// Counts from one filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub read: u64,
    pub written: u64,
    pub dropped: u64,
}

/// Read one change event per line from `input`, run it through `pipeline`
/// and write the surviving events to `output`, one per line.
///
/// Blank lines are skipped. The first unparsable line or filter error
/// aborts the pass.
pub fn filter_events<R: BufRead, W: Write>(
    pipeline: &FilterPipeline,
    input: R,
    mut output: W,
) -> anyhow::Result<FilterStats> {
    let mut stats = FilterStats::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        stats.read += 1;

        let mut event = ChangeEvent::from_json(&line)
            .with_context(|| format!("Invalid change event on line {line_no}"))?;
        match pipeline
            .apply(&mut event)
            .with_context(|| format!("Filter failed on line {line_no}"))?
        {
            FilterOutcome::Continue => {
                let json = event.to_json()?;
                writeln!(output, "{json}")?;
                stats.written += 1;
            }
            FilterOutcome::Stop => {
                debug!(line = line_no, "Event dropped");
                stats.dropped += 1;
            }
        }
    }

    output.flush()?;
    info!(
        "Filtered {} events: {} written, {} dropped",
        stats.read, stats.written, stats.dropped
    );
    Ok(stats)
}
