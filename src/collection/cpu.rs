//! CPU utilization, computed from deltas of the aggregate line of `/proc/stat`.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use super::error::{CollectionError, CollectionResult};

/// Reported when the stat line cannot be read or parsed. Doubles as the
/// fallback when two samples land on the same kernel tick, where the real
/// delta is undefined.
pub const FAILURE_READING: f64 = 0.0;

const STAT_FIELDS: usize = 7;

/// Cumulative tick counters from the aggregate CPU line, in kernel order:
/// user, nice, system, idle, iowait, irq, softirq. Later columns (steal,
/// guest, guest_nice) are not part of the total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuTicks {
    counters: [u64; STAT_FIELDS],
    total: u64,
}

impl CpuTicks {
    fn idle(&self) -> u64 {
        self.counters[3]
    }
}

/// Parses the aggregate CPU line of `/proc/stat`: seven counters after the
/// leading `cpu` token.
fn parse_stat_line(line: &str) -> CollectionResult<CpuTicks> {
    // The first token is the device name; everything after it is a counter.
    let mut parts = line.split_whitespace().skip(1);

    let mut counters = [0; STAT_FIELDS];
    for counter in counters.iter_mut() {
        *counter = parts
            .next()
            .ok_or_else(|| CollectionError::from_str("truncated cpu stat line"))?
            .parse()?;
    }

    Ok(CpuTicks {
        counters,
        total: counters.iter().sum(),
    })
}

/// `(1 - idle_delta / total_delta) * 100`, from two successive counter
/// samples. Falls back to [`FAILURE_READING`] when no tick elapsed in
/// between, so the result is always finite.
fn utilization(prev: &CpuTicks, current: &CpuTicks) -> f64 {
    let total_delta = current.total.saturating_sub(prev.total);
    if total_delta == 0 {
        return FAILURE_READING;
    }
    let idle_delta = current.idle().saturating_sub(prev.idle());

    (1.0 - idle_delta as f64 / total_delta as f64) * 100.0
}

/// Computes utilization between successive samples, retaining the previous
/// sample's counters across calls.
///
/// The retained counters start out all-zero, so the first reading measures
/// against boot and is defined but not meaningful. State is only overwritten
/// once a sample parses; a failed read leaves the previous sample in place.
#[derive(Debug, Default)]
pub struct CpuSampler {
    prev: CpuTicks,
}

impl CpuSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the first line of `path` and returns the delta-based
    /// utilization percentage since the previous call.
    pub fn sample(&mut self, path: &Path) -> CollectionResult<f64> {
        let first_line = {
            // We just need a single line from this file. Read it and return it.
            let mut reader = BufReader::new(File::open(path)?);
            let mut buffer = String::new();
            reader.read_line(&mut buffer)?;

            buffer
        };

        let current = parse_stat_line(&first_line)?;
        let util = utilization(&self.prev, &current);
        self.prev = current;

        Ok(util)
    }
}
