//! A small terminal monitor for Linux kernel performance counters: CPU
//! utilization, load average, disk I/O, memory, swap, and uptime, sampled
//! and redrawn on a fixed interval until interrupted.
//!
//! The library half holds everything except flag handling at the binary
//! edge: the samplers under [`collection`], the frame painter in [`canvas`],
//! and the driver loop in [`run_loop`].

#![warn(rust_2018_idioms)]

pub mod args;
pub mod canvas;
pub mod collection;
pub mod options;
pub mod utils {
    pub mod logging;
}

use std::{
    io::Write,
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use collection::DataCollector;

/// Printed exactly once when the driver loop winds down.
pub const COMPLETION_MESSAGE: &str = "Done!";

/// Runs the sample/render cycle until `is_terminated` is observed true, then
/// prints the completion message.
///
/// The flag is checked once per cycle and the sleep is unconditional, so
/// shutdown can lag the interrupt by up to one full `rate`. Degraded metric
/// failures surface as sentinel readings in the frame; load average and
/// uptime failures abort the loop and propagate.
pub fn run_loop<W: Write>(
    collector: &mut DataCollector, out: &mut W, is_terminated: &AtomicBool, rate: Duration,
) -> anyhow::Result<()> {
    while !is_terminated.load(Ordering::SeqCst) {
        collector.update_data()?;
        canvas::draw_data(out, &collector.data)?;
        thread::sleep(rate);
    }

    writeln!(out, "{COMPLETION_MESSAGE}")?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::*;
    use crate::collection::tests::synthetic_proc_paths;

    #[test]
    fn preset_termination_skips_sampling_and_reports_completion() {
        let dir = tempfile::tempdir().unwrap();
        let paths = synthetic_proc_paths(dir.path());
        let mut collector = DataCollector::with_paths("sda".to_string(), paths);

        let is_terminated = AtomicBool::new(true);
        let mut out = Vec::new();
        run_loop(
            &mut collector,
            &mut out,
            &is_terminated,
            Duration::from_millis(10),
        )
        .unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert_eq!(rendered.matches(COMPLETION_MESSAGE).count(), 1);
        assert!(!rendered.contains("CPU Usage"));
    }

    #[test]
    fn termination_mid_run_stops_the_loop_once() {
        let dir = tempfile::tempdir().unwrap();
        let paths = synthetic_proc_paths(dir.path());
        let mut collector = DataCollector::with_paths("sda".to_string(), paths);

        let is_terminated = AtomicBool::new(false);
        let mut out = Vec::new();

        thread::scope(|scope| {
            scope.spawn(|| {
                thread::sleep(Duration::from_millis(30));
                is_terminated.store(true, Ordering::SeqCst);
            });

            run_loop(
                &mut collector,
                &mut out,
                &is_terminated,
                Duration::from_millis(5),
            )
            .unwrap();
        });

        let rendered = String::from_utf8(out).unwrap();
        assert_eq!(rendered.matches(COMPLETION_MESSAGE).count(), 1);
        assert!(rendered.contains("CPU Usage"));
        assert!(rendered.trim_end().ends_with(COMPLETION_MESSAGE));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn fatal_sampler_failure_aborts_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = synthetic_proc_paths(dir.path());
        paths.loadavg = dir.path().join("missing-loadavg");
        let mut collector = DataCollector::with_paths("sda".to_string(), paths);

        let is_terminated = AtomicBool::new(false);
        let mut out = Vec::new();
        let result = run_loop(
            &mut collector,
            &mut out,
            &is_terminated,
            Duration::from_millis(5),
        );

        assert!(result.is_err());
        assert!(!String::from_utf8(out).unwrap().contains(COMPLETION_MESSAGE));
    }
}
