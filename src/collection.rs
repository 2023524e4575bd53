//! This is the main file to house data collection functions.

pub mod cpu;
pub mod disks;
pub mod error;
pub mod load_avg;
pub mod memory;
pub mod swap;
pub mod uptime;

use std::{path::PathBuf, time::Instant};

use cpu::CpuSampler;
use error::CollectionResult;
use load_avg::LoadAvgHarvest;
use uptime::Uptime;

/// One cycle's readings, as handed to the renderer.
///
/// Metrics come in two failure tiers. CPU, disk, memory, and swap degrade:
/// when a source cannot be read the field holds that module's
/// `FAILURE_READING` sentinel and the cycle goes on. Load average and uptime
/// are fatal: their errors abort the collection pass entirely.
#[derive(Clone, Debug)]
pub struct Data {
    pub collection_time: Instant,
    pub cpu_usage: f64,
    pub load_avg: LoadAvgHarvest,
    pub io_rate_kb: f64,
    pub io_activity: f64,
    pub mem_usage: f64,
    pub swap_activity: f64,
    pub uptime: Uptime,
}

impl Default for Data {
    fn default() -> Self {
        Data {
            collection_time: Instant::now(),
            cpu_usage: 0.0,
            load_avg: [0.0; 3],
            io_rate_kb: 0.0,
            io_activity: 0.0,
            mem_usage: 0.0,
            swap_activity: 0.0,
            uptime: Uptime::default(),
        }
    }
}

/// Locations of the kernel sources consumed each cycle. Split out from the
/// collector so tests can point it at synthetic files.
#[derive(Clone, Debug)]
pub struct ProcPaths {
    pub stat: PathBuf,
    pub loadavg: PathBuf,
    pub diskstats: PathBuf,
    pub meminfo: PathBuf,
    pub vmstat: PathBuf,
    pub uptime: PathBuf,
}

impl Default for ProcPaths {
    fn default() -> Self {
        ProcPaths {
            stat: "/proc/stat".into(),
            loadavg: "/proc/loadavg".into(),
            diskstats: "/proc/diskstats".into(),
            meminfo: "/proc/meminfo".into(),
            vmstat: "/proc/vmstat".into(),
            uptime: "/proc/uptime".into(),
        }
    }
}

/// Samples every metric source once per call and owns all cross-sample
/// state, which is just the CPU sampler's retained counters.
#[derive(Debug)]
pub struct DataCollector {
    pub data: Data,
    cpu: CpuSampler,
    target_device: String,
    paths: ProcPaths,
}

impl DataCollector {
    pub fn new(target_device: String) -> Self {
        Self::with_paths(target_device, ProcPaths::default())
    }

    pub fn with_paths(target_device: String, paths: ProcPaths) -> Self {
        DataCollector {
            data: Data::default(),
            cpu: CpuSampler::new(),
            target_device,
            paths,
        }
    }

    /// Refreshes `self.data` with a fresh sample of every metric, in a fixed
    /// order. Degraded-tier failures are logged and displayed as sentinels;
    /// load average and uptime failures propagate to the caller.
    pub fn update_data(&mut self) -> CollectionResult<()> {
        self.data.cpu_usage = degrade(
            self.cpu.sample(&self.paths.stat),
            cpu::FAILURE_READING,
            "cpu utilization",
        );
        self.data.load_avg = load_avg::get_load_avg(&self.paths.loadavg)?;
        self.data.io_rate_kb = degrade(
            disks::get_io_rate(&self.paths.diskstats, &self.target_device),
            disks::FAILURE_READING,
            "disk io rate",
        );
        self.data.io_activity = degrade(
            disks::get_io_activity(&self.paths.diskstats, &self.target_device),
            disks::FAILURE_READING,
            "disk io activity",
        );
        self.data.mem_usage = degrade(
            memory::get_mem_usage(&self.paths.meminfo),
            memory::FAILURE_READING,
            "memory utilization",
        );
        self.data.swap_activity = degrade(
            swap::get_swap_activity(&self.paths.vmstat),
            swap::FAILURE_READING,
            "swap activity",
        );
        self.data.uptime = uptime::get_uptime(&self.paths.uptime)?;
        self.data.collection_time = Instant::now();

        Ok(())
    }
}

/// Collapses a degraded-tier sampler result to its failure sentinel.
#[cfg_attr(not(feature = "logging"), allow(unused_variables))]
fn degrade(result: CollectionResult<f64>, sentinel: f64, metric: &str) -> f64 {
    match result {
        Ok(value) => value,
        Err(err) => {
            #[cfg(feature = "logging")]
            log::warn!("{metric} collection failed: {err}");
            sentinel
        }
    }
}
