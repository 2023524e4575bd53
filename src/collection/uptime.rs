//! System uptime.
//!
//! Linux reads the kernel's uptime text directly; everywhere else goes
//! through sysinfo. Like the load average, a failure here is fatal.

use std::path::Path;

use super::error::{CollectionError, CollectionResult};

/// Seconds since boot, decomposed for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Uptime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Uptime {
    pub fn from_secs(total: u64) -> Self {
        Self {
            days: total / (60 * 60 * 24),
            hours: (total / (60 * 60)) % 24,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_os = "linux")] {
        pub fn get_uptime(path: &Path) -> CollectionResult<Uptime> {
            let contents = std::fs::read_to_string(path)?;
            parse_uptime(&contents)
        }
    } else {
        pub fn get_uptime(_path: &Path) -> CollectionResult<Uptime> {
            Ok(Uptime::from_secs(sysinfo::System::uptime()))
        }
    }
}

/// Parses the first field of the uptime line, seconds since boot with a
/// fractional part that is dropped for display.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_uptime(contents: &str) -> CollectionResult<Uptime> {
    let seconds: f64 = contents
        .split_whitespace()
        .next()
        .ok_or_else(|| CollectionError::from_str("empty uptime line"))?
        .parse()?;

    Ok(Uptime::from_secs(seconds as u64))
}
