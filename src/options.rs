//! Startup options: command-line flags merged over the config file, merged
//! over built-in defaults.

use std::{fs, io::Write, path::PathBuf, time::Duration};

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use indoc::indoc;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE_PATH: &str = "vitals/vitals.toml";

pub const DEFAULT_RATE: Duration = Duration::from_millis(500);
pub const MINIMUM_RATE: Duration = Duration::from_millis(250);
pub const DEFAULT_DEVICE: &str = "sda";

const CONFIG_TEXT: &str = indoc! {r##"
    # This is a default config file for vitals. Uncomment the fields to change
    # them; flags passed on the command line take precedence.

    [flags]
    # The refresh rate, as a number in milliseconds or a human duration.
    #rate = "500ms"

    # The block device to report I/O counters for, by its kernel name.
    #device = "sda"
"##};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    pub flags: Option<ConfigFlags>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ConfigFlags {
    pub rate: Option<StringOrNum>,
    pub device: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum StringOrNum {
    String(String),
    Num(u64),
}

/// Everything the driver loop needs, fully resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub rate: Duration,
    pub device: String,
}

pub fn build_settings(matches: &ArgMatches, config: &Config) -> Result<Settings> {
    Ok(Settings {
        rate: get_update_rate(matches, config)?,
        device: get_target_device(matches, config),
    })
}

fn get_update_rate(matches: &ArgMatches, config: &Config) -> Result<Duration> {
    let update_rate = if let Some(rate) = matches.get_one::<String>("rate") {
        try_parse_ms(rate)?
    } else if let Some(rate) = config.flags.as_ref().and_then(|flags| flags.rate.as_ref()) {
        match rate {
            StringOrNum::String(rate) => try_parse_ms(rate)?,
            StringOrNum::Num(rate) => Duration::from_millis(*rate),
        }
    } else {
        DEFAULT_RATE
    };

    if update_rate < MINIMUM_RATE {
        return Err(anyhow!(
            "Please set your update rate to be at least {} milliseconds.",
            MINIMUM_RATE.as_millis()
        ));
    }

    Ok(update_rate)
}

fn get_target_device(matches: &ArgMatches, config: &Config) -> String {
    matches
        .get_one::<String>("device")
        .cloned()
        .or_else(|| {
            config
                .flags
                .as_ref()
                .and_then(|flags| flags.device.clone())
        })
        .unwrap_or_else(|| DEFAULT_DEVICE.to_string())
}

/// Parses a string as either raw milliseconds or a human duration.
fn try_parse_ms(text: &str) -> Result<Duration> {
    if let Ok(ms) = text.parse::<u64>() {
        Ok(Duration::from_millis(ms))
    } else if let Ok(duration) = humantime::parse_duration(text) {
        Ok(duration)
    } else {
        Err(anyhow!("could not parse '{text}' as a refresh rate"))
    }
}

/// Resolves where the config file should live: the given location if any,
/// otherwise the platform config directory.
pub fn read_config(config_location: Option<&str>) -> Result<Option<PathBuf>> {
    let config_path = if let Some(conf_loc) = config_location {
        Some(PathBuf::from(conf_loc))
    } else if let Some(config_dir) = dirs::config_dir() {
        let mut path = config_dir;
        path.push(DEFAULT_CONFIG_FILE_PATH);
        Some(path)
    } else {
        None
    };

    Ok(config_path)
}

/// Loads the config at `config_path`, writing out a commented default file
/// first if nothing exists there yet.
pub fn create_or_get_config(config_path: &Option<PathBuf>) -> Result<Config> {
    if let Some(path) = config_path {
        if let Ok(config_string) = fs::read_to_string(path) {
            // We found a config file!
            Ok(toml_edit::de::from_str(config_string.as_str())?)
        } else {
            // Config file DNE...
            if let Some(parent_path) = path.parent() {
                fs::create_dir_all(parent_path)
                    .context("Unable to create a directory for the config file.")?;
            }
            fs::File::create(path)?.write_all(CONFIG_TEXT.as_bytes())?;
            Ok(Config::default())
        }
    } else {
        // Don't write, the config path was somehow None...
        Ok(Config::default())
    }
}
