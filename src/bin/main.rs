#![warn(rust_2018_idioms)]

use std::{
    io::stdout,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use anyhow::{Context, Result};
use vitals::{args, collection::DataCollector, options, run_loop};

fn main() -> Result<()> {
    let matches = args::get_matches();
    #[cfg(all(feature = "logging", debug_assertions))]
    {
        vitals::utils::logging::init_logger(
            log::LevelFilter::Debug,
            std::path::Path::new("debug.log"),
        )?;
    }

    let config_path = options::read_config(
        matches
            .get_one::<String>("config_location")
            .map(|path| path.as_str()),
    )
    .context("Unable to access the given config file location.")?;
    let config = options::create_or_get_config(&config_path)
        .context("Unable to properly parse or create the config file.")?;
    let settings = options::build_settings(&matches, &config)?;

    let mut collector = DataCollector::new(settings.device);

    // Set termination hook
    let is_terminated = Arc::new(AtomicBool::new(false));
    let ist_clone = is_terminated.clone();
    ctrlc::set_handler(move || {
        ist_clone.store(true, Ordering::SeqCst);
    })?;

    run_loop(
        &mut collector,
        &mut stdout(),
        &is_terminated,
        settings.rate,
    )
}
