#[cfg(feature = "logging")]
pub fn init_logger(
    min_level: log::LevelFilter, log_file_name: &std::path::Path,
) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            // UTC rather than local time, as local offsets cannot be fetched
            // safely once threads may exist.
            let now = time::OffsetDateTime::now_utc();

            out.finish(format_args!(
                "{}[{}][{}] {}",
                now.format(&time::macros::format_description!(
                    // The weird "[[[" is because a bracket ("[[") has to be escaped to show one "[".
                    // See https://time-rs.github.io/book/api/format-description.html
                    "[[[year]-[month]-[day]][[[hour]:[minute]:[second][subsecond digits:9]]"
                ))
                .unwrap(),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(min_level)
        .chain(fern::log_file(log_file_name)?)
        .apply()?;

    Ok(())
}
