use clap::*;

const TEMPLATE: &str = "\
{name} {version}

{about}

{usage-heading} {usage}

{all-args}";

const USAGE: &str = "vtl [OPTIONS]";

pub fn get_matches() -> ArgMatches {
    build_app().get_matches()
}

pub fn build_app() -> Command {
    let config_location = Arg::new("config_location")
        .short('C')
        .long("config")
        .action(ArgAction::Set)
        .value_name("CONFIG PATH")
        .help("Sets the location of the config file.")
        .long_help(
            "Sets the location of the config file. Expects a config file in the TOML format. \
            If it doesn't exist, one is created.",
        );

    let device = Arg::new("device")
        .short('d')
        .long("device")
        .action(ArgAction::Set)
        .value_name("DEVICE")
        .help("Sets the block device to report I/O counters for.")
        .long_help(
            "Sets the block device to report I/O counters for, by its kernel name \
            (e.g. sda, nvme0n1). Defaults to sda.",
        );

    let rate = Arg::new("rate")
        .short('r')
        .long("rate")
        .action(ArgAction::Set)
        .value_name("TIME")
        .help("Sets the data refresh rate.")
        .long_help(
            "Sets the data refresh rate. Takes a number in milliseconds or a human \
            duration (e.g. 5s). The minimum is 250ms, and defaults to 500ms.",
        );

    let version = Arg::new("version")
        .short('V')
        .long("version")
        .action(ArgAction::Version)
        .help("Prints version information.");

    let mut args = [version, config_location, device, rate];

    // Manually sort the arguments.
    args.sort_by(|a, b| {
        let a = a.get_long().unwrap_or(a.get_id().as_str());
        let b = b.get_long().unwrap_or(b.get_id().as_str());

        a.cmp(b)
    });

    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .color(ColorChoice::Auto)
        .override_usage(USAGE)
        .help_template(TEMPLATE)
        .disable_version_flag(true)
        .args(args)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verify_cli() {
        build_app().debug_assert();
    }
}
