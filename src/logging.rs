use colored::control::set_override;
use env_logger::Builder;
use log::LevelFilter;

/// HTTP client internals are only interesting when something fails.
const QUIET_MODULES: [&str; 2] = ["ureq", "ureq_proto"];

pub fn init_logging(verbose: bool, no_color: bool) {
    // Disable colors globally if requested
    if no_color {
        set_override(false);
    }

    let mut builder = Builder::new();
    builder
        .filter_level(level_filter(verbose))
        .format_timestamp(None);

    for module in QUIET_MODULES {
        builder.filter_module(module, LevelFilter::Warn);
    }

    builder.init();
}

pub fn level_filter(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}
