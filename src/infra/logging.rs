use log::LevelFilter;

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Console logging; `RUST_LOG` still wins over the verbosity flag.
pub fn init_logging(verbose: bool) {
    let default_level = level_for(verbose).to_string().to_lowercase();
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level),
    )
    .format_timestamp_secs()
    .try_init();
}
