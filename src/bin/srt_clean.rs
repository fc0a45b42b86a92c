use std::process::ExitCode;

use card_sheet::infra::logging::init_logging;
use card_sheet::subtitles::normalize_directory;
use card_sheet::NormalizerConfig;
use clap::Parser;
use log::error;

/// Renames `*_xx*.srt` subtitles in the current directory to `xx.srt`,
/// keeping the larger file when two of them collide.
#[derive(Parser, Debug)]
#[command(name = "srt-clean", version)]
struct Args {
    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match normalize_directory(&NormalizerConfig::default()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::from(1)
        }
    }
}
