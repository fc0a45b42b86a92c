use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use card_sheet::infra::logging::init_logging;
use card_sheet::{GenerateOptions, SheetConfig, SheetController};
use clap::Parser;
use log::{error, info};

/// Lays out a folder of card images on printable A4 sheets (63 x 88 mm, 3 x 3 per page).
#[derive(Parser, Debug)]
#[command(
    name = "card-sheet",
    version,
    after_help = "Examples:\n  card-sheet --source_dir ./my-cards --output my-cards.pdf\n  card-sheet --source_dir ./images --output preview.pdf --preview\n  card-sheet --source_dir ./images --no-cut-marks"
)]
struct Args {
    /// Folder containing the card images (searched recursively)
    #[arg(long = "source_dir", value_name = "DIR", default_value = "./images")]
    source_dir: PathBuf,

    /// Output PDF path
    #[arg(long, value_name = "FILE", default_value = "mtg_cards.pdf")]
    output: PathBuf,

    /// Only generate the first page
    #[arg(long)]
    preview: bool,

    /// Do not draw corner cut marks
    #[arg(long = "no-cut-marks")]
    no_cut_marks: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            preview: self.preview,
            cut_marks: !self.no_cut_marks,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("fatal: {error:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    info!("starting card sheet generator");
    let controller = SheetController::new(SheetConfig::default(), args.options());
    let report = controller
        .run(&args.source_dir, &args.output)
        .with_context(|| format!("could not build '{}'", args.output.display()))?;

    if report.pages_written > 0 {
        info!("done");
    }
    Ok(())
}
