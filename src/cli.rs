use crate::report::{run_analyze, run_expansions, run_top, AnalyzeArgs, CatalogArgs, TopArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use eq_augs::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "eq-augs",
    about = "Rank the augmentations in an EverQuest inventory export by weighted stats",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score and rank the augmentations found in an inventory export
    Analyze(AnalyzeArgs),
    /// Rank catalog augmentations from one expansion or augmentation type
    Top(TopArgs),
    /// List the expansions present in the catalog
    Expansions(CatalogArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured item catalog
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args),
        Command::Top(args) => run_top(args),
        Command::Expansions(args) => run_expansions(args),
    }
}
