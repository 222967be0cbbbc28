use crate::commands::{run_calculate, run_standards, CalculateArgs, StandardsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use injury_comp::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "injury-comp-api",
    about = "Compute statutory personal-injury compensation under the Guangxi schedule",
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
    /// Compute a case read from a JSON file and print or save the result
    Calculate(CalculateArgs),
    /// Print the rate table used for every computation
    Standards(StandardsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Calculate(args) => run_calculate(args),
        Command::Standards(args) => run_standards(args),
    }
}
