use crate::preview::{run_preview, run_validate, SubmissionFileArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use expresni_prace::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Expresni prace contact service",
    about = "Serve and inspect the staffing agency contact form pipeline",
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
    /// Validate a contact form JSON payload and report field errors
    Validate(SubmissionFileArgs),
    /// Render the notification email for a payload without sending it
    Preview(SubmissionFileArgs),
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
        Command::Validate(args) => run_validate(args),
        Command::Preview(args) => run_preview(args),
    }
}
