use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use layer1_cli::{Command, GlobalArgs, init_logging};

/// Command-line client for the Layer1 digital asset API.
#[derive(Parser)]
#[command(name = "layer1", version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(cli.global.log_format);

    let mut stdout = io::stdout().lock();
    let result = cli.command.execute(&cli.global, &mut stdout).await;
    let _ = stdout.flush();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
