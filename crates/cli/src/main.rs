use clap::Parser;
use tracing::error;

mod cli;
mod logging;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let cfg = cli.into_config();
    if let Err(err) = probe::run(&cfg).await {
        error!(error = %err, "login failed");
        std::process::exit(err.exit_code());
    }
}
