//! pdfsplice - Merge PDF files or extract selected pages into a new document.

use clap::Parser;
use std::process;

use pdfsplice::cli::Cli;
use pdfsplice::{app, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.global.verbose);

    tracing::debug!(version = pdfsplice::VERSION, "starting {}", pdfsplice::NAME);

    if let Err(err) = app::run(&cli).await {
        app::report_error(&cli, &err);
        process::exit(err.exit_code());
    }
}
