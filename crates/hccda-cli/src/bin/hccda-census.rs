use clap::Parser;
use hccda_cli::cli::CensusCli;
use hccda_core::logging;

fn main() {
    let cli = CensusCli::parse();

    if let Err(e) = logging::init_logging(cli.log_file.as_deref()) {
        logging::init_logging_stderr();
        tracing::warn!("log file unavailable, logging to stderr only: {:#}", e);
    }

    if let Err(err) = cli.run() {
        eprintln!("hccda error: {:#}", err);
        std::process::exit(1);
    }
}
