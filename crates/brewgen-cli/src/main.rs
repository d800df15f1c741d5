use brewgen_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Arguments first: a usage error must not touch the filesystem or network.
    let cli = Cli::parse_or_usage();

    match &cli.log_file {
        Some(path) => {
            if let Err(err) = logging::init_logging_file(path) {
                logging::init_logging_stderr();
                tracing::warn!("logging to stderr: {:#}", err);
            }
        }
        None => logging::init_logging_stderr(),
    }

    if let Err(err) = cli.run() {
        eprintln!("brewgen error: {:#}", err);
        std::process::exit(1);
    }
}
