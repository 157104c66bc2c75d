use clap::Parser;

use dspace_dl::cli::Cli;
use dspace_dl::logging;

fn main() {
    // Initialize logging as early as possible.
    logging::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage problems exit 1; --help and --version exit 0.
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(err) = cli.run() {
        eprintln!("dspace-dl error: {:#}", err);
        std::process::exit(1);
    }
}
