mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, EXIT_INVALID, stack, wait};
use readyr_common::config::Config;
use terminal::{logging, print};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.quiet);

    let cfg = Config {
        no_banner: commands.no_banner,
        quiet: commands.quiet,
    };
    print::banner(&cfg);

    let result = match commands.command {
        Commands::Wait { endpoints, poll } => {
            print::header("waiting for endpoints", cfg.quiet);
            wait::wait(endpoints, poll, &cfg).await
        }
        Commands::Stack { poll } => {
            print::header("waiting for service stack", cfg.quiet);
            stack::stack(poll, &cfg).await
        }
    };

    match result {
        Ok(outcome) => {
            if cfg.quiet == 0 {
                print::end_of_program();
            }
            commands::exit_code(&outcome)
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(EXIT_INVALID)
        }
    }
}
