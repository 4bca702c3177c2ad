//! cfgsync binary entry point.
use clap::Parser as _;

use cfgsync::cli::{Cli, Command};
use cfgsync::commands;
use cfgsync::logging::Logger;

fn main() {
    // Best effort; older Windows consoles simply keep the escape codes.
    let _ = enable_ansi_support::enable_ansi_support();

    let args = Cli::parse();
    let log = Logger::new(args.verbose, args.command.name());

    let result = match &args.command {
        Command::Sync(opts) => commands::sync::run(&log, &args.global, opts),
        Command::Init => commands::init::run(&log, &args.global),
        Command::Save => commands::save::run(&log, &args.global),
        Command::Fetch => commands::fetch::run(&log, &args.global),
        Command::Version => {
            let version = option_env!("CFGSYNC_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("cfgsync {version}");
            Ok(())
        }
    };

    if let Err(err) = result {
        log.error(&format!("{err:#}"));
        std::process::exit(1);
    }
}
