mod args;
mod tally;

use clap::Parser;
use log::debug;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    debug!("args: {:?}", args);

    if let Err(e) = tally::run(&args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
