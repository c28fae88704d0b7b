use std::process;

use clap::Parser;
use crypto_rsa::bench::{run, BenchArgs};
use log::LevelFilter;

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = BenchArgs::parse();
    if let Err(e) = run(&args) {
        log::error!("Error running benchmark: {e:#}");
        process::exit(1);
    }
}
