//! CLI entry point for the drum variation generator

use clap::Parser;
use drumvary::io::cli::{Cli, FileProcessor};
use env_logger::Env;

fn main() -> drumvary::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process().map(|_| ())
}
