use abba::cli::{self, Cli, Command};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => cli::analyze::run(args),
    }
}
