use clap::Parser;

use stockbook_cli::{Cli, Config};

fn main() -> anyhow::Result<()> {
    stockbook_observability::init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.file.clone());

    let stdout = std::io::stdout();
    stockbook_cli::run(&cli.command, &config, &mut stdout.lock())
}
