mod cli;
mod run;
mod script;
mod wallpaper;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = cli::Cli::parse();
    run::run(&cli)
}
