mod asset;
mod cli;
mod config;
mod constants;
mod maven;
mod mirror;
mod nexus;
mod ui;

use clap::Parser;
use cli::Cli;
use config::Config;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config::from_cli(cli);

    if let Err(e) = mirror::run(&config).await {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
