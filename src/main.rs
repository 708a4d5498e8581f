use anyhow::Result;
use clap::Parser;
use plex_playlist::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if std::env::var("RUST_LOG").is_err() {
        let level = if cli.verbose { "debug" } else { "info" };
        std::env::set_var("RUST_LOG", format!("warn,plex_playlist={level}"));
    }
    pretty_env_logger::init_timed();

    plex_playlist::runner::run(cli).await?;

    Ok(())
}
