use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use docket::app::AppContext;
use docket::cli::{commands, Cli, Commands};
use docket::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(cli.db, &config)?;

    match cli.command {
        Commands::Hearings { file_number } => {
            commands::list_hearings(&ctx, &file_number).await?;
        }
        Commands::Status { file_number } => {
            commands::show_status(&ctx, &file_number).await?;
        }
        Commands::Bookmark { file_number } => {
            commands::toggle_bookmark(&ctx, &file_number).await?;
        }
        Commands::Bookmarks => {
            commands::list_bookmarks(&ctx)?;
        }
        Commands::Time { datetime, offset } => {
            commands::show_time(&ctx, &datetime, &offset)?;
        }
    }

    Ok(())
}
