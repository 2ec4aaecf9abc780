use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "lexpert-cli")]
#[command(about = "Lexpert operator command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Upsert the expert directory from a YAML roster file.
    Seed {
        /// Roster file path; defaults to LEXPERT_EXPERTS_PATH.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Seed { file } => seed(file).await,
    }
}

async fn seed(file: Option<PathBuf>) -> anyhow::Result<()> {
    let config = lexpert_core::load_app_config()?;
    let path = file.unwrap_or_else(|| config.experts_path.clone());

    let roster = lexpert_core::roster::load_roster(&path)?;
    tracing::info!(path = %path.display(), experts = roster.experts.len(), "roster loaded");

    let pool_config = lexpert_db::PoolConfig::from_app_config(&config);
    let pool = lexpert_db::connect_pool(&config.database_url, pool_config).await?;
    lexpert_db::run_migrations(&pool).await?;

    let count = lexpert_db::seed_experts(&pool, &roster.experts).await?;
    tracing::info!(count, "expert directory seeded");
    println!("seeded {count} experts from {}", path.display());

    Ok(())
}
