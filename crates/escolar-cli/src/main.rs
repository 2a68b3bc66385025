use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use escolar_config::ConfigLoader;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "escolar", version, about = "School administration schema tools")]
struct Cli {
    /// Path to escolar.yml (defaults to ~/.escolar/escolar.yml)
    #[arg(short, long, global = true, env = "ESCOLAR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply, revert or inspect schema migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Validate user-import fields before they reach the database
    Validar {
        #[arg(long)]
        cpf: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        senha: Option<String>,
        #[arg(long)]
        matricula: Option<String>,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply pending migrations in ascending version order
    Up {
        /// Stop after this version instead of running to the end
        #[arg(long)]
        to: Option<u64>,
        /// Database path, overriding config and ESCOLAR_DB
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Revert applied migrations down to (and keeping) a version; 0 reverts all
    Down {
        #[arg(long)]
        to: u64,
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Show applied and pending migrations
    Status {
        #[arg(long)]
        db: Option<PathBuf>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate the catalog without touching a database
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(ConfigLoader::default_path);
    let config = ConfigLoader::load(&config_path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log.as_deref().unwrap_or("info")))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Migrate { action } => match action {
            MigrateAction::Up { to, db } => commands::migrate_up(&config, db, to),
            MigrateAction::Down { to, db } => commands::migrate_down(&config, db, to),
            MigrateAction::Status { db, json } => commands::migrate_status(&config, db, json),
            MigrateAction::Check => commands::migrate_check(),
        },
        Command::Validar {
            cpf,
            email,
            senha,
            matricula,
        } => commands::validar(cpf, email, senha, matricula),
    }
}
