//! `monumentd`: HTTP service and maintenance commands for the registry.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, ServeArgs};
use log::info;
use monument_api::{create_app, run_server, ApiConfig, AppState};
use monument_core::db::migrations::current_version;
use monument_core::db::open_db;
use monument_core::{
    default_log_level, init_logging, load_survey_rows, seed_monuments, MonumentService,
    SqliteMonumentRepository,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    if let Err(error) = run().await {
        eprintln!("monumentd error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, cli.log_dir.as_deref()).map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Serve(args) => serve(cli.db_path, args).await,
        Commands::Populate { seed_file } => populate(&cli.db_path, &seed_file),
        Commands::Migrate => migrate(&cli.db_path),
    }
}

async fn serve(db_path: PathBuf, args: ServeArgs) -> anyhow::Result<()> {
    // Fail fast on an unreachable database or a newer schema.
    open_db(&db_path)
        .with_context(|| format!("failed to open database `{}`", db_path.display()))?;

    let config = ApiConfig::new(db_path)
        .with_seed_file(args.seed_file)
        .with_cors_origins(&args.cors_origins)?;
    let addr = SocketAddr::new(args.host, args.port);

    run_server(create_app(AppState::new(config)), addr)
        .await
        .with_context(|| format!("server on {addr} failed"))
}

fn populate(db_path: &Path, seed_file: &Path) -> anyhow::Result<()> {
    let rows = load_survey_rows(seed_file)?;
    let mut conn = open_db(db_path)
        .with_context(|| format!("failed to open database `{}`", db_path.display()))?;
    let mut service = MonumentService::new(SqliteMonumentRepository::try_new(&mut conn)?);

    let created = seed_monuments(&mut service, &rows, &mut rand::thread_rng())?;
    info!("event=populate module=cli status=ok created={}", created.len());
    println!("populated {} monuments", created.len());
    Ok(())
}

fn migrate(db_path: &Path) -> anyhow::Result<()> {
    let conn = open_db(db_path)
        .with_context(|| format!("failed to open database `{}`", db_path.display()))?;
    let version = current_version(&conn)?;
    println!("schema version {version}");
    Ok(())
}
