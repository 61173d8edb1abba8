//! Seed commands
//!
//! Usage:
//!   seedkit seed run <PATH> [--db <FILE>] [--on-conflict <POLICY>] [--quiet] [--force]
//!   seedkit seed status [--db <FILE>]

use clap::{Args, Subcommand};
use seedkit_core::{should_run_seeding_from_env, ConflictPolicy, SeedExecutor, SeedLedger};
use seedkit_store::seed::parse_seed_file;
use seedkit_store::SqliteStorage;
use std::path::PathBuf;

const DEFAULT_DB_PATH: &str = ".seedkit/store.db";

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Apply a seed file to the database
    Run(RunArgs),
    /// List the seeds recorded in the ledger
    Status(StatusArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Path to seed YAML file
    pub path: PathBuf,

    /// SQLite database file
    #[arg(long, env = "SEEDKIT_DB", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Override the file's conflict policy (skip, update, error)
    #[arg(long)]
    pub on_conflict: Option<ConflictPolicy>,

    /// Suppress progress messages
    #[arg(long)]
    pub quiet: bool,

    /// Seed even when run_on_start would not
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// SQLite database file
    #[arg(long, env = "SEEDKIT_DB", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,
}

/// Execute seed command
pub fn execute(args: SeedArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        SeedCommand::Run(run_args) => execute_run(run_args),
        SeedCommand::Status(status_args) => execute_status(status_args),
    }
}

fn execute_run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let seed = parse_seed_file(&args.path)?;

    let mut options = seed.options.clone();
    if let Some(policy) = args.on_conflict {
        options.on_conflict = policy;
    }
    options.quiet |= args.quiet;

    if !args.force && !should_run_seeding_from_env(&options.run_on_start) {
        println!(
            "Seeding skipped (run_on_start: {:?}); use --force to seed anyway",
            options.run_on_start
        );
        return Ok(());
    }

    let mut storage = SqliteStorage::open(&args.db)?;
    let result = match SeedExecutor::new(&mut storage).run(seed.into_config(), Some(options)) {
        Ok(result) => result,
        Err(err) => {
            if err.original().is_conflict() {
                eprintln!("hint: pass --on-conflict skip or --on-conflict update to re-run");
            }
            return Err(err.into());
        }
    };

    for seeded in &result.seeds {
        println!(
            "  {:<8} {} -> {}/{}",
            seeded.action.as_str(),
            seeded.seed_id,
            seeded.collection,
            seeded.id
        );
    }
    println!(
        "✓ Seeded {}: {} created, {} updated, {} skipped",
        args.path.display(),
        result.created,
        result.updated,
        result.skipped
    );

    Ok(())
}

fn execute_status(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let storage = SqliteStorage::open(&args.db)?;
    let records = SeedLedger::list(&storage)?;

    if records.is_empty() {
        println!("No seeds tracked in {}", args.db.display());
        return Ok(());
    }

    for record in &records {
        println!(
            "{}\t{}/{}\t{}\t{}",
            record.seed_id,
            record.collection,
            record.document_id,
            &record.checksum[..record.checksum.len().min(12)],
            record.created_at.to_rfc3339()
        );
    }
    println!("{} seed(s) tracked", records.len());

    Ok(())
}
