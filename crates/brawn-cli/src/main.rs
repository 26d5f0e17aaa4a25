mod config;
mod plan_cmds;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use sqlx::SqlitePool;

use brawn_db::pool;

use config::BrawnConfig;

#[derive(Parser)]
#[command(name = "brawn", about = "Weekly circuit-training plan generator")]
struct Cli {
    /// Database URL (overrides BRAWN_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a brawn config file (no database required)
    Init {
        /// SQLite connection URL (defaults to a file in the user data dir)
        #[arg(long)]
        db_url: Option<String>,
        /// Default party size for requests that omit it
        #[arg(long, default_value_t = brawn_core::plan::DEFAULT_PARTY_SIZE)]
        party_size: u32,
        /// Default equipment for requests that omit it (comma-separated)
        #[arg(long, value_delimiter = ',', default_value = "all")]
        equipment: Vec<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Create the database file and run migrations
    DbInit,
    /// Weekly plan generation and stored programs
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Stored workout management
    Workout {
        #[command(subcommand)]
        command: WorkoutCommands,
    },
    /// Print shell completions to stdout
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Generate a week from a request TOML file
    Generate {
        /// Path to the request TOML file
        file: String,
        /// Store the generated week as a new program
        #[arg(long)]
        save: bool,
        /// Print the plan as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Show a stored program (the latest when omitted)
    Show {
        /// Program ID to show
        program_id: Option<i64>,
        /// Print the program as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a stored program and all of its workouts
    Delete {
        /// Program ID to delete
        program_id: i64,
    },
}

#[derive(Subcommand)]
pub enum WorkoutCommands {
    /// Delete one workout; deleting the last one removes its program
    Delete {
        /// Workout ID to delete
        workout_id: i64,
    },
}

/// Open a pool on the resolved database, creating its directory if needed.
pub(crate) async fn open_pool(config: &BrawnConfig) -> anyhow::Result<SqlitePool> {
    pool::ensure_database_dir(&config.db_config).await?;
    pool::create_pool(&config.db_config).await
}

/// Execute the `brawn init` command: write config file.
fn cmd_init(
    db_url: Option<String>,
    party_size: u32,
    equipment: Vec<String>,
    force: bool,
) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }
    if party_size == 0 {
        anyhow::bail!("--party-size must be at least 1");
    }

    let url = db_url.unwrap_or_else(brawn_db::config::DbConfig::default_url);
    let cfg = config::ConfigFile {
        database: config::DatabaseSection { url: url.clone() },
        defaults: config::DefaultsSection {
            party_size,
            equipment,
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {url}");
    println!("  defaults.party_size = {}", cfg.defaults.party_size);
    println!("  defaults.equipment = {}", cfg.defaults.equipment.join(", "));
    println!();
    println!("Next: run `brawn db-init` to create and migrate the database.");

    Ok(())
}

/// Execute the `brawn db-init` command: create database and run migrations.
async fn cmd_db_init(cli_db_url: Option<&str>) -> anyhow::Result<()> {
    let resolved = BrawnConfig::resolve(cli_db_url);

    println!("Initializing brawn database...");

    // 1. Connect, creating the file if it does not exist.
    let db_pool = open_pool(&resolved).await?;

    // 2. Run migrations.
    pool::run_migrations(&db_pool).await?;

    // 3. Print success with table counts.
    let counts = pool::table_counts(&db_pool).await?;
    println!("Database ready at {}. Tables:", resolved.db_config.database_url);
    for (table, count) in &counts {
        println!("  {table}: {count} rows");
    }

    // 4. Clean shutdown.
    db_pool.close().await;

    println!("brawn db-init complete.");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            db_url,
            party_size,
            equipment,
            force,
        } => {
            cmd_init(db_url, party_size, equipment, force)?;
        }
        Commands::DbInit => {
            cmd_db_init(cli.database_url.as_deref()).await?;
        }
        Commands::Plan { command } => {
            let resolved = BrawnConfig::resolve(cli.database_url.as_deref());
            plan_cmds::run_plan_command(command, &resolved).await?;
        }
        Commands::Workout { command } => {
            let resolved = BrawnConfig::resolve(cli.database_url.as_deref());
            let db_pool = open_pool(&resolved).await?;
            let result = plan_cmds::run_workout_command(command, &db_pool).await;
            db_pool.close().await;
            result?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "brawn", &mut std::io::stdout());
        }
    }

    Ok(())
}

#[cfg(test)]
mod test_util {
    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Serialize tests that touch process environment variables.
    pub fn lock_env() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "brawn", "plan", "generate", "week.toml", "--save", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Plan {
                command: PlanCommands::Generate { file, save, json },
            } => {
                assert_eq!(file, "week.toml");
                assert!(save);
                assert!(json);
            }
            _ => panic!("expected plan generate"),
        }
    }

    #[test]
    fn parses_init_equipment_list() {
        let cli = Cli::try_parse_from(["brawn", "init", "--equipment", "dumbbell,bench"]).unwrap();
        match cli.command {
            Commands::Init {
                equipment,
                party_size,
                ..
            } => {
                assert_eq!(equipment, vec!["dumbbell", "bench"]);
                assert_eq!(party_size, 20);
            }
            _ => panic!("expected init"),
        }
    }

    #[test]
    fn workout_delete_requires_numeric_id() {
        assert!(Cli::try_parse_from(["brawn", "workout", "delete", "abc"]).is_err());
        assert!(Cli::try_parse_from(["brawn", "workout", "delete", "7"]).is_ok());
    }
}
