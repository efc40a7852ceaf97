use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::Command;
use taproot_db::{Database, DbError};

/// Environment variable name for the database path
const TAPROOT_DB_PATH_ENV: &str = "TAPROOT_DB_PATH";

/// Taproot - A todo management CLI tool
#[derive(Parser)]
#[command(name = "taproot")]
#[command(version = "0.1.0")]
#[command(about = "A todo management CLI tool", long_about = None)]
struct Args {
    /// Path to the database directory (can also be set via TAPROOT_DB_PATH env var)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

/// Get the database path from command line, environment variable, or default.
///
/// Priority:
/// 1. Command line --db argument
/// 2. TAPROOT_DB_PATH environment variable (if non-empty)
/// 3. Default path (~/.taproot/data)
fn resolve_db_path(cli_db: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_db {
        return path;
    }

    if let Ok(env_path) = std::env::var(TAPROOT_DB_PATH_ENV)
        && !env_path.is_empty()
    {
        return PathBuf::from(env_path);
    }

    Database::default_path()
}

/// Initialize logging based on the RUST_LOG environment variable
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run_app().await {
        eprintln!("error: {}", e.full_message());
        process::exit(1);
    }
}

/// Main application logic - separated for testability
async fn run_app() -> Result<(), DbError> {
    let args = Args::parse();
    run_with_args(&args).await
}

/// Run the application with the given arguments
async fn run_with_args(args: &Args) -> Result<(), DbError> {
    let db_path = resolve_db_path(args.db.clone());

    let db = Database::connect(&db_path).await?;
    db.init().await?;

    match &args.command {
        Some(cmd) => {
            let result = cmd.execute(&db).await?;
            println!("{}", result);
        }
        None => {
            println!("Welcome to Taproot!");
            println!("Use 'taproot --help' for usage information.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from(["taproot"]).unwrap();
        assert!(args.db.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_args_with_db_path() {
        let args = Args::try_parse_from(["taproot", "--db", "/tmp/test-db"]).unwrap();
        assert_eq!(args.db, Some(PathBuf::from("/tmp/test-db")));
    }

    #[test]
    fn test_args_with_add_command() {
        let args = Args::try_parse_from(["taproot", "add", "Buy milk"]).unwrap();
        assert!(args.command.is_some());
    }

    #[test]
    fn test_args_add_with_all_options() {
        let args = Args::try_parse_from([
            "taproot",
            "add",
            "Book flights",
            "--due",
            "2025-06-01",
            "--parent",
            "a1b2c3d4e5f6",
        ])
        .unwrap();
        assert!(args.command.is_some());
    }

    #[test]
    fn test_add_command_requires_description() {
        let result = Args::try_parse_from(["taproot", "add"]);
        match result {
            Err(e) => {
                let err = e.to_string();
                assert!(
                    err.contains("required") || err.contains("<DESCRIPTION>"),
                    "Error should mention the required description argument, got: {}",
                    err
                );
            }
            Ok(_) => panic!("Expected error for missing description"),
        }
    }

    #[test]
    fn test_add_command_invalid_due_date() {
        let result = Args::try_parse_from(["taproot", "add", "Task", "--due", "whenever"]);
        match result {
            Err(e) => {
                let err = e.to_string();
                assert!(
                    err.contains("invalid date") || err.contains("whenever"),
                    "Error should mention the invalid date, got: {}",
                    err
                );
            }
            Ok(_) => panic!("Expected error for invalid due date"),
        }
    }

    #[test]
    fn test_update_done_conflicts_with_pending() {
        let result =
            Args::try_parse_from(["taproot", "update", "a1b2c3", "--done", "--pending"]);
        assert!(result.is_err(), "conflicting flags should be rejected");
    }

    #[test]
    fn test_list_parent_conflicts_with_root() {
        let result =
            Args::try_parse_from(["taproot", "list", "--parent", "a1b2c3", "--root"]);
        assert!(result.is_err(), "conflicting flags should be rejected");
    }

    #[tokio::test]
    async fn test_run_with_args_no_command() {
        let temp_dir = env::temp_dir().join(format!(
            "taproot-main-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        let args = Args {
            db: Some(temp_dir.clone()),
            command: None,
        };

        let result = run_with_args(&args).await;
        assert!(result.is_ok(), "run_with_args failed: {:?}", result.err());

        let _ = std::fs::remove_dir_all(&temp_dir);
    }

    #[tokio::test]
    async fn test_run_with_add_command() {
        let temp_dir = env::temp_dir().join(format!(
            "taproot-main-add-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        let args = Args::try_parse_from([
            "taproot",
            "--db",
            temp_dir.to_str().unwrap(),
            "add",
            "Test todo",
        ])
        .unwrap();

        let result = run_with_args(&args).await;
        assert!(result.is_ok(), "Add command failed: {:?}", result.err());

        let _ = std::fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_resolve_db_path_cli_takes_priority() {
        let cli_path = PathBuf::from("/custom/path");
        assert_eq!(resolve_db_path(Some(cli_path.clone())), cli_path);
    }

    #[test]
    #[serial]
    fn test_resolve_db_path_env_var_takes_priority_over_default() {
        let original = env::var(TAPROOT_DB_PATH_ENV).ok();
        // SAFETY: Test is single-threaded and we restore the original value
        unsafe { env::set_var(TAPROOT_DB_PATH_ENV, "/env/path") };

        assert_eq!(resolve_db_path(None), PathBuf::from("/env/path"));

        // SAFETY: Test is single-threaded and we're restoring to original state
        unsafe {
            match original {
                Some(val) => env::set_var(TAPROOT_DB_PATH_ENV, val),
                None => env::remove_var(TAPROOT_DB_PATH_ENV),
            }
        }
    }

    #[test]
    #[serial]
    fn test_resolve_db_path_empty_env_var_uses_default() {
        let original = env::var(TAPROOT_DB_PATH_ENV).ok();
        // SAFETY: Test is single-threaded and we restore the original value
        unsafe { env::set_var(TAPROOT_DB_PATH_ENV, "") };

        let path = resolve_db_path(None);
        assert!(
            path.ends_with(".taproot/data"),
            "Expected path ending with .taproot/data, got: {:?}",
            path
        );

        // SAFETY: Test is single-threaded and we're restoring to original state
        unsafe {
            match original {
                Some(val) => env::set_var(TAPROOT_DB_PATH_ENV, val),
                None => env::remove_var(TAPROOT_DB_PATH_ENV),
            }
        }
    }

    #[test]
    #[serial]
    fn test_resolve_db_path_cli_overrides_env_var() {
        let original = env::var(TAPROOT_DB_PATH_ENV).ok();
        // SAFETY: Test is single-threaded and we restore the original value
        unsafe { env::set_var(TAPROOT_DB_PATH_ENV, "/env/path") };

        let cli_path = PathBuf::from("/cli/path");
        assert_eq!(resolve_db_path(Some(cli_path.clone())), cli_path);

        // SAFETY: Test is single-threaded and we're restoring to original state
        unsafe {
            match original {
                Some(val) => env::set_var(TAPROOT_DB_PATH_ENV, val),
                None => env::remove_var(TAPROOT_DB_PATH_ENV),
            }
        }
    }
}
