//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;
use tusu_core::db::Database;

use crate::cli::{BaselineMode, Cli, Commands, HistoryAction};
use crate::commands;

const MARCH_CSV: &str = "date,description,category,amount,currency
2024-03-01,Restaurant A,Dining,150,TRY
2024-03-10,Restaurant B,Dining,200,TRY
2024-03-20,Dinner,Dining,5000,TRY
2024-03-21,Market,Groceries,800,TRY
";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn setup_test_db(dir: &TempDir) -> (PathBuf, Database) {
    let path = dir.path().join("tusu.db");
    let db = commands::open_db(&path).unwrap();
    (path, db)
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_analyze_args() {
    let cli = Cli::parse_from([
        "tusu",
        "analyze",
        "--file",
        "march.csv",
        "--baselines",
        "history",
        "--offline",
    ]);

    assert_eq!(cli.db, PathBuf::from("tusu.db"));
    match cli.command {
        Commands::Analyze {
            file,
            baselines,
            offline,
            json,
            ..
        } => {
            assert_eq!(file, PathBuf::from("march.csv"));
            assert_eq!(baselines, BaselineMode::History);
            assert!(offline);
            assert!(!json);
        }
        _ => panic!("expected analyze command"),
    }
}

#[test]
fn test_parse_history_record_args() {
    let cli = Cli::parse_from([
        "tusu", "--db", "other.db", "history", "record", "--file", "feb.csv", "--month", "2024-02",
    ]);

    assert_eq!(cli.db, PathBuf::from("other.db"));
    match cli.command {
        Commands::History {
            action: HistoryAction::Record { file, month },
        } => {
            assert_eq!(file, PathBuf::from("feb.csv"));
            assert_eq!(month, "2024-02");
        }
        _ => panic!("expected history record command"),
    }
}

#[test]
fn test_parse_serve_origins() {
    let cli = Cli::parse_from([
        "tusu",
        "serve",
        "--allowed-origins",
        "http://a.example,http://b.example",
    ]);

    match cli.command {
        Commands::Serve {
            port,
            host,
            allowed_origins,
            ..
        } => {
            assert_eq!(port, 3000);
            assert_eq!(host, "127.0.0.1");
            assert_eq!(allowed_origins.len(), 2);
        }
        _ => panic!("expected serve command"),
    }
}

// ========== Analyze Command Tests ==========

#[tokio::test]
async fn test_run_analysis_static_offline() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "march.csv", MARCH_CSV);

    let result = commands::run_analysis(
        &dir.path().join("unused.db"),
        None,
        &file,
        BaselineMode::Static,
        None,
        true,
    )
    .await
    .unwrap();

    assert_eq!(result.excessive_categories.len(), 1);
    assert_eq!(result.excessive_categories[0].category, "Dining");
    assert_eq!(result.total_potential_savings, 2350.0);
    // Static mode never touches the database
    assert!(!dir.path().join("unused.db").exists());
}

#[tokio::test]
async fn test_run_analysis_with_history() {
    let dir = TempDir::new().unwrap();
    let (db_path, db) = setup_test_db(&dir);

    let feb = write_file(
        &dir,
        "feb.json",
        r#"[{"date":"2024-02-05","description":"Dinner","category":"Dining","amount":5000,"currency":"TRY"}]"#,
    );
    commands::cmd_history_record(&db, &feb, "2024-02").unwrap();

    let march = write_file(&dir, "march.csv", MARCH_CSV);
    let result = commands::run_analysis(
        &db_path,
        None,
        &march,
        BaselineMode::History,
        Some("2024-03"),
        true,
    )
    .await
    .unwrap();

    // Dining baseline is 5000 from history, 5350 is only 7% above it
    assert!(result.excessive_categories.is_empty());
}

#[tokio::test]
async fn test_run_analysis_rejects_bad_month() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "march.csv", MARCH_CSV);

    let result = commands::run_analysis(
        Path::new("tusu.db"),
        None,
        &file,
        BaselineMode::Static,
        Some("03/2024"),
        true,
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_run_analysis_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = commands::run_analysis(
        Path::new("tusu.db"),
        None,
        &dir.path().join("missing.csv"),
        BaselineMode::Static,
        None,
        true,
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cmd_analyze_json() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "march.csv", MARCH_CSV);

    let result = commands::cmd_analyze(
        Path::new("tusu.db"),
        None,
        &file,
        BaselineMode::Static,
        None,
        true,
        true,
    )
    .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_custom_config_threshold() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "march.csv", MARCH_CSV);
    let config = write_file(&dir, "analysis.toml", "threshold_percent = 100.0\n");

    let result = commands::run_analysis(
        Path::new("tusu.db"),
        Some(&config),
        &file,
        BaselineMode::Static,
        None,
        true,
    )
    .await
    .unwrap();

    // 78% over baseline is tolerated with a 100% threshold
    assert!(result.excessive_categories.is_empty());
}

// ========== Market Command Tests ==========

#[tokio::test]
async fn test_fetch_snapshot_offline() {
    let snapshot = commands::fetch_snapshot(None, true).await.unwrap();
    assert_eq!(snapshot.assets.len(), 4);
    assert_eq!(snapshot.top_asset().unwrap().name, "Tech Funds");
}

#[tokio::test]
async fn test_cmd_market_offline() {
    assert!(commands::cmd_market(None, true, false).await.is_ok());
}

// ========== History Command Tests ==========

#[test]
fn test_cmd_history_seed_and_list() {
    let dir = TempDir::new().unwrap();
    let (_, db) = setup_test_db(&dir);
    let config = commands::load_config(None, true).unwrap();

    commands::cmd_history_seed(&db, "2024-01", &config).unwrap();
    assert!(commands::cmd_history_list(&db).is_ok());

    assert_eq!(db.list_months().unwrap(), vec!["2024-01"]);
    assert_eq!(db.category_average("Dining", None).unwrap(), Some(3000.0));
}

#[test]
fn test_cmd_history_record_invalid_month() {
    let dir = TempDir::new().unwrap();
    let (_, db) = setup_test_db(&dir);
    let file = write_file(&dir, "march.csv", MARCH_CSV);

    assert!(commands::cmd_history_record(&db, &file, "2024-3").is_err());
    assert!(db.list_history().unwrap().is_empty());
}

#[test]
fn test_cmd_history_list_empty() {
    let dir = TempDir::new().unwrap();
    let (_, db) = setup_test_db(&dir);
    assert!(commands::cmd_history_list(&db).is_ok());
}

#[test]
fn test_cmd_categories() {
    assert!(commands::cmd_categories(None).is_ok());
}

#[test]
fn test_build_analyzer_history_requires_db() {
    let config = commands::load_config(None, true).unwrap();
    assert!(commands::build_analyzer(config, BaselineMode::History, None, None).is_err());
}
