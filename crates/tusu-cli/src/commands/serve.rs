//! Server command implementation

use std::path::Path;

use anyhow::Result;

use super::{build_analyzer, load_config, open_db};
use crate::cli::BaselineMode;

pub async fn cmd_serve(
    db_path: &Path,
    config_path: Option<&Path>,
    host: &str,
    port: u16,
    baselines: BaselineMode,
    offline: bool,
    allowed_origins: Vec<String>,
) -> Result<()> {
    let config = load_config(config_path, offline)?;

    println!("🚀 Starting Tusu web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    println!(
        "   Baselines: {}",
        match baselines {
            BaselineMode::Static => "static table",
            BaselineMode::History => "recorded history",
        }
    );
    if config.market.offline {
        println!("   ⚠️  Market feed OFFLINE (fallback trend)");
    }
    if !allowed_origins.is_empty() {
        println!("   CORS origins: {}", allowed_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path)?;
    // Per-request history baselines are wired by the server itself
    let analyzer = build_analyzer(config, BaselineMode::Static, None, None)?;

    let server_config = tusu_server::ServerConfig {
        allowed_origins,
        history_baselines: baselines == BaselineMode::History,
    };

    tusu_server::serve(analyzer, Some(db), host, port, server_config).await?;

    Ok(())
}
