//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_db, load_config, build_analyzer) and categories
//! - `analyze` - Expense analysis of a transaction file
//! - `market` - Market snapshot display
//! - `history` - Spending history commands (record, list, seed)
//! - `serve` - Web server command

pub mod analyze;
pub mod core;
pub mod history;
pub mod market;
pub mod serve;

// Re-export command functions for main.rs
pub use analyze::*;
pub use core::*;
pub use history::*;
pub use market::*;
pub use serve::*;
