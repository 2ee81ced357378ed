//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analysis;
pub mod categories;
pub mod health;
pub mod history;
pub mod market;

// Re-export all handlers for use in router
pub use analysis::*;
pub use categories::*;
pub use health::*;
pub use history::*;
pub use market::*;
