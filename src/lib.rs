//! Healthcare provider directory.
//!
//! Serves a provider directory from two static JSON datasets and answers one
//! filtering query: narrow providers by specialty, city and insurance plan,
//! and label each result with its network status for the selected plan.
//!
//! ```text
//! POST /search  {"specialty": "Cardiology", "plan_id": 10}
//! ──────────────────────────────────────────────────────────
//! [{"id": 1, "name": "...", ..., "network_status": "in-network"}]
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`directory`]: Datasets, city derivation and search
//! - [`api`]: HTTP page, search endpoint and operational endpoints
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{DirectoryError, Result};
