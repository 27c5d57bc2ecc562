#![forbid(unsafe_code)]

//! Core domain model and business logic for the Liftplan workout planner.
//!
//! This crate provides:
//! - Domain types (workout types, plan days, logged-set keys)
//! - Exercise catalog
//! - Monthly plan generation
//! - Next-load recommendations and weekly summaries
//! - Logbook persistence and CSV export

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod logbook;
pub mod plan;
pub mod progression;
pub mod summary;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_catalog, templates_for};
pub use config::Config;
pub use logbook::Logbook;
pub use plan::{generate_explicit, generate_monthly, today_summary};
pub use progression::recommend_next_load;
pub use summary::{day_hints, weekly_summary};
pub use export::{render_csv, write_csv};
