//! CLI command handlers
//!
//! Project scaffolding, profile management, and target listing, extracted
//! from main.rs for better organization.

pub mod new;
pub mod profile;
pub mod targets;
