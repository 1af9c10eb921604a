//! Questline Engine library.
//!
//! The event-to-progress pipeline for farming tasks.
//!
//! ## Structure
//!
//! - `use_cases/` - Pipeline stages (derive, filter, match, verify, mutate)
//! - `infrastructure/` - Port traits and default in-process adapters
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures module for integration testing.
#[cfg(test)]
pub mod test_fixtures;


pub use app::{App, Integrations};
