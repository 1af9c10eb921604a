//! External dependency implementations: port traits plus the default
//! in-process adapters.

pub mod catalog;
pub mod diagnostics;
pub mod ports;
pub mod progress;

pub use catalog::{CatalogEligibility, StaticQuestCatalog};
pub use diagnostics::TracingDiagnostics;
pub use progress::InMemoryProgressRepo;
