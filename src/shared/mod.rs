// Shared kernel: error types, local persistence plumbing and utilities
// used by every bounded context.

pub mod database;
pub mod errors;
pub mod utils;

// Re-exports for convenience
pub use database::Database;
