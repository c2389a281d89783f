pub mod adapters;
pub mod application;
pub mod infra;

// Test utilities (in-memory repos, mocks, fixture factories)
#[cfg(test)]
pub mod test_utils;

// Re-exports for shorter use statements.
pub use application::*;
