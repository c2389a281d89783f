//! Test utilities.
//!
//! This module provides:
//! - In-memory repository and gateway implementations for mocking persistence
//!   and email dispatch
//! - Test data factories for creating valid fixtures
//! - Helper builders for constructing use cases and app state with test
//!   dependencies

mod app_state_builder;
mod factories;
mod waitlist_mocks;

pub use app_state_builder::*;
pub use factories::*;
pub use waitlist_mocks::*;
