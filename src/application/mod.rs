pub mod app_error;
pub mod passcode;
pub mod session;
pub mod use_cases;
pub mod validators;

pub use app_error::*;
