//! Test data factories for creating valid test fixtures.
//!
//! Each factory creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::NaiveDateTime;

use crate::{
    application::use_cases::waitlist::{LinkState, WaitlistEntry},
    infra::config::AppConfig,
};

/// Create a test waitlist entry with sensible defaults.
pub fn create_test_entry(overrides: impl FnOnce(&mut WaitlistEntry)) -> WaitlistEntry {
    let mut entry = WaitlistEntry {
        token: uuid::Uuid::new_v4(),
        email: "visitor@example.com".to_string(),
        passcode: "123456".to_string(),
        link: LinkState::Unlinked,
        login_attempt: 0,
        created_at: test_datetime(),
        last_login: None,
    };
    overrides(&mut entry);
    entry
}

/// Create an app config suitable for tests, no env vars required.
pub fn create_test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        resend_api_key: secrecy::SecretString::from("test-api-key".to_string()),
        email_from: "access@shop.example.com".to_string(),
        app_origin: "https://shop.example.com".to_string(),
        cors_origin: "https://shop.example.com".parse().unwrap(),
        session_ttl_days: 7,
    }
}

pub fn test_datetime() -> NaiveDateTime {
    chrono::DateTime::from_timestamp(1_700_000_000, 0)
        .unwrap()
        .naive_utc()
}
