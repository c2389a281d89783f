//! Builders wiring use cases and app state to in-memory test dependencies.

use std::sync::Arc;

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::waitlist::WaitlistUseCases,
    test_utils::{
        create_test_config, InMemoryUserRepo, InMemoryWaitlistRepo, RecordingEmailSender,
    },
};

/// Build use cases around the given waitlist repo, returning handles to all
/// test dependencies for assertions.
pub fn use_cases_with(
    waitlist: InMemoryWaitlistRepo,
) -> (
    WaitlistUseCases,
    Arc<InMemoryWaitlistRepo>,
    Arc<InMemoryUserRepo>,
    Arc<RecordingEmailSender>,
) {
    let waitlist = Arc::new(waitlist);
    let users = Arc::new(InMemoryUserRepo::new());
    let emails = Arc::new(RecordingEmailSender::new());
    let use_cases = WaitlistUseCases::new(
        waitlist.clone(),
        users.clone(),
        emails.clone(),
        "https://shop.example.com".into(),
    );
    (use_cases, waitlist, users, emails)
}

/// App state backed entirely by in-memory mocks, for route-level tests.
pub struct TestApp {
    pub state: AppState,
    pub waitlist: Arc<InMemoryWaitlistRepo>,
    pub users: Arc<InMemoryUserRepo>,
    pub emails: Arc<RecordingEmailSender>,
}

pub fn test_app_state() -> TestApp {
    let (use_cases, waitlist, users, emails) = use_cases_with(InMemoryWaitlistRepo::new());
    let state = AppState {
        config: Arc::new(create_test_config()),
        waitlist_use_cases: Arc::new(use_cases),
    };
    TestApp {
        state,
        waitlist,
        users,
        emails,
    }
}
