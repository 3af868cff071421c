//! Shared helpers for login page integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::panic)]

use portico_login::mocks::{MockAuthProvider, RecordingTelemetry};
use portico_login::{
    FormView, Identity, LoadingFlag, LoginConfig, LoginEnvironment, LoginPage, PageView,
};
use std::time::Duration;

pub type TestEnv = LoginEnvironment<MockAuthProvider, LoadingFlag, RecordingTelemetry>;
pub type TestPage = LoginPage<MockAuthProvider, LoadingFlag, RecordingTelemetry>;

pub const WAIT: Duration = Duration::from_secs(2);

pub fn env(auth: MockAuthProvider, telemetry: RecordingTelemetry) -> TestEnv {
    portico_testing::init_test_tracing();
    LoginEnvironment::new(auth, LoadingFlag::new(), telemetry, LoginConfig::default())
}

pub fn ada() -> Identity {
    Identity {
        id: "42".to_string(),
        uid: "fb-uid-42".to_string(),
        email: "ada@example.com".to_string(),
        name: "Ada Lovelace".to_string(),
        photo_url: Some("https://example.com/ada.png".to_string()),
    }
}

pub fn grace() -> Identity {
    Identity {
        id: "7".to_string(),
        uid: "fb-uid-7".to_string(),
        email: "grace@example.com".to_string(),
        name: "Grace Hopper".to_string(),
        photo_url: None,
    }
}

/// Poll `check` until it returns true or the wait runs out.
pub async fn eventually<F>(mut check: F)
where
    F: FnMut() -> bool,
{
    tokio::time::timeout(WAIT, async {
        while !check() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();
}

/// Poll the page until its view satisfies `check`, and return that view.
pub async fn view_until<F>(page: &TestPage, check: F) -> PageView
where
    F: Fn(&PageView) -> bool,
{
    tokio::time::timeout(WAIT, async {
        loop {
            let view = page.view().await;
            if check(&view) {
                return view;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap()
}

/// The form view, panicking if the page shows something else.
pub async fn form(page: &TestPage) -> FormView {
    match page.view().await {
        PageView::Form(form) => form,
        other => panic!("expected the form, got {other:?}"),
    }
}
