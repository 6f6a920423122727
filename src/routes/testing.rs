use crate::features::auth::{AuthBackend, AuthResult};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

/// Scripted backend recording every call.
#[derive(Clone, Debug)]
pub(crate) struct FakeBackend {
    result: AuthResult,
    hang: bool,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Vec<String>>>,
}

impl FakeBackend {
    pub(crate) fn answering(result: AuthResult) -> Self {
        Self {
            result,
            hang: false,
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Backend whose calls never resolve.
    pub(crate) fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::answering(AuthResult::success())
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Vec<String> {
        self.last_request
            .lock()
            .map(|request| request.clone())
            .unwrap_or_default()
    }

    async fn answer(&self, request: Vec<String>) -> AuthResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = request;
        }
        if self.hang {
            std::future::pending::<()>().await;
        }
        self.result.clone()
    }
}

impl AuthBackend for FakeBackend {
    async fn authenticate(&self, identifier: &str, password: &SecretString) -> AuthResult {
        self.answer(vec![
            identifier.to_string(),
            password.expose_secret().to_string(),
        ])
        .await
    }

    async fn register(&self, username: &str, email: &str, password: &SecretString) -> AuthResult {
        self.answer(vec![
            username.to_string(),
            email.to_string(),
            password.expose_secret().to_string(),
        ])
        .await
    }

    async fn request_password_reset(&self, email: &str) -> AuthResult {
        self.answer(vec![email.to_string()]).await
    }
}
