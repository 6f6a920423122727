//! Client for the backend auth endpoints. Every operation resolves to exactly
//! one [`AuthResult`]; transport and decoding failures are translated here so
//! page controllers never see a raw error. Request bodies carry plaintext
//! passwords and must never be logged.

use crate::{
    app_lib::{ApiClient, AppError},
    features::auth::types::{
        AuthResult, EmailRequest, LoginPair, LoginRequest, LoginResponse, LookupResponse,
        NewUser, RecoveryResponse, RegisterRequest, RegisterResponse, FLAG_TRUE,
    },
};
use secrecy::{ExposeSecret, SecretString};
use std::future::Future;
use tracing::{debug, instrument, warn};

pub const LOGIN_PATH: &str = "/login";
pub const USERS_PATH: &str = "/users";
pub const LOOKUP_EMAIL_PATH: &str = "/one_users_email";
pub const RECOVERY_EMAIL_PATH: &str = "/send_recovery_email";

/// Exact message the recovery endpoint returns on success.
pub const RECOVERY_SENT_MESSAGE: &str = "Email sent successfully";
/// Case-insensitive marker the users endpoint includes when a row was created.
pub const INSERTED_MARKER: &str = "inserted";

pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "Unexpected server response";
pub const LOGIN_FAILED_MESSAGE: &str = "Sign-in failed";
pub const REGISTER_FAILED_MESSAGE: &str = "Unable to create the account. Please try again";
pub const USER_NOT_FOUND_MESSAGE: &str = "No account is registered with that email";
pub const USER_INACTIVE_MESSAGE: &str = "This account is inactive. Please contact support";
pub const RECOVERY_FAILED_MESSAGE: &str = "Unable to send the email. Please try again";

/// Backend operations the page controllers depend on.
pub trait AuthBackend: Send + Sync {
    /// Verifies credentials.
    fn authenticate(
        &self,
        identifier: &str,
        password: &SecretString,
    ) -> impl Future<Output = AuthResult> + Send;

    /// Creates an account.
    fn register(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = AuthResult> + Send;

    /// Looks the email up and, only for an active account, sends the recovery email.
    fn request_password_reset(&self, email: &str) -> impl Future<Output = AuthResult> + Send;
}

/// [`AuthBackend`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpAuthClient {
    api: ApiClient,
}

impl HttpAuthClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl AuthBackend for HttpAuthClient {
    #[instrument(skip_all)]
    async fn authenticate(&self, identifier: &str, password: &SecretString) -> AuthResult {
        let request = LoginRequest {
            logins: vec![LoginPair {
                username: identifier.to_string(),
                password: password.expose_secret().to_string(),
            }],
        };

        let result = match self
            .api
            .post_json::<_, LoginResponse>(LOGIN_PATH, &request)
            .await
        {
            Ok(response) => interpret_login(&response),
            Err(err) => from_app_error(&err),
        };
        debug!(success = result.is_success(), "login resolved");
        result
    }

    #[instrument(skip_all)]
    async fn register(&self, username: &str, email: &str, password: &SecretString) -> AuthResult {
        let request = RegisterRequest {
            users: vec![NewUser::create(
                username.to_string(),
                email.to_string(),
                password.expose_secret().to_string(),
            )],
        };

        let result = match self
            .api
            .post_json::<_, RegisterResponse>(USERS_PATH, &request)
            .await
        {
            Ok(response) => interpret_register(&response),
            Err(err) => from_app_error(&err),
        };
        debug!(success = result.is_success(), "registration resolved");
        result
    }

    #[instrument(skip_all)]
    async fn request_password_reset(&self, email: &str) -> AuthResult {
        let request = EmailRequest::single(email);

        let lookup = match self
            .api
            .post_json::<_, LookupResponse>(LOOKUP_EMAIL_PATH, &request)
            .await
        {
            Ok(response) => response,
            Err(err) => return from_app_error(&err),
        };

        match lookup_verdict(&lookup) {
            LookupVerdict::Active => {}
            LookupVerdict::NotFound => {
                debug!("recovery lookup found no account");
                return AuthResult::NotFound(USER_NOT_FOUND_MESSAGE.to_string());
            }
            LookupVerdict::Inactive => {
                debug!("recovery lookup found an inactive account");
                return AuthResult::InactiveUser(USER_INACTIVE_MESSAGE.to_string());
            }
        }

        match self
            .api
            .post_json::<_, RecoveryResponse>(RECOVERY_EMAIL_PATH, &request)
            .await
        {
            Ok(response) => interpret_recovery(&response),
            Err(err) => from_app_error(&err),
        }
    }
}

/// What the lookup step found; only `Active` allows the send step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupVerdict {
    Active,
    Inactive,
    NotFound,
}

#[must_use]
pub fn lookup_verdict(response: &LookupResponse) -> LookupVerdict {
    match response.users.first() {
        None => LookupVerdict::NotFound,
        Some(user) if user.active.as_deref() == Some(FLAG_TRUE) => LookupVerdict::Active,
        Some(_) => LookupVerdict::Inactive,
    }
}

/// `result[0].value == "1"` with no error is a success; anything else surfaces the error.
#[must_use]
pub fn interpret_login(response: &LoginResponse) -> AuthResult {
    let Some(entry) = response.result.first() else {
        return AuthResult::ServerError(UNEXPECTED_RESPONSE_MESSAGE.to_string());
    };

    let error = non_empty(entry.error.as_deref());
    if error.is_none() && entry.value.as_deref() == Some(FLAG_TRUE) {
        AuthResult::Success {
            message: non_empty(entry.msg.as_deref()).map(str::to_string),
        }
    } else {
        AuthResult::InvalidCredentials(error.unwrap_or(LOGIN_FAILED_MESSAGE).to_string())
    }
}

/// A `msg` containing "inserted" (any case) is a success; other messages are surfaced verbatim.
#[must_use]
pub fn interpret_register(response: &RegisterResponse) -> AuthResult {
    let Some(entry) = response.result.first() else {
        return AuthResult::ServerError(UNEXPECTED_RESPONSE_MESSAGE.to_string());
    };

    match non_empty(entry.msg.as_deref()) {
        Some(message) if message.to_lowercase().contains(INSERTED_MARKER) => {
            AuthResult::Success {
                message: Some(message.to_string()),
            }
        }
        Some(message) => AuthResult::ServerError(message.to_string()),
        None => AuthResult::ServerError(REGISTER_FAILED_MESSAGE.to_string()),
    }
}

/// Only the byte-exact success message counts; padded or re-cased variants are failures.
#[must_use]
pub fn interpret_recovery(response: &RecoveryResponse) -> AuthResult {
    let message = response.message.as_deref();
    if message == Some(RECOVERY_SENT_MESSAGE) {
        return AuthResult::Success {
            message: Some(RECOVERY_SENT_MESSAGE.to_string()),
        };
    }

    AuthResult::ServerError(non_empty(message).unwrap_or(RECOVERY_FAILED_MESSAGE).to_string())
}

/// Requests that never got an answer are network errors; everything else is a server error.
#[must_use]
pub fn from_app_error(err: &AppError) -> AuthResult {
    if err.is_transport() {
        warn!("auth request did not complete: {err}");
        return AuthResult::NetworkError;
    }

    warn!("auth request failed: {err}");
    match err {
        AppError::Http { status, .. } => {
            AuthResult::ServerError(format!("{UNEXPECTED_RESPONSE_MESSAGE} ({status})"))
        }
        _ => AuthResult::ServerError(UNEXPECTED_RESPONSE_MESSAGE.to_string()),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
