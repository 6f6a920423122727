//! Request and response types for the backend auth endpoints, plus the
//! interpreted [`AuthResult`]. Request payloads carry plaintext passwords, so
//! they must never be logged.

use serde::{Deserialize, Serialize};

/// Marker the backend expects for "new user" rows.
pub const NEW_USER_ID: &str = "0";
/// Action code for "create" in the `/users` endpoint.
pub const ACTION_CREATE: &str = "1";
/// Flag value the backend uses for "true" (`value`, `active`).
pub const FLAG_TRUE: &str = "1";

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginPair {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginPair")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub logins: Vec<LoginPair>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResultEntry {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub msg: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    #[serde(default)]
    pub result: Vec<LoginResultEntry>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub user_id: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub action: String,
}

impl NewUser {
    /// Builds a create-user row with the backend's synthetic id and action markers.
    #[must_use]
    pub fn create(username: String, email: String, password: String) -> Self {
        Self {
            user_id: NEW_USER_ID.to_string(),
            email,
            username,
            password,
            action: ACTION_CREATE.to_string(),
        }
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("action", &self.action)
            .finish()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub users: Vec<NewUser>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResultEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub msg: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    #[serde(default)]
    pub result: Vec<RegisterResultEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailEntry {
    pub email: String,
}

/// Body shared by `/one_users_email` and `/send_recovery_email`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailRequest {
    pub users: Vec<EmailEntry>,
}

impl EmailRequest {
    #[must_use]
    pub fn single(email: &str) -> Self {
        Self {
            users: vec![EmailEntry {
                email: email.to_string(),
            }],
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LookupUser {
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub active: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LookupResponse {
    #[serde(default)]
    pub users: Vec<LookupUser>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecoveryResponse {
    #[serde(default, deserialize_with = "lenient::text")]
    pub message: Option<String>,
}

/// Field decoders for a backend that mixes JSON types (`"1"`, `1`, `false`)
/// in the same slots.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Only string flags survive, so `1` or `true` never compare equal to `"1"`.
    pub(super) fn flag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(value)) => Some(value),
            _ => None,
        })
    }

    /// Strings are kept; falsy values (`null`, `false`, `0`) mean "absent";
    /// any other value is kept as its JSON text.
    pub(super) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null | Value::Bool(false)) => None,
            Some(Value::String(value)) => Some(value),
            Some(Value::Number(number)) if number.as_f64() == Some(0.0) => None,
            Some(other) => Some(other.to_string()),
        })
    }
}

/// Failure categories surfaced to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The backend explicitly denied the request.
    AuthRejected,
    /// The backend answered with an unexpected payload or a failure message.
    ServerLogic,
    /// The request could not complete.
    Network,
}

/// Interpreted outcome of one backend operation. Exactly one per request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthResult {
    Success { message: Option<String> },
    InvalidCredentials(String),
    InactiveUser(String),
    NotFound(String),
    ServerError(String),
    NetworkError,
}

pub const NETWORK_ERROR_MESSAGE: &str = "Unable to connect to the server";

impl AuthResult {
    #[must_use]
    pub fn success() -> Self {
        Self::Success { message: None }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Category of a failed outcome, `None` on success.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::InvalidCredentials(_) | Self::InactiveUser(_) | Self::NotFound(_) => {
                Some(FailureKind::AuthRejected)
            }
            Self::ServerError(_) => Some(FailureKind::ServerLogic),
            Self::NetworkError => Some(FailureKind::Network),
        }
    }

    /// Message to show the user, if the outcome carries one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message } => message.as_deref(),
            Self::InvalidCredentials(message)
            | Self::InactiveUser(message)
            | Self::NotFound(message)
            | Self::ServerError(message) => Some(message),
            Self::NetworkError => Some(NETWORK_ERROR_MESSAGE),
        }
    }
}
