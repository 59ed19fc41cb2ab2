//! Normalization of persistence failures into a single user-facing message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::repository::RepositoryError;

pub const CONNECTION_MESSAGE: &str =
    "Erro de conexão. Verifique sua internet e tente novamente.";
pub const GENERIC_MESSAGE: &str = "Erro ao salvar SAE. Tente novamente.";

/// Substrings (lowercase) that mark a message as a connectivity failure.
const NETWORK_SIGNATURES: [&str; 6] = [
    "network",
    "timeout",
    "timed out",
    "econnrefused",
    "connection",
    "offline",
];

/// Normalized failure handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFailure {
    pub success: bool,
    pub error: String,
}

impl SaveFailure {
    pub fn new(error: impl Into<String>) -> Self {
        SaveFailure {
            success: false,
            error: error.into(),
        }
    }
}

impl From<&RepositoryError> for SaveFailure {
    fn from(err: &RepositoryError) -> Self {
        SaveFailure::new(normalize(err))
    }
}

/// Extract the most useful message from a failed create/update.
///
/// Priority: the server's list of validation messages, the server's single
/// message field, the error's own message, a connectivity heuristic, and
/// finally a generic message. Never panics on odd shapes.
pub fn normalize(err: &RepositoryError) -> String {
    if let RepositoryError::Rejected {
        body: Some(body), ..
    } = err
    {
        if let Some(list) = server_errors(body) {
            return list;
        }
        if let Some(message) = server_message(body) {
            return message;
        }
    }

    let own = own_message(err);
    if let Some(message) = own
        && !looks_like_network(message)
    {
        return message.to_string();
    }

    if matches!(err, RepositoryError::Transport(_)) || own.is_some_and(looks_like_network) {
        return CONNECTION_MESSAGE.to_string();
    }

    GENERIC_MESSAGE.to_string()
}

/// `errors: [...]` where each entry is a string or an object with a
/// `msg`/`message` field.
fn server_errors(body: &Value) -> Option<String> {
    let messages: Vec<&str> = body
        .get("errors")?
        .as_array()?
        .iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s.as_str()),
            Value::Object(obj) => obj
                .get("msg")
                .or_else(|| obj.get("message"))
                .and_then(Value::as_str),
            _ => None,
        })
        .filter(|s| !s.trim().is_empty())
        .collect();

    (!messages.is_empty()).then(|| messages.join(", "))
}

fn server_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// A rejection has no message of its own beyond its status line, which is
/// not shown to the user; without a usable body it ends at the generic text.
fn own_message(err: &RepositoryError) -> Option<&str> {
    match err {
        RepositoryError::Transport(m) | RepositoryError::Other(m) if !m.trim().is_empty() => {
            Some(m.as_str())
        }
        _ => None,
    }
}

fn looks_like_network(message: &str) -> bool {
    let lower = message.to_lowercase();
    NETWORK_SIGNATURES.iter().any(|sig| lower.contains(sig))
}
