use serde::{Deserialize, Serialize};

/// The nurse operating the session. Used only to default-fill the
/// credential and responsible-nurse fields of a fresh record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub coren: String,
    pub nurse_name: String,
}
