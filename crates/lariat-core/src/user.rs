use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A registered account.
///
/// Passwords are stored and compared in plaintext, matching the system
/// this replaces. Known weakness, out of scope to fix here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: Timestamp,
}
