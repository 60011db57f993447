use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Uniform `{error, user_id}` envelope for both account endpoints:
/// exactly one of the fields is non-null.
#[derive(Serialize)]
pub struct AccountResponse {
    pub error: Option<String>,
    pub user_id: Option<String>,
}

impl AccountResponse {
    pub fn ok(user_id: String) -> Self {
        Self {
            error: None,
            user_id: Some(user_id),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            user_id: None,
        }
    }
}
