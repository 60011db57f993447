use serde::{Deserialize, Deserializer, Serialize};

/// Loosely-typed creation request.
///
/// Fields are optional and `permanent` is raw JSON so the handler can run
/// the presence and strictly-boolean checks itself, in order, with the
/// exact user-facing messages. An absent `permanent` key and an explicit
/// JSON `null` are distinct: absence is a missing parameter, `null` is a
/// present-but-not-boolean value.
#[derive(Deserialize)]
pub struct CreateLinkRequest {
    pub creator: Option<String>,
    pub url: Option<String>,
    pub alias: Option<String>,
    #[serde(default, deserialize_with = "present_value")]
    pub permanent: Option<serde_json::Value>,
}

// Wraps whatever was sent, `null` included, so only a missing key maps
// to `None`. A plain `Option<Value>` would fold `null` into `None`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// `{error, short_url}` envelope. Also used for the view endpoint's
/// absent-alias error, which carries the same shape.
#[derive(Serialize)]
pub struct CreateLinkResponse {
    pub error: Option<String>,
    pub short_url: Option<String>,
}

impl CreateLinkResponse {
    pub fn ok(short_url: String) -> Self {
        Self {
            error: None,
            short_url: Some(short_url),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            short_url: None,
        }
    }
}

#[derive(Serialize)]
pub struct DeleteLinkResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl DeleteLinkResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            message: None,
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
