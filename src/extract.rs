use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// JSON body extractor that only rejects bodies which are not JSON at all.
///
/// Unlike `axum::Json` it ignores the `Content-Type` header, reads an empty
/// body as `{}`, and treats any non-object JSON document as `{}`, so missing
/// fields fall back to their serde defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveJson<T>(pub T);

impl<T, S> FromRequest<S> for PermissiveJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        let value = parse_body(&bytes)?;
        serde_json::from_value(value)
            .map(PermissiveJson)
            .map_err(|e| AppError::BadRequest(format!("Unsupported request body: {}", e)))
    }
}

fn parse_body(bytes: &[u8]) -> Result<Value, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;

    Ok(match value {
        Value::Object(_) => value,
        _ => Value::Object(Map::new()),
    })
}
