use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::collections::HashSet;
use std::sync::RwLock;

/// API-key allow-list. Read on every protected request; writes happen only
/// on explicit admin operations.
pub struct ApiKeyStore {
    keys: RwLock<HashSet<String>>,
}

impl ApiKeyStore {
    pub fn new(keys: &[String]) -> Self {
        Self {
            keys: RwLock::new(keys.iter().cloned().collect()),
        }
    }

    pub fn is_valid(&self, key: &str) -> bool {
        self.keys.read().unwrap().contains(key)
    }

    pub fn add(&self, key: String) {
        self.keys.write().unwrap().insert(key);
    }

    pub fn remove(&self, key: &str) {
        self.keys.write().unwrap().remove(key);
    }

    pub fn len(&self) -> usize {
        self.keys.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    match extract_api_key(&request) {
        Some(key) if state.api_keys.is_valid(&key) => Ok(next.run(request).await),
        _ => Err(unauthorized()),
    }
}

/// `X-API-Key` header, with a query-string fallback for clients that
/// cannot set headers.
fn extract_api_key(request: &Request) -> Option<String> {
    if let Some(key) = request
        .headers()
        .get("X-API-Key")
        .and_then(|value| value.to_str().ok())
    {
        return Some(key.to_string());
    }

    request.uri().query().and_then(|query| {
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix("api_key=").map(str::to_string))
    })
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": "invalid or missing API key"
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_validates_and_mutates_keys() {
        let store = ApiKeyStore::new(&["alpha".to_string()]);
        assert!(store.is_valid("alpha"));
        assert!(!store.is_valid("beta"));

        store.add("beta".to_string());
        assert!(store.is_valid("beta"));

        store.remove("alpha");
        assert!(!store.is_valid("alpha"));
        assert_eq!(store.len(), 1);
    }
}
