use crate::dto::HealthResponse;
use crate::errors::ApiError;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use veil_dns_domain::{DomainError, RecordType, ResolutionResult, ResolveRequest};

/// Ceiling for one resolver call, independent of per-upstream timeouts.
const RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);

/// POST /api/v1/resolve (and its alias /api/v1/data).
///
/// Resolution failures ride in-band in the `error` field at HTTP 200 so
/// that client retry logic treats them as definitive answers; only
/// malformed requests get a 4xx.
#[instrument(skip_all)]
pub async fn resolve(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ResolutionResult>, ApiError> {
    let request = decode_request(&state, &body)?;

    if request.domain.is_empty() {
        return Err(ApiError(DomainError::InvalidRequest(
            "domain is required".to_string(),
        )));
    }

    let type_mnemonic = if request.record_type.is_empty() {
        "A".to_string()
    } else {
        request.record_type.to_uppercase()
    };

    let record_type = match type_mnemonic.parse::<RecordType>() {
        Ok(record_type) => record_type,
        Err(message) => {
            debug!(domain = %request.domain, requested = %type_mnemonic, "Unsupported record type");
            return Ok(Json(ResolutionResult::failure(request.domain, message)));
        }
    };

    let result = match tokio::time::timeout(
        RESOLVE_TIMEOUT,
        state.resolver.resolve(&request.domain, record_type),
    )
    .await
    {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            warn!(domain = %request.domain, error = %e, "Resolution failed");
            ResolutionResult::failure(&request.domain, e.to_string())
        }
        Err(_) => {
            warn!(domain = %request.domain, "Resolution timed out");
            ResolutionResult::failure(&request.domain, DomainError::QueryTimeout.to_string())
        }
    };

    Ok(Json(result))
}

/// With a cipher configured the body is `{"data": <envelope>}`; an empty
/// `data` falls back to the plain form for unencrypted clients. A decoded
/// envelope is indistinguishable from a directly-posted plaintext body.
fn decode_request(state: &AppState, body: &[u8]) -> Result<ResolveRequest, ApiError> {
    let Some(cipher) = &state.cipher else {
        return parse_plain(body);
    };

    let envelope: veil_dns_domain::EncryptedPayload = serde_json::from_slice(body)
        .map_err(|e| DomainError::InvalidRequest(format!("invalid request body: {}", e)))?;

    if envelope.data.is_empty() {
        return parse_plain(body);
    }

    let plaintext = cipher.decrypt(&envelope.data)?;
    serde_json::from_slice(&plaintext)
        .map_err(|e| DomainError::InvalidRequest(format!("invalid decrypted payload: {}", e)))
        .map_err(ApiError)
}

fn parse_plain(body: &[u8]) -> Result<ResolveRequest, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| DomainError::InvalidRequest(format!("invalid request body: {}", e)))
        .map_err(ApiError)
}

/// GET /health
#[instrument(skip_all)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        time: Utc::now().to_rfc3339(),
        stats: state.resolver.stats(),
    })
}
