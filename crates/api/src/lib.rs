//! Veil DNS API Layer
//!
//! The remote tier's HTTP surface: the resolve RPC (plus its obfuscation
//! alias), the health endpoint, and API-key authentication.
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use middleware::ApiKeyStore;
pub use routes::create_router;
pub use state::AppState;
