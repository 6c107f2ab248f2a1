use serde::Serialize;
use veil_dns_application::ports::ResolverStats;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// RFC 3339 UTC
    pub time: String,
    pub stats: ResolverStats,
}
