use crate::middleware::ApiKeyStore;
use std::sync::Arc;
use veil_dns_application::ports::DnsResolver;
use veil_dns_infrastructure::crypto::EnvelopeCipher;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn DnsResolver>,
    pub cipher: Option<Arc<EnvelopeCipher>>,
    pub api_keys: Arc<ApiKeyStore>,
}
