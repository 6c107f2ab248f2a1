use std::sync::Arc;
use tracing::info;
use veil_dns_api::{ApiKeyStore, AppState};
use veil_dns_application::ports::DnsResolver;
use veil_dns_domain::RemoteConfig;
use veil_dns_infrastructure::crypto::EnvelopeCipher;
use veil_dns_infrastructure::dns::cache::ResultCache;
use veil_dns_infrastructure::dns::UpstreamResolver;

pub struct RemoteServices {
    pub state: AppState,
    pub cache: Option<Arc<ResultCache>>,
}

impl RemoteServices {
    pub fn new(config: &RemoteConfig) -> anyhow::Result<Self> {
        info!("Initializing remote resolution services");

        let cipher = if config.security.encryption_enabled {
            info!("Envelope encryption enabled");
            Some(Arc::new(EnvelopeCipher::new(
                &config.security.encryption_key,
            )?))
        } else {
            None
        };

        let cache = if config.resolver.cache_enabled {
            info!(
                max_items = config.resolver.cache_max_items,
                ttl_secs = config.resolver.cache_ttl_secs,
                "Result cache enabled"
            );
            Some(Arc::new(ResultCache::new(
                config.resolver.cache_max_items,
                config.resolver.cache_ttl(),
            )))
        } else {
            None
        };

        let resolver = Arc::new(UpstreamResolver::new(&config.resolver, cache.clone())?);
        info!(
            upstreams = config.resolver.upstreams.len(),
            "Upstream resolver created"
        );

        let resolver: Arc<dyn DnsResolver> = resolver;
        let state = AppState {
            resolver,
            cipher,
            api_keys: Arc::new(ApiKeyStore::new(&config.security.api_keys)),
        };

        Ok(Self { state, cache })
    }
}
