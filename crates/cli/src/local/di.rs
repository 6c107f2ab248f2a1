use std::sync::Arc;
use tracing::info;
use veil_dns_application::ports::ResolverApi;
use veil_dns_application::use_cases::ResolveQueryUseCase;
use veil_dns_domain::LocalConfig;
use veil_dns_infrastructure::crypto::EnvelopeCipher;
use veil_dns_infrastructure::dns::cache::MessageCache;
use veil_dns_infrastructure::dns::DnsQueryHandler;
use veil_dns_infrastructure::rpc::ApiClient;

pub struct LocalServices {
    pub handler: Arc<DnsQueryHandler>,
    pub cache: Option<Arc<MessageCache>>,
    pub client: Arc<ApiClient>,
}

impl LocalServices {
    pub fn new(config: &LocalConfig) -> anyhow::Result<Self> {
        info!("Initializing local resolver services");

        let cipher = if config.security.encryption_enabled {
            info!("Envelope encryption enabled");
            Some(Arc::new(EnvelopeCipher::new(
                &config.security.encryption_key,
            )?))
        } else {
            None
        };

        let client = Arc::new(ApiClient::new(&config.api, cipher)?);
        info!(
            endpoints = config.api.endpoints.len(),
            load_balancing = ?config.api.load_balancing,
            "RPC client created"
        );

        let cache = if config.cache.enabled {
            info!(max_items = config.cache.max_items, "Response cache enabled");
            Some(Arc::new(MessageCache::new(
                config.cache.max_items,
                config.cache.default_ttl(),
                config.cache.min_ttl(),
                config.cache.max_ttl(),
            )))
        } else {
            None
        };

        let api: Arc<dyn ResolverApi> = client.clone();
        let handler = Arc::new(DnsQueryHandler::new(
            ResolveQueryUseCase::new(api),
            cache.clone(),
            config.cache.negative_ttl(),
        ));

        Ok(Self {
            handler,
            cache,
            client,
        })
    }
}
