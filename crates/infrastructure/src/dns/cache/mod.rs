pub mod key;
pub mod message_cache;
pub mod result_cache;

pub use key::CacheKey;
pub use message_cache::MessageCache;
pub use result_cache::ResultCache;
