pub mod cache;
pub mod forwarding;
pub mod handler;
pub mod record_builder;
pub mod record_type_map;
pub mod transport;
pub mod upstream;

pub use cache::{CacheKey, MessageCache, ResultCache};
pub use handler::DnsQueryHandler;
pub use record_builder::RecordBuilder;
pub use record_type_map::RecordTypeMapper;
pub use upstream::UpstreamResolver;
