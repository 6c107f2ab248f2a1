//! Per-query pipeline for the local DNS listener.
//!
//! Cache probe → resolution RPC → response assembly. Only the first question
//! in a message is honoured; a message with an empty question section gets
//! no response at all.

use crate::dns::cache::{CacheKey, MessageCache};
use crate::dns::forwarding::MessageBuilder;
use crate::dns::record_builder::RecordBuilder;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};
use veil_dns_application::use_cases::ResolveQueryUseCase;

pub struct DnsQueryHandler {
    resolve: ResolveQueryUseCase,
    cache: Option<Arc<MessageCache>>,
    negative_ttl: Duration,
}

impl DnsQueryHandler {
    pub fn new(
        resolve: ResolveQueryUseCase,
        cache: Option<Arc<MessageCache>>,
        negative_ttl: Duration,
    ) -> Self {
        Self {
            resolve,
            cache,
            negative_ttl,
        }
    }

    /// Handle one raw DNS message. `None` means no response is sent.
    pub async fn handle(&self, query_bytes: &[u8]) -> Option<Vec<u8>> {
        let request = match Message::from_vec(query_bytes) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, "Dropping unparseable DNS message");
                return None;
            }
        };

        let question = request.queries().first()?.clone();
        let qname = question.name().to_utf8();
        let qtype = question.query_type().to_string();
        debug!(name = %qname, query_type = %qtype, "Query received");

        let key = CacheKey::new(&qname, &qtype);

        if let Some(cache) = &self.cache {
            if let Some(mut cached) = cache.get(&key) {
                debug!(name = %qname, "Cache hit");
                cached.set_id(request.id());
                return Self::serialize(&cached);
            }
        }

        let result = match self.resolve.execute(&qname, &qtype).await {
            Ok(result) => result,
            Err(e) => {
                warn!(name = %qname, error = %e, "Resolution failed");
                let mut response = Self::reply_to(&request);
                response.set_response_code(ResponseCode::ServFail);
                return Self::serialize(&response);
            }
        };

        let mut response = Self::reply_to(&request);

        if result.is_negative() {
            debug!(name = %qname, error = %result.error, "Negative answer");
            response.set_response_code(ResponseCode::NXDomain);
            if let Some(cache) = &self.cache {
                cache.insert_negative(key, &response, self.negative_ttl);
            }
            return Self::serialize(&response);
        }

        for record in &result.records {
            match RecordBuilder::build(question.name(), record) {
                Ok(resource) => {
                    response.add_answer(resource);
                }
                Err(e) => {
                    warn!(name = %qname, error = %e, "Skipping record");
                }
            }
        }

        if !result.records.is_empty() && response.answers().is_empty() {
            warn!(name = %qname, "Every record failed to construct");
            response.set_response_code(ResponseCode::ServFail);
            return Self::serialize(&response);
        }

        if !response.answers().is_empty() {
            if let Some(cache) = &self.cache {
                cache.insert(key, &response);
            }
        }

        Self::serialize(&response)
    }

    /// Copy the question section, mark the message as a response with
    /// recursion available and the authoritative bit cleared.
    fn reply_to(request: &Message) -> Message {
        let mut response = Message::new();
        response.set_id(request.id());
        response.set_message_type(MessageType::Response);
        response.set_op_code(OpCode::Query);
        response.set_recursion_desired(request.recursion_desired());
        response.set_recursion_available(true);
        response.set_authoritative(false);
        for query in request.queries() {
            response.add_query(query.clone());
        }
        response
    }

    fn serialize(message: &Message) -> Option<Vec<u8>> {
        match MessageBuilder::serialize(message) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(error = %e, "Failed to serialize DNS response");
                None
            }
        }
    }
}
