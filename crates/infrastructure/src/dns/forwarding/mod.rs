//! DNS message construction and parsing for the upstream path.
//!
//! Uses `hickory-proto` for wire format serialization/deserialization; all
//! query and response logic is owned here.

pub mod message_builder;
pub mod response_parser;

pub use message_builder::MessageBuilder;
pub use response_parser::ResponseParser;
