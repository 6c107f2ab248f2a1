//! Veil DNS Application Layer
//!
//! Ports (traits) that decouple the two tiers from their adapters, plus the
//! use cases that orchestrate them.
pub mod ports;
pub mod use_cases;
