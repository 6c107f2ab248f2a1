//! Veil DNS CLI
//!
//! Bootstrap, dependency wiring, and server loops shared by the
//! `veil-dns-local` and `veil-dns-remote` binaries.
pub mod bootstrap;
pub mod local;
pub mod remote;
