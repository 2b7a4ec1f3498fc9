//! Domain primitives for the dual-session cross-account transfer demo.
//!
//! This crate owns configuration loading, fixture generation, the temporary
//! credential model, and the response envelope contract. It intentionally
//! excludes AWS SDK and Lambda runtime concerns, which live in
//! `dual_session_lambda`.

pub mod config;
pub mod contract;
pub mod credentials;
pub mod error;
pub mod fixture;
