//! AWS-oriented adapters and handlers for the dual-session transfer demo.
//!
//! This crate owns runtime integration details (the Lambda handler, object
//! store and role-session ports) on top of the domain primitives in
//! `dual_session_core`. Concrete S3 and STS adapters live in the
//! `dual_session_lambda` binary.

pub mod adapters;
pub mod handlers;
