//! Library crate entry point.
//! Exposes the session, navigation guard and API client to embedding code
//! and integration tests. The `myerp` binary lives in src/main.rs.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod router;
pub mod storage;
pub mod validators;
