//! Data models module
//!
//! Defines request and response data structures for the Cloudflare API

pub mod cloudflare;

pub use cloudflare::*;
