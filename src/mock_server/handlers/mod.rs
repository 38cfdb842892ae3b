//! HTTP request handlers for the mock server.

pub mod calls;

pub use calls::*;
