//! MCP (Model Context Protocol) server and tool types.
//!
//! This module provides an MCP server implementation for the Twilio API,
//! allowing AI assistants to redirect, cancel, or complete calls.
//!
//! # Example
//!
//! ```no_run
//! use twilapi::mcp::TwilioServer;
//!
//! # fn main() -> twilapi::Result<()> {
//! let server = TwilioServer::from_env()?;
//! // Server can now be used with rmcp transport
//! # Ok(())
//! # }
//! ```

mod params;
mod server;

pub use params::*;
pub use server::TwilioServer;
