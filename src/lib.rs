//! webcore - single-process HTTP/1.1 server core
//!
//! Parses one request per connection, serves static files or dispatches to
//! registered handlers, and writes the response back.

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod routing;
pub mod server;
pub mod store;
