//! Courier - minimal HTTP/1.1 server
//!
//! Parses one request per connection, routes it to the root, echo,
//! user-agent or file handlers, and writes back a response, gzip-encoded
//! when the client asks for it.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
pub mod storage;
