//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 request/response core: one request per
//! connection, no keep-alive.
//!
//! # Architecture
//!
//! - **`tokenizer`**: Splits a receive buffer into request line, header lines and body
//! - **`parser`**: Builds a [`request::Request`] from the tokens
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`encoding`**: `Accept-Encoding` negotiation and gzip
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`connection`**: The per-connection state machine
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for request bytes (bounded size and time)
//!        └──────┬──────┘
//!               │ Request parsed          │ Malformed / too large
//!               ▼                         │
//!        ┌──────────────────┐             │
//!        │   Processing     │ ← Route     │
//!        └──────┬───────────┘             │
//!               │ Response ready          │
//!               ▼                         ▼
//!        ┌──────────────────────────────────┐
//!        │             Writing              │ ← Send response
//!        └──────┬───────────────────────────┘
//!               ▼
//!             Closed
//! ```

pub mod connection;
pub mod encoding;
pub mod parser;
pub mod request;
pub mod response;
pub mod tokenizer;
pub mod writer;
