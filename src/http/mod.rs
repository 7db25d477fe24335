//! HTTP/1.1 wire handling.
//!
//! - **`connection`**: drives one accepted socket from bytes in to bytes out
//! - **`parser`**: parses a request out of a byte buffer
//! - **`request`**: request representation, cookies, route keys
//! - **`response`**: response representation with builder pattern
//! - **`headers`**: ordered response header list
//! - **`writer`**: serializes and writes responses
//! - **`mime`**: content type detection based on file extensions
//!
//! # Connection lifecycle
//!
//! Exactly one request is served per connection:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for request line, headers, body
//!        └──────┬──────┘
//!               │ Request parsed (or malformed → 400)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Dispatch on a blocking worker
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response, then shut down
//!        └──────┬───────────┘
//!               ▼
//!             Closed
//! ```

pub mod connection;
pub mod headers;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
