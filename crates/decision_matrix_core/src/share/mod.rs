//! Share links.
//!
//! # Responsibility
//! - Encode one project document into a URL-fragment-safe token and back.
//! - Parse `share=<token>` out of a location fragment and compose links.
//!
//! # Invariants
//! - `decode(encode(p)) == p` for every project document.
//! - Decode failures are returned as values, never panics.

pub mod codec;
pub mod link;
