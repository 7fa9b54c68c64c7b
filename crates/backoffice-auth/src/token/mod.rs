//! Access-token payload decoding.
//!
//! Tokens are JWT-shaped (`header.payload.signature`). The client never
//! verifies signatures; it only reads the payload to learn the expiry.

pub mod claims;
pub mod decoder;

pub use claims::TokenClaims;
pub use decoder::{TokenError, decode_claims};
