//! Credential digest helpers for verdap

pub mod hash;

pub use hash::{credential_matches, sha256_hex};
