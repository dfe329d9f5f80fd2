//! Directory engine for verdap
//!
//! Materializes the in-memory entry set from the configuration records and
//! answers search requests over it. The engine holds no mutable state: every
//! call derives what it needs from the immutable configuration snapshot, so
//! concurrent binds and searches need no locking.

pub mod dn;
pub mod filter;
pub mod materialize;
pub mod membership;
pub mod schema;
pub mod search;

pub use filter::Filter;
pub use materialize::materialize;
pub use membership::MembershipResolver;
pub use search::{Scope, SearchEngine, SearchRequest};
