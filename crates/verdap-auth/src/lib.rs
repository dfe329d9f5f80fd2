//! Bind authentication for verdap
//!
//! Validates simple binds against the configured user records and tracks the
//! resulting session state.

pub mod bind;
pub mod session;

pub use bind::{Authenticator, BindVerdict};
pub use session::SessionState;
