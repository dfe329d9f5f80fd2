//! Verdap Core Library
//!
//! Configuration records, error taxonomy, and the generic entry types shared
//! by the verdap directory lab.

pub mod config;
pub mod entry;
pub mod error;

pub use config::VerdapConfig;
pub use entry::{Attribute, Entry};
pub use error::{Error, Result};

/// Verdap version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base DN used when the configuration does not set one
pub const DEFAULT_BASE_DN: &str = "dc=hack,dc=me";

/// Login shell reported for every account entry
pub const LOGIN_SHELL: &str = "/bin/bash";

/// Home directory prefix for account entries
pub const HOME_PREFIX: &str = "/home/";

/// Account status reported for every account entry
pub const ACCOUNT_STATUS: &str = "active";
