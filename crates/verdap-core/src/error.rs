//! Error types for verdap

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Bind-path errors, logged server side and collapsed to a uniform
    // rejection before a client sees them.
    #[error("malformed bind identity: {0}")]
    MalformedIdentity(String),

    #[error("no such user: {0}")]
    UserNotFound(String),

    #[error("no such group: {0}")]
    GroupNotFound(String),

    #[error("credential mismatch")]
    CredentialMismatch,

    // Search-path errors, surfaced with their distinguishing result code.
    #[error("insufficient access rights")]
    InsufficientAccess,

    #[error("size limit exceeded: {0} entries matched")]
    SizeLimitExceeded(usize),

    #[error("malformed filter: {0}")]
    MalformedFilter(String),

    // Internal errors
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// LDAP result code for the wire, per RFC 4511.
    pub fn result_code(&self) -> u32 {
        match self {
            Error::MalformedIdentity(_)
            | Error::UserNotFound(_)
            | Error::GroupNotFound(_)
            | Error::CredentialMismatch => 49, // invalidCredentials

            Error::InsufficientAccess => 50, // insufficientAccessRights

            Error::SizeLimitExceeded(_) => 4, // sizeLimitExceeded

            Error::MalformedFilter(_)
            | Error::ConfigError(_)
            | Error::InternalError(_)
            | Error::Io(_)
            | Error::Other(_) => 1, // operationsError
        }
    }
}
