//! Directory client handle
//!
//! The front end's own session with the directory. The handle is constructed
//! once at startup from the configured client credentials and injected into
//! the handlers; there is no process-wide connection.

use std::sync::Arc;

use tracing::info;
use verdap_auth::{BindVerdict, SessionState};
use verdap_core::{Entry, Error, Result};

use crate::backend::DirectoryBackend;

#[derive(Debug)]
pub struct DirectoryClient {
    backend: Arc<DirectoryBackend>,
    session: SessionState,
}

impl DirectoryClient {
    /// Bind to the directory; an unaccepted bind fails the connection.
    pub fn connect(
        backend: Arc<DirectoryBackend>,
        bind_dn: &str,
        password: &str,
    ) -> Result<Self> {
        match backend.bind(bind_dn, password) {
            BindVerdict::Accepted { bound_dn } => {
                info!(%bound_dn, "directory client bound");
                let mut session = SessionState::default();
                session.record(bound_dn);
                Ok(Self { backend, session })
            }
            BindVerdict::Rejected => Err(Error::CredentialMismatch),
        }
    }

    pub fn bound_dn(&self) -> &str {
        self.session.bound_dn()
    }

    pub fn search(
        &self,
        filter: &str,
        attributes: &[String],
        size_limit: usize,
    ) -> Result<Vec<Entry>> {
        self.backend
            .search(self.session.bound_dn(), filter, attributes, size_limit)
    }

    /// Drop the session back to anonymous.
    pub fn close(&mut self) {
        self.backend.close(self.session.bound_dn());
        self.session.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::tests::test_config;

    #[test]
    fn connect_rejects_bad_credentials() {
        let backend = Arc::new(DirectoryBackend::new(Arc::new(test_config())));
        let err = DirectoryClient::connect(backend, "cn=alice,ou=staff,dc=hack,dc=me", "wrong")
            .unwrap_err();
        assert!(matches!(err, Error::CredentialMismatch));
    }

    #[test]
    fn searches_run_as_the_bound_identity() {
        let backend = Arc::new(DirectoryBackend::new(Arc::new(test_config())));
        let client =
            DirectoryClient::connect(backend, "cn=alice,ou=staff,dc=hack,dc=me", "hunter2")
                .unwrap();
        assert_eq!(client.bound_dn(), "cn=alice,ou=staff,dc=hack,dc=me");
        let entries = client.search("(objectClass=fruits)", &[], 0).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn closed_client_searches_anonymously_and_is_refused() {
        let backend = Arc::new(DirectoryBackend::new(Arc::new(test_config())));
        let mut client =
            DirectoryClient::connect(backend, "cn=alice,ou=staff,dc=hack,dc=me", "hunter2")
                .unwrap();
        client.close();
        let err = client.search("(objectClass=fruits)", &[], 0).unwrap_err();
        assert!(matches!(err, Error::InsufficientAccess));
    }
}
