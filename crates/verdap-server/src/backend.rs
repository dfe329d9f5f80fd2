//! In-process directory backend
//!
//! Fronts the bind and search engines behind one handle. Filters arrive as
//! strings here and are parsed on every call; a malformed filter surfaces as
//! an error rather than an empty result.

use std::sync::Arc;

use tracing::debug;
use verdap_auth::{Authenticator, BindVerdict};
use verdap_core::{config::VerdapConfig, Entry, Result};
use verdap_directory::{Filter, Scope, SearchEngine, SearchRequest};

#[derive(Debug)]
pub struct DirectoryBackend {
    config: Arc<VerdapConfig>,
}

impl DirectoryBackend {
    pub fn new(config: Arc<VerdapConfig>) -> Self {
        Self { config }
    }

    pub fn base_dn(&self) -> &str {
        &self.config.directory.base_dn
    }

    pub fn bind(&self, bind_dn: &str, password: &str) -> BindVerdict {
        Authenticator::new(&self.config).bind(bind_dn, password)
    }

    /// Nothing to tear down server side; kept for protocol symmetry.
    pub fn close(&self, identity: &str) {
        debug!(identity, "session closed");
    }

    /// Subtree search from the directory base on behalf of `identity`.
    pub fn search(
        &self,
        identity: &str,
        filter: &str,
        attributes: &[String],
        size_limit: usize,
    ) -> Result<Vec<Entry>> {
        let request = SearchRequest {
            base_dn: self.config.directory.base_dn.clone(),
            scope: Scope::Subtree,
            filter: Filter::parse(filter)?,
            attributes: attributes.to_vec(),
            size_limit,
        };
        SearchEngine::new(&self.config).search(identity, &request)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use verdap_core::config::{Group, InventoryItem, User};
    use verdap_core::Error;
    use verdap_crypto::sha256_hex;

    pub(crate) fn test_config() -> VerdapConfig {
        let mut config = VerdapConfig::default();
        config.groups = vec![Group {
            name: "staff".into(),
            gid: 100,
        }];
        config.users = vec![User {
            name: "alice".into(),
            primary_group: 100,
            other_groups: vec![],
            password_sha256: sha256_hex(b"hunter2"),
            uid_number: 5000,
            description: String::new(),
            gecos: "Alice".into(),
            ssh_keys: vec![],
        }];
        config.fruits = vec![InventoryItem {
            name: "apple".into(),
            description: "A red one".into(),
            stock: 10,
        }];
        config
    }

    #[test]
    fn bind_then_search() {
        let backend = DirectoryBackend::new(Arc::new(test_config()));
        let verdict = backend.bind("cn=alice,ou=staff,dc=hack,dc=me", "hunter2");
        let BindVerdict::Accepted { bound_dn } = verdict else {
            panic!("bind rejected");
        };

        let entries = backend.search(&bound_dn, "(cn=apple)", &[], 0).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].first_value("stock"), Some("10"));
    }

    #[test]
    fn malformed_filter_is_an_error() {
        let backend = DirectoryBackend::new(Arc::new(test_config()));
        let err = backend
            .search("cn=alice,ou=staff,dc=hack,dc=me", "(cn=apple", &[], 0)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedFilter(_)));
    }
}
