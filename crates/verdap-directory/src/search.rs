//! Search evaluation
//!
//! A search runs against a fresh materialization of the directory. Anonymous
//! sessions are refused outright. Exceeding the size limit is an error, not a
//! truncated result set.

use tracing::debug;
use verdap_core::{config::VerdapConfig, Entry, Error, Result};

use crate::dn::{depth_below, dn_has_suffix};
use crate::filter::Filter;
use crate::materialize::materialize;

/// How far below the search base candidates may sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The base entry itself.
    Base,
    /// Entries exactly one level below the base.
    OneLevel,
    /// The base entry and everything below it.
    Subtree,
}

impl Scope {
    fn admits(self, depth: usize) -> bool {
        match self {
            Scope::Base => depth == 0,
            Scope::OneLevel => depth == 1,
            Scope::Subtree => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub base_dn: String,
    pub scope: Scope,
    pub filter: Filter,
    /// Attributes to return; empty means all.
    pub attributes: Vec<String>,
    /// Maximum number of entries; 0 means unlimited.
    pub size_limit: usize,
}

pub struct SearchEngine<'a> {
    config: &'a VerdapConfig,
}

impl<'a> SearchEngine<'a> {
    pub fn new(config: &'a VerdapConfig) -> Self {
        Self { config }
    }

    /// Run a search on behalf of `identity`, the DN of the bound session.
    ///
    /// The identity must live under the configured base DN, the same suffix
    /// test bind applies; anything else is refused before any entry is built.
    pub fn search(&self, identity: &str, request: &SearchRequest) -> Result<Vec<Entry>> {
        if identity.is_empty() || !dn_has_suffix(identity, &self.config.directory.base_dn) {
            return Err(Error::InsufficientAccess);
        }

        debug!(
            identity,
            base = %request.base_dn,
            scope = ?request.scope,
            "evaluating search"
        );

        let mut matched = Vec::new();
        for entry in materialize(self.config) {
            let Some(depth) = depth_below(&entry.dn, &request.base_dn) else {
                continue;
            };
            if !request.scope.admits(depth) {
                continue;
            }
            if !request.filter.matches(&entry) {
                continue;
            }
            if request.size_limit != 0 && matched.len() == request.size_limit {
                return Err(Error::SizeLimitExceeded(request.size_limit));
            }
            matched.push(entry.project(&request.attributes));
        }

        Ok(matched)
    }
}
