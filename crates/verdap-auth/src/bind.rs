//! Simple bind validation
//!
//! Every rejection collapses to the same verdict. The reason is logged server
//! side but never leaves the process, so a caller cannot distinguish an
//! unknown user from a wrong password or a malformed identity.

use tracing::warn;
use verdap_core::config::VerdapConfig;
use verdap_core::{Error, Result};
use verdap_crypto::credential_matches;
use verdap_directory::dn::{parse_dn, strip_base, Rdn};
use verdap_directory::MembershipResolver;

/// Outcome of a bind attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindVerdict {
    /// The credentials checked out; carries the DN the session is bound as.
    Accepted { bound_dn: String },
    Rejected,
}

impl BindVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, BindVerdict::Accepted { .. })
    }
}

pub struct Authenticator<'a> {
    config: &'a VerdapConfig,
}

impl<'a> Authenticator<'a> {
    pub fn new(config: &'a VerdapConfig) -> Self {
        Self { config }
    }

    /// Validate a simple bind.
    ///
    /// The identity must be `cn=<user>,<base>` or `cn=<user>,ou=<group>,<base>`.
    /// When a group is named it must be the user's primary group. Names are
    /// matched exactly; only the attribute names and the base suffix ignore
    /// case. The specific failure is logged here and collapsed to a uniform
    /// verdict before it leaves the process.
    pub fn bind(&self, bind_dn: &str, password: &str) -> BindVerdict {
        match self.try_bind(bind_dn, password) {
            Ok(bound_dn) => BindVerdict::Accepted { bound_dn },
            Err(err) => {
                warn!(bind_dn, %err, "bind rejected");
                BindVerdict::Rejected
            }
        }
    }

    fn try_bind(&self, bind_dn: &str, password: &str) -> Result<String> {
        let base_dn = &self.config.directory.base_dn;

        let local = strip_base(bind_dn, base_dn)
            .ok_or_else(|| Error::MalformedIdentity(bind_dn.to_string()))?;

        let rdns = parse_dn(local);
        let (user_rdn, group_rdn) = match rdns.as_slice() {
            [user] => (user, None),
            [user, group] => (user, Some(group)),
            _ => return Err(Error::MalformedIdentity(bind_dn.to_string())),
        };
        if !user_rdn.attribute.eq_ignore_ascii_case("cn") {
            return Err(Error::MalformedIdentity(bind_dn.to_string()));
        }
        if let Some(Rdn { attribute, .. }) = group_rdn {
            if !attribute.eq_ignore_ascii_case("ou") {
                return Err(Error::MalformedIdentity(bind_dn.to_string()));
            }
        }

        let resolver = MembershipResolver::new(self.config);
        let user = resolver
            .user_by_name(&user_rdn.value)
            .ok_or_else(|| Error::UserNotFound(user_rdn.value.clone()))?;
        let primary = resolver
            .group_by_gid(user.primary_group)
            .ok_or_else(|| Error::GroupNotFound(user.primary_group.to_string()))?;
        if let Some(group_rdn) = group_rdn {
            if group_rdn.value != primary.name {
                return Err(Error::GroupNotFound(group_rdn.value.clone()));
            }
        }

        if !credential_matches(password, &user.password_sha256) {
            return Err(Error::CredentialMismatch);
        }

        Ok(resolver.user_dn(user))
    }
}
