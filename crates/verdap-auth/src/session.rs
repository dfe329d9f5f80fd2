//! Session state
//!
//! A session is anonymous until a bind is accepted and anonymous again after
//! close. The bound DN is what searches run as.

/// Authentication state of one directory session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated {
        bound_dn: String,
    },
}

impl SessionState {
    /// Transition to authenticated after an accepted bind.
    pub fn record(&mut self, bound_dn: String) {
        *self = SessionState::Authenticated { bound_dn };
    }

    /// Drop back to anonymous.
    pub fn close(&mut self) {
        *self = SessionState::Unauthenticated;
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    /// DN of the bound identity, empty while anonymous.
    pub fn bound_dn(&self) -> &str {
        match self {
            SessionState::Authenticated { bound_dn } => bound_dn,
            SessionState::Unauthenticated => "",
        }
    }
}
