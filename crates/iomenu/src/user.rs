//! Plain-value user for callers without a session layer of their own.

use std::collections::HashSet;

use crate::context::SecurityUser;

/// A user described by its authentication state, credentials and culture.
#[derive(Debug, Clone, Default)]
pub struct SessionUser {
    authenticated: bool,
    credentials: HashSet<String>,
    culture: Option<String>,
}

impl SessionUser {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated() -> Self {
        Self {
            authenticated: true,
            ..Self::default()
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credentials.insert(credential.into());
        self
    }

    pub fn with_culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = Some(culture.into());
        self
    }

    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.authenticated = authenticated;
    }
}

impl SecurityUser for SessionUser {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn has_credential(&self, credential: &str) -> bool {
        self.credentials.contains(credential)
    }

    fn culture(&self) -> Option<&str> {
        self.culture.as_deref()
    }
}
