//! Identity as seen by the record core.
//!
//! The identity provider itself is external; the core only reacts to the
//! current value changing.

use std::fmt;

/// Opaque user identifier, e.g. an auth subject id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The current user, or nobody.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    SignedIn(UserId),
}

impl Identity {
    pub fn signed_in(id: impl Into<String>) -> Self {
        Identity::SignedIn(UserId::new(id))
    }

    pub fn user(&self) -> Option<&UserId> {
        match self {
            Identity::Anonymous => None,
            Identity::SignedIn(user) => Some(user),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Anonymous => f.write_str("anonymous"),
            Identity::SignedIn(user) => write!(f, "user:{user}"),
        }
    }
}
