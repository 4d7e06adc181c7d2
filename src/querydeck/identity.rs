//! Who is signed in. Authentication itself belongs to an external identity
//! provider; the core only asks for the current user id.

use std::env;

pub const USER_ENV_VAR: &str = "QUERYDECK_USER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
}

pub trait IdentityProvider {
    /// `None` means nobody is signed in.
    fn current_user(&self) -> Option<User>;
}

/// Always reports the same user (or nobody).
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(Option<String>);

impl StaticIdentity {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self(Some(user_id.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<User> {
        self.0.clone().map(|user_id| User { user_id })
    }
}

/// Reads the user id from `QUERYDECK_USER`. Blank values count as signed out.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvIdentity;

impl IdentityProvider for EnvIdentity {
    fn current_user(&self) -> Option<User> {
        env::var(USER_ENV_VAR)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|user_id| User { user_id })
    }
}
