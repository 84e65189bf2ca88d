//! Caller capability checked by request handlers before any core call.
//!
//! Session handling lives outside this workspace; handlers translate whatever
//! session they have into a [`Capability`] and gate on it. The core never reads it.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::types::UserId;

/// What the current caller is allowed to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Capability {
    /// A logged-in administrator.
    Authenticated {
        /// Administrator account.
        user_id: UserId,
        /// Display name shown in page headers.
        username: String,
    },
    /// No session.
    Anonymous,
}

impl Capability {
    /// Returns true if the caller holds an authenticated session.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Returns the administrator ID, or `Unauthorized` for anonymous callers.
    pub fn require_authenticated(&self) -> AppResult<UserId> {
        match self {
            Self::Authenticated { user_id, .. } => Ok(*user_id),
            Self::Anonymous => Err(AppError::Unauthorized(
                "login required to view attachee data".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_passes() {
        let user_id = UserId::new();
        let capability = Capability::Authenticated {
            user_id,
            username: "admin".to_string(),
        };
        assert!(capability.is_authenticated());
        assert_eq!(capability.require_authenticated().unwrap(), user_id);
    }

    #[test]
    fn test_anonymous_is_rejected() {
        let err = Capability::Anonymous.require_authenticated().unwrap_err();
        assert_eq!(err.status_code(), 401);
        assert!(!Capability::Anonymous.is_authenticated());
    }
}
