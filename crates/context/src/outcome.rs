use serde::{Deserialize, Serialize};

use crate::UserIdentity;

/// Classification of a token validation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationStatus {
    /// Introspection succeeded. The identity may still be absent when the
    /// response body had no recognizable principal shape.
    Success,
    /// The introspection endpoint answered with a non-success HTTP status.
    PermissionFailedDetailFetch,
    /// The introspection endpoint could not be reached (connection error or
    /// timeout). Conflated with an actually invalid token; callers must not
    /// use this status to detect network outages.
    TokenExpiredOrInvalid,
    /// The response body could not be decoded.
    InternalError,
}

/// The result of validating a token: an optional identity paired with a
/// status and an optional diagnostic message.
///
/// Constructors keep the pairing consistent: a failure never carries an
/// identity and always carries a message. Diagnostic messages are meant for
/// logs, not for end users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    status: ValidationStatus,
    identity: Option<UserIdentity>,
    message: Option<String>,
}

impl ValidationOutcome {
    pub fn success(identity: Option<UserIdentity>) -> Self {
        Self {
            status: ValidationStatus::Success,
            identity,
            message: None,
        }
    }

    pub fn failure(status: ValidationStatus, message: impl Into<String>) -> Self {
        debug_assert!(status != ValidationStatus::Success);

        Self {
            status,
            identity: None,
            message: Some(message.into()),
        }
    }

    pub fn status(&self) -> ValidationStatus {
        self.status
    }

    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    pub fn into_identity(self) -> Option<UserIdentity> {
        self.identity
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn has_identity(&self) -> bool {
        self.identity.is_some()
    }
}
