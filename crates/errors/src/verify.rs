//! Verification-related error types

use std::borrow::Cow;

use thiserror::Error;

use crate::UserFacingError;

#[derive(Debug, Clone, Error)]
pub enum VerifyError {
    /// Structural validation failed before any network call was made.
    #[error("malformed identifier {identifier:?}: {reason}")]
    MalformedIdentifier { identifier: String, reason: String },
}

impl UserFacingError for VerifyError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::MalformedIdentifier { .. } => "verify.malformed_identifier",
        })
    }
}
