//! Package identity error types

use std::borrow::Cow;

use thiserror::Error;

use crate::UserFacingError;

#[derive(Debug, Clone, Error)]
pub enum PackageError {
    #[error("unknown package manager: {id}")]
    UnknownManager { id: String },

    #[error("invalid verification status: {value}")]
    InvalidStatus { value: String },
}

impl UserFacingError for PackageError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownManager { .. } => {
                Some("Run `pkgprobe verify --help` for the list of known managers.")
            }
            Self::InvalidStatus { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::UnknownManager { .. } => "package.unknown_manager",
            Self::InvalidStatus { .. } => "package.invalid_status",
        })
    }
}
