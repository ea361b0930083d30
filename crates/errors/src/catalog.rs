//! Catalog error types

use std::borrow::Cow;

use thiserror::Error;

use crate::UserFacingError;

#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {message}")]
    ParseFailed { message: String },

    #[error("catalog validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("catalog file not found: {path}")]
    FileNotFound { path: String },
}

impl UserFacingError for CatalogError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::FileNotFound { .. } => Some("Pass the catalog path with --catalog."),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::ParseFailed { .. } => "catalog.parse",
            Self::ValidationFailed { .. } => "catalog.validation",
            Self::FileNotFound { .. } => "catalog.file_not_found",
        })
    }
}
