//! Operations orchestration error types

use std::borrow::Cow;

use thiserror::Error;

use crate::UserFacingError;

#[derive(Debug, Clone, Error)]
pub enum OpsError {
    #[error("missing component: {component}")]
    MissingComponent { component: String },

    #[error("serialization error: {message}")]
    SerializationError { message: String },

    #[error("application {app_id} has no {manager} package target")]
    NoPackageTarget { app_id: String, manager: String },

    #[error("unknown application: {app_id}")]
    UnknownApp { app_id: String },
}

impl UserFacingError for OpsError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::MissingComponent { .. } => "ops.missing_component",
            Self::SerializationError { .. } => "ops.serialization",
            Self::NoPackageTarget { .. } => "ops.no_package_target",
            Self::UnknownApp { .. } => "ops.unknown_app",
        })
    }
}
