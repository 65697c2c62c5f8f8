// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for graph assembly and deployment

use thiserror::Error;

use crate::deploy::Hook;
use crate::domain::{IdentifierError, SystemId};

/// Errors raised while building descriptors or assembling an application graph
///
/// All of these are synchronous: the failing call leaves the application
/// exactly as it was before that descriptor was offered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A required constructor argument was absent
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// An id or name failed the alphanumeric syntax rule
    #[error("Invalid identifier {value:?}: must only include alphanumeric characters")]
    InvalidIdentifier { value: String },

    /// Storage category not recognised
    #[error("Invalid storage category {0:?}: expected key-value or relational")]
    InvalidStorageCategory(String),

    /// Both ends of a connection are storage resources
    #[error("Invalid connection: cannot connect storage {source_id} to storage {target_id}")]
    InvalidConnection {
        source_id: String,
        target_id: String,
    },

    /// Trigger source is not an event
    #[error("Invalid trigger source {0}: the trigger source must be an event")]
    InvalidTriggerSource(String),

    /// Trigger target is not a compute
    #[error("Invalid trigger target {0}: the trigger target must be a compute")]
    InvalidTriggerTarget(String),

    /// Reference source is not a compute
    #[error("Invalid reference source {0}: the reference source must be a compute")]
    InvalidReferenceSource(String),

    /// System id already present in the application
    #[error("Duplicate system id {0}: this resource was already added")]
    DuplicateSystemId(SystemId),

    /// User id already present in the application
    #[error("Duplicate id {0:?}: make sure all resource ids are unique")]
    DuplicateUserId(String),

    /// Connection endpoint that is neither in the graph nor carried by the connection
    #[error("Unresolved endpoint {0}: the owning resource was never added")]
    UnresolvedEndpoint(String),
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

impl From<IdentifierError> for GraphError {
    fn from(err: IdentifierError) -> Self {
        match err {
            IdentifierError::Empty(argument) => GraphError::MissingArgument(argument),
            IdentifierError::InvalidCharacter { value, .. } => {
                GraphError::InvalidIdentifier { value }
            }
        }
    }
}

/// Errors raised by `Application::deploy`
#[derive(Debug, Error)]
pub enum DeployError {
    /// Driver instance lacks a required hook; nothing was deployed
    #[error("Invalid driver: missing `{0}` hook")]
    InvalidDriver(Hook),

    /// Graph could not be turned into a deployment plan; nothing was deployed
    #[error("Failed to plan deployment: {0}")]
    Plan(#[from] GraphError),

    /// Driver `finish` failed after every hook was replayed
    #[error("Driver failed to finish deployment: {message}")]
    DriverFinish { message: String },
}

/// Result type for deployment
pub type DeployResult<T> = Result<T, DeployError>;

impl DeployError {
    /// Whether hooks had already been replayed when the error occurred
    pub fn is_partial(&self) -> bool {
        matches!(self, DeployError::DriverFinish { .. })
    }
}
