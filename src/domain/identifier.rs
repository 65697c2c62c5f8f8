// Copyright (c) 2025 - Cowboy AI, Inc.
//! Identifier Value Objects
//!
//! Every descriptor carries two identities:
//!
//! - [`ResourceId`] - the caller-chosen user id, reused by drivers as a
//!   provider-facing name, so it is restricted to `^[0-9a-zA-Z]+$`
//! - [`SystemId`] - generated on construction and used for deduplication

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Identifier validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Missing {0}")]
    Empty(&'static str),

    #[error("Invalid character {character:?} in {value:?}")]
    InvalidCharacter { value: String, character: char },
}

/// Caller-chosen resource id
///
/// # Invariants
/// - Non-empty
/// - ASCII letters and digits only (no hyphens, underscores or whitespace)
///
/// # Examples
///
/// ```rust
/// use cim_resource_graph::domain::ResourceId;
///
/// assert!(ResourceId::new("MyCompute").is_ok());
/// assert!(ResourceId::new("my-compute").is_err());
/// assert!(ResourceId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a resource id with validation
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        Self::parse(value, "id")
    }

    /// Validate `value`, naming `argument` when it is missing
    pub(crate) fn parse(
        value: impl Into<String>,
        argument: &'static str,
    ) -> Result<Self, IdentifierError> {
        let value = value.into();

        if value.is_empty() {
            return Err(IdentifierError::Empty(argument));
        }

        if let Some(character) = value.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(IdentifierError::InvalidCharacter { value, character });
        }

        Ok(Self(value))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Default reference alias for this id (`<id>Ref`)
    pub fn reference_alias(&self) -> Self {
        Self(format!("{}Ref", self.0))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResourceId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ResourceId {
    type Error = IdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

/// Generated identity used for deduplication inside an application
///
/// Clones of a descriptor share its system id and therefore count as the
/// same resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemId(Uuid);

impl SystemId {
    /// Generate a fresh, time-ordered system id
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
