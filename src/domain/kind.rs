// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Kind Taxonomy
//!
//! The closed set of connectable resource kinds and the actions a reference
//! may grant on its target.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a connectable resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Compute unit (function, container, ...)
    Compute,
    /// Storage unit (key-value collection or relational database)
    Storage,
    /// Inbound HTTP endpoint
    HttpEvent,
    /// Message broker topic
    TopicEvent,
}

impl ResourceKind {
    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::Storage => "storage",
            Self::HttpEvent => "http_event",
            Self::TopicEvent => "topic_event",
        }
    }

    /// Events may act as trigger sources; logistical resources may not
    pub fn is_event(&self) -> bool {
        matches!(self, Self::HttpEvent | Self::TopicEvent)
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action a reference allows its source to perform on its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    /// Every action, including ones a driver defines beyond CRUD
    All,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::All => "*",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kinds() {
        assert!(ResourceKind::HttpEvent.is_event());
        assert!(ResourceKind::TopicEvent.is_event());
        assert!(!ResourceKind::Compute.is_event());
        assert!(!ResourceKind::Storage.is_event());
    }

    #[test]
    fn test_serialization_names() {
        assert_eq!(
            serde_json::to_string(&ResourceKind::HttpEvent).unwrap(),
            "\"http_event\""
        );
        assert_eq!(serde_json::to_string(&Action::All).unwrap(), "\"all\"");
        assert_eq!(Action::All.to_string(), "*");
    }
}
