// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Graph Domain Models
//!
//! Descriptors for the resources and connections an application is built
//! from. Identity is fixed at construction; configuration is filled in
//! through consuming setters before the descriptor is attached.
//!
//! # Resources
//!
//! - [`Compute`] - compute unit, owner of triggers and references
//! - [`Storage`] - key-value or relational storage
//! - [`HttpEvent`] / [`TopicEvent`] - events that can trigger compute
//!
//! # Connections
//!
//! - [`Trigger`] - event → compute
//! - [`Reference`] - compute → storage or event, with an allow-list of [`Action`]s
//!
//! # Value Objects
//!
//! - [`ResourceId`] - alphanumeric user id
//! - [`SystemId`] - generated deduplication id

pub mod compute;
pub mod connection;
pub mod event;
pub mod identifier;
pub mod kind;
pub mod storage;

pub use compute::{Compute, ComputeConfig};
pub use connection::{Endpoint, Reference, Trigger};
pub use event::{Event, EventConfig, HttpConfig, HttpEvent, TopicConfig, TopicEvent};
pub use identifier::{IdentifierError, ResourceId, SystemId};
pub use kind::{Action, ResourceKind};
pub use storage::{Column, KeySpec, Storage, StorageCategory, StorageConfig, Table};

use serde::{Deserialize, Serialize};

/// A connectable resource: anything that can sit at either end of a connection
#[derive(Debug, Clone)]
pub enum Resource {
    Compute(Compute),
    Storage(Storage),
    Http(HttpEvent),
    Topic(TopicEvent),
}

impl Resource {
    pub fn id(&self) -> &ResourceId {
        match self {
            Resource::Compute(r) => r.id(),
            Resource::Storage(r) => r.id(),
            Resource::Http(r) => r.id(),
            Resource::Topic(r) => r.id(),
        }
    }

    pub fn system_id(&self) -> SystemId {
        match self {
            Resource::Compute(r) => r.system_id(),
            Resource::Storage(r) => r.system_id(),
            Resource::Http(r) => r.system_id(),
            Resource::Topic(r) => r.system_id(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Compute(_) => ResourceKind::Compute,
            Resource::Storage(_) => ResourceKind::Storage,
            Resource::Http(_) => ResourceKind::HttpEvent,
            Resource::Topic(_) => ResourceKind::TopicEvent,
        }
    }

    pub fn is_event(&self) -> bool {
        self.kind().is_event()
    }

    /// Snapshot of the configuration payload
    pub fn config(&self) -> ResourceConfig {
        match self {
            Resource::Compute(r) => ResourceConfig::Compute(r.config().clone()),
            Resource::Storage(r) => ResourceConfig::Storage(r.config().clone()),
            Resource::Http(r) => ResourceConfig::Http(r.config().clone()),
            Resource::Topic(r) => ResourceConfig::Topic(r.config().clone()),
        }
    }
}

impl From<Compute> for Resource {
    fn from(r: Compute) -> Self {
        Resource::Compute(r)
    }
}

impl From<Storage> for Resource {
    fn from(r: Storage) -> Self {
        Resource::Storage(r)
    }
}

impl From<HttpEvent> for Resource {
    fn from(r: HttpEvent) -> Self {
        Resource::Http(r)
    }
}

impl From<TopicEvent> for Resource {
    fn from(r: TopicEvent) -> Self {
        Resource::Topic(r)
    }
}

impl From<Event> for Resource {
    fn from(event: Event) -> Self {
        match event {
            Event::Http(e) => Resource::Http(e),
            Event::Topic(e) => Resource::Topic(e),
        }
    }
}

/// Everything `Application::with` accepts
///
/// The set is closed, so classification is an exhaustive match.
#[derive(Debug, Clone)]
pub enum Descriptor {
    Compute(Compute),
    Storage(Storage),
    Http(HttpEvent),
    Topic(TopicEvent),
    Trigger(Trigger),
    Reference(Reference),
}

impl Descriptor {
    pub fn system_id(&self) -> SystemId {
        match self {
            Descriptor::Compute(d) => d.system_id(),
            Descriptor::Storage(d) => d.system_id(),
            Descriptor::Http(d) => d.system_id(),
            Descriptor::Topic(d) => d.system_id(),
            Descriptor::Trigger(d) => d.system_id(),
            Descriptor::Reference(d) => d.system_id(),
        }
    }

    /// User id, absent for triggers
    pub fn user_id(&self) -> Option<&ResourceId> {
        match self {
            Descriptor::Compute(d) => Some(d.id()),
            Descriptor::Storage(d) => Some(d.id()),
            Descriptor::Http(d) => Some(d.id()),
            Descriptor::Topic(d) => Some(d.id()),
            Descriptor::Trigger(_) => None,
            Descriptor::Reference(d) => Some(d.id()),
        }
    }

    /// Short label for logging
    pub fn label(&self) -> &'static str {
        match self {
            Descriptor::Compute(_) => "compute",
            Descriptor::Storage(_) => "storage",
            Descriptor::Http(_) => "http_event",
            Descriptor::Topic(_) => "topic_event",
            Descriptor::Trigger(_) => "trigger",
            Descriptor::Reference(_) => "reference",
        }
    }
}

impl From<Resource> for Descriptor {
    fn from(resource: Resource) -> Self {
        match resource {
            Resource::Compute(r) => Descriptor::Compute(r),
            Resource::Storage(r) => Descriptor::Storage(r),
            Resource::Http(r) => Descriptor::Http(r),
            Resource::Topic(r) => Descriptor::Topic(r),
        }
    }
}

impl From<Compute> for Descriptor {
    fn from(d: Compute) -> Self {
        Descriptor::Compute(d)
    }
}

impl From<Storage> for Descriptor {
    fn from(d: Storage) -> Self {
        Descriptor::Storage(d)
    }
}

impl From<HttpEvent> for Descriptor {
    fn from(d: HttpEvent) -> Self {
        Descriptor::Http(d)
    }
}

impl From<TopicEvent> for Descriptor {
    fn from(d: TopicEvent) -> Self {
        Descriptor::Topic(d)
    }
}

impl From<Event> for Descriptor {
    fn from(event: Event) -> Self {
        Resource::from(event).into()
    }
}

impl From<Trigger> for Descriptor {
    fn from(d: Trigger) -> Self {
        Descriptor::Trigger(d)
    }
}

impl From<Reference> for Descriptor {
    fn from(d: Reference) -> Self {
        Descriptor::Reference(d)
    }
}

/// Configuration payload of any resource, as handed to drivers inside
/// connection payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceConfig {
    Compute(ComputeConfig),
    Storage(StorageConfig),
    Http(HttpConfig),
    Topic(TopicConfig),
}

impl ResourceConfig {
    pub fn id(&self) -> &ResourceId {
        match self {
            ResourceConfig::Compute(c) => &c.id,
            ResourceConfig::Storage(c) => &c.id,
            ResourceConfig::Http(c) => &c.id,
            ResourceConfig::Topic(c) => &c.id,
        }
    }
}
