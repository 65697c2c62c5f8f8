// Copyright (c) 2025 - Cowboy AI, Inc.
//! Connection Descriptors
//!
//! - [`Trigger`] - an event invokes a compute
//! - [`Reference`] - a compute is granted actions on a storage or event
//!
//! Connections carry their endpoints so that attaching a connection pulls
//! both resources into the application. The one exception is a connection
//! created by [`Compute::on`](super::Compute::on) or
//! [`Compute::uses`](super::Compute::uses): the compute end is recorded by
//! identity only, since the compute itself owns the connection.
//!
//! # Invariants
//! - Source and target are never both storage (checked on every `from`/`to`)
//! - A trigger source must be an event (checked when attached to an application)

use super::{Action, Resource, ResourceId, ResourceKind, SystemId};
use crate::errors::{GraphError, GraphResult};

/// One end of a connection
#[derive(Debug, Clone)]
pub struct Endpoint {
    system_id: SystemId,
    user_id: ResourceId,
    kind: ResourceKind,
    resource: Option<Box<Resource>>,
}

impl Endpoint {
    pub(crate) fn resource(resource: Resource) -> Self {
        Self {
            system_id: resource.system_id(),
            user_id: resource.id().clone(),
            kind: resource.kind(),
            resource: Some(Box::new(resource)),
        }
    }

    /// Back-reference to the descriptor that owns the connection
    pub(crate) fn owner(system_id: SystemId, user_id: ResourceId, kind: ResourceKind) -> Self {
        Self {
            system_id,
            user_id,
            kind,
            resource: None,
        }
    }

    pub fn system_id(&self) -> SystemId {
        self.system_id
    }

    pub fn user_id(&self) -> &ResourceId {
        &self.user_id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The carried descriptor, absent for owner back-references
    pub fn descriptor(&self) -> Option<&Resource> {
        self.resource.as_deref()
    }
}

fn validate(source: Option<&Endpoint>, target: Option<&Endpoint>) -> GraphResult<()> {
    if let (Some(source), Some(target)) = (source, target) {
        if source.kind.is_storage() && target.kind.is_storage() {
            return Err(GraphError::InvalidConnection {
                source_id: source.user_id.to_string(),
                target_id: target.user_id.to_string(),
            });
        }
    }
    Ok(())
}

/// "This event invokes this compute"
///
/// Triggers have no user id: one event may trigger several computes and one
/// compute may be triggered by several events.
#[derive(Debug, Clone)]
pub struct Trigger {
    system_id: SystemId,
    source: Option<Endpoint>,
    target: Option<Endpoint>,
}

impl Trigger {
    pub fn new() -> Self {
        Self {
            system_id: SystemId::generate(),
            source: None,
            target: None,
        }
    }

    pub(crate) fn with_endpoints(source: Endpoint, target: Endpoint) -> Self {
        Self {
            system_id: SystemId::generate(),
            source: Some(source),
            target: Some(target),
        }
    }

    pub fn from(mut self, resource: impl Into<Resource>) -> GraphResult<Self> {
        self.source = Some(Endpoint::resource(resource.into()));
        validate(self.source.as_ref(), self.target.as_ref())?;
        Ok(self)
    }

    pub fn to(mut self, resource: impl Into<Resource>) -> GraphResult<Self> {
        self.target = Some(Endpoint::resource(resource.into()));
        validate(self.source.as_ref(), self.target.as_ref())?;
        Ok(self)
    }

    pub fn system_id(&self) -> SystemId {
        self.system_id
    }

    pub fn source(&self) -> Option<&Endpoint> {
        self.source.as_ref()
    }

    pub fn target(&self) -> Option<&Endpoint> {
        self.target.as_ref()
    }
}

impl Default for Trigger {
    fn default() -> Self {
        Self::new()
    }
}

/// "This compute is granted these actions on this target"
///
/// The reference id doubles as the alias drivers expose to the compute, so
/// two references with the same alias collide like any other user id.
#[derive(Debug, Clone)]
pub struct Reference {
    system_id: SystemId,
    id: ResourceId,
    allows: Vec<Action>,
    source: Option<Endpoint>,
    target: Option<Endpoint>,
}

impl Reference {
    pub fn new(id: impl Into<String>) -> GraphResult<Self> {
        Ok(Self {
            system_id: SystemId::generate(),
            id: ResourceId::new(id)?,
            allows: Vec::new(),
            source: None,
            target: None,
        })
    }

    pub(crate) fn with_source(id: ResourceId, source: Endpoint) -> Self {
        Self {
            system_id: SystemId::generate(),
            id,
            allows: Vec::new(),
            source: Some(source),
            target: None,
        }
    }

    pub fn from(mut self, resource: impl Into<Resource>) -> GraphResult<Self> {
        self.source = Some(Endpoint::resource(resource.into()));
        validate(self.source.as_ref(), self.target.as_ref())?;
        Ok(self)
    }

    pub fn to(mut self, resource: impl Into<Resource>) -> GraphResult<Self> {
        self.target = Some(Endpoint::resource(resource.into()));
        validate(self.source.as_ref(), self.target.as_ref())?;
        Ok(self)
    }

    pub fn allow(mut self, action: Action) -> Self {
        self.allows.push(action);
        self
    }

    pub fn allow_all(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.allows.extend(actions);
        self
    }

    pub fn system_id(&self) -> SystemId {
        self.system_id
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn allows(&self) -> &[Action] {
        &self.allows
    }

    pub fn source(&self) -> Option<&Endpoint> {
        self.source.as_ref()
    }

    pub fn target(&self) -> Option<&Endpoint> {
        self.target.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Compute, HttpEvent, Storage, StorageCategory, TopicEvent};

    fn storage(id: &str) -> Storage {
        Storage::new(id, StorageCategory::KeyValue).unwrap()
    }

    #[test]
    fn test_storage_to_storage_is_rejected() {
        let result = Reference::new("Link")
            .unwrap()
            .from(storage("StorageA"))
            .unwrap()
            .to(storage("StorageB"));

        assert_eq!(
            result.unwrap_err(),
            GraphError::InvalidConnection {
                source_id: "StorageA".to_string(),
                target_id: "StorageB".to_string(),
            }
        );
    }

    #[test]
    fn test_storage_check_runs_on_from_too() {
        let result = Trigger::new()
            .to(storage("StorageA"))
            .unwrap()
            .from(storage("StorageB"));

        assert!(matches!(result, Err(GraphError::InvalidConnection { .. })));
    }

    #[test]
    fn test_compute_to_storage_reference() {
        let reference = Reference::new("OrdersRef")
            .unwrap()
            .from(Compute::new("Worker").unwrap())
            .unwrap()
            .to(storage("Orders"))
            .unwrap()
            .allow(Action::Read)
            .allow_all([Action::Create, Action::Update]);

        assert_eq!(reference.id().as_str(), "OrdersRef");
        assert_eq!(
            reference.allows(),
            &[Action::Read, Action::Create, Action::Update]
        );
        assert_eq!(reference.source().unwrap().kind(), ResourceKind::Compute);
        assert_eq!(reference.target().unwrap().kind(), ResourceKind::Storage);
        assert!(reference.target().unwrap().descriptor().is_some());
    }

    #[test]
    fn test_reference_to_event() {
        let reference = Reference::new("Publish")
            .unwrap()
            .from(Compute::new("Worker").unwrap())
            .unwrap()
            .to(TopicEvent::new("Orders").unwrap());

        assert!(reference.is_ok());
    }

    #[test]
    fn test_trigger_endpoints_are_not_checked_for_events_here() {
        let trigger = Trigger::new()
            .from(Compute::new("Source").unwrap())
            .unwrap()
            .to(Compute::new("Target").unwrap());

        assert!(trigger.is_ok());
    }

    #[test]
    fn test_trigger_carries_endpoint_identity() {
        let event = HttpEvent::new("Hook").unwrap();
        let event_id = event.system_id();
        let trigger = Trigger::new().from(event).unwrap();

        assert_eq!(trigger.source().unwrap().system_id(), event_id);
        assert_eq!(trigger.source().unwrap().user_id().as_str(), "Hook");
        assert!(trigger.target().is_none());
    }

    #[test]
    fn test_invalid_reference_id() {
        assert_eq!(
            Reference::new("bad-ref").unwrap_err(),
            GraphError::InvalidIdentifier {
                value: "bad-ref".to_string()
            }
        );
    }
}
