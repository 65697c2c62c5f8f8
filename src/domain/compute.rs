// Copyright (c) 2025 - Cowboy AI, Inc.
//! Compute Descriptor
//!
//! A compute unit is the only descriptor that owns connections. Declaring
//! [`Compute::on`] or [`Compute::uses`] records a trigger or reference on the
//! compute; the application discovers them when the compute is attached.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Action, Endpoint, Event, Reference, Resource, ResourceId, ResourceKind, SystemId, Trigger};
use crate::errors::GraphResult;

/// Driver payload for a compute unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeConfig {
    pub id: ResourceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    /// Source repository holding the code to run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs: Option<String>,
    /// Inline code; takes precedence over `vcs`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// Compute descriptor
///
/// # Examples
///
/// ```rust
/// use cim_resource_graph::domain::{Action, Compute, HttpEvent, Storage, StorageCategory};
///
/// let compute = Compute::new("MyCompute")?
///     .runtime("nodejs")
///     .env("NAME", "value")
///     .on(HttpEvent::new("MyHttpEvent")?.method("GET").path("/event"))
///     .uses(Storage::new("MyStorage", StorageCategory::KeyValue)?, [Action::Read], None)?;
///
/// assert_eq!(compute.triggers().len(), 1);
/// assert_eq!(compute.references()[0].id().as_str(), "MyStorageRef");
/// # Ok::<(), cim_resource_graph::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Compute {
    system_id: SystemId,
    config: ComputeConfig,
    triggers: Vec<Trigger>,
    references: Vec<Reference>,
}

impl Compute {
    pub fn new(id: impl Into<String>) -> GraphResult<Self> {
        Ok(Self {
            system_id: SystemId::generate(),
            config: ComputeConfig {
                id: ResourceId::new(id)?,
                runtime: None,
                vcs: None,
                code: None,
                description: None,
                environment: BTreeMap::new(),
                tags: BTreeMap::new(),
            },
            triggers: Vec::new(),
            references: Vec::new(),
        })
    }

    /// Driver-specific runtime name
    pub fn runtime(mut self, name: impl Into<String>) -> Self {
        self.config.runtime = Some(name.into());
        self
    }

    pub fn vcs(mut self, url: impl Into<String>) -> Self {
        self.config.vcs = Some(url.into());
        self
    }

    pub fn code(mut self, content: impl Into<String>) -> Self {
        self.config.code = Some(content.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.config.description = Some(text.into());
        self
    }

    /// Add an environment variable for the execution environment
    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.environment.insert(name.into(), value.into());
        self
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.tags.insert(key.into(), value.into());
        self
    }

    /// Run this compute whenever `event` fires
    pub fn on(mut self, event: impl Into<Event>) -> Self {
        let source = Endpoint::resource(Resource::from(event.into()));
        let trigger = Trigger::with_endpoints(source, self.owner_endpoint());
        self.triggers.push(trigger);
        self
    }

    /// Grant this compute `actions` on `resource`
    ///
    /// The reference is named `alias`, or `<resource id>Ref` when no alias
    /// is given.
    pub fn uses(
        mut self,
        resource: impl Into<Resource>,
        actions: impl IntoIterator<Item = Action>,
        alias: Option<&str>,
    ) -> GraphResult<Self> {
        let resource = resource.into();
        let alias = match alias {
            Some(alias) => ResourceId::parse(alias, "alias")?,
            None => resource.id().reference_alias(),
        };

        let reference = Reference::with_source(alias, self.owner_endpoint())
            .to(resource)?
            .allow_all(actions);
        self.references.push(reference);
        Ok(self)
    }

    fn owner_endpoint(&self) -> Endpoint {
        Endpoint::owner(self.system_id, self.config.id.clone(), ResourceKind::Compute)
    }

    pub fn id(&self) -> &ResourceId {
        &self.config.id
    }

    pub fn system_id(&self) -> SystemId {
        self.system_id
    }

    pub fn config(&self) -> &ComputeConfig {
        &self.config
    }

    /// Triggers declared with [`Compute::on`], in declaration order
    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    /// References declared with [`Compute::uses`], in declaration order
    pub fn references(&self) -> &[Reference] {
        &self.references
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HttpEvent, Storage, StorageCategory};
    use crate::errors::GraphError;

    #[test]
    fn test_setters_fill_config() {
        let compute = Compute::new("MyCompute")
            .unwrap()
            .runtime("python3")
            .vcs("https://example.com/repo.git")
            .code("print('hi')")
            .description("says hi")
            .env("NAME", "value")
            .tag("team", "infra");

        let config = compute.config();
        assert_eq!(config.runtime.as_deref(), Some("python3"));
        assert_eq!(config.vcs.as_deref(), Some("https://example.com/repo.git"));
        assert_eq!(config.code.as_deref(), Some("print('hi')"));
        assert_eq!(config.description.as_deref(), Some("says hi"));
        assert_eq!(config.environment.get("NAME").map(String::as_str), Some("value"));
        assert_eq!(config.tags.get("team").map(String::as_str), Some("infra"));
    }

    #[test]
    fn test_on_targets_the_owning_compute() {
        let compute = Compute::new("MyCompute")
            .unwrap()
            .on(HttpEvent::new("MyHttpEvent").unwrap());

        let trigger = &compute.triggers()[0];
        let target = trigger.target().unwrap();
        assert_eq!(target.system_id(), compute.system_id());
        assert!(target.descriptor().is_none());
        assert_eq!(trigger.source().unwrap().kind(), ResourceKind::HttpEvent);
    }

    #[test]
    fn test_uses_default_and_custom_alias() {
        let compute = Compute::new("MyCompute")
            .unwrap()
            .uses(
                Storage::new("MyStorage", StorageCategory::KeyValue).unwrap(),
                [Action::Read, Action::Update],
                None,
            )
            .unwrap()
            .uses(
                Storage::new("Archive", StorageCategory::Relational).unwrap(),
                [Action::All],
                Some("Cold"),
            )
            .unwrap();

        let references = compute.references();
        assert_eq!(references[0].id().as_str(), "MyStorageRef");
        assert_eq!(references[0].allows(), &[Action::Read, Action::Update]);
        assert_eq!(references[1].id().as_str(), "Cold");
        assert_eq!(references[1].source().unwrap().system_id(), compute.system_id());
    }

    #[test]
    fn test_uses_rejects_invalid_alias() {
        let result = Compute::new("MyCompute").unwrap().uses(
            Storage::new("MyStorage", StorageCategory::KeyValue).unwrap(),
            Vec::<Action>::new(),
            Some("my alias"),
        );
        assert!(matches!(result, Err(GraphError::InvalidIdentifier { .. })));

        let result = Compute::new("MyCompute").unwrap().uses(
            Storage::new("MyStorage", StorageCategory::KeyValue).unwrap(),
            Vec::<Action>::new(),
            Some(""),
        );
        assert_eq!(result.unwrap_err(), GraphError::MissingArgument("alias"));
    }

    #[test]
    fn test_invalid_compute_id() {
        assert_eq!(Compute::new("").unwrap_err(), GraphError::MissingArgument("id"));
        assert!(Compute::new("My Compute").is_err());
    }
}
