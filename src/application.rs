// Copyright (c) 2025 - Cowboy AI, Inc.
//! Application - the resource graph builder
//!
//! An application accepts descriptors in any order, sorts them into typed
//! buckets, and pulls in every resource a connection names even when the
//! caller never attached it directly.
//!
//! # Classification
//!
//! ```text
//! with(descriptor)
//!     │
//!     ▼
//! ┌──────────┐   pop    ┌──────────────────────────────┐
//! │ worklist │ ───────> │ check ids + kind rules       │
//! │  (FIFO)  │ <─────── │ record ids, push to bucket   │
//! └──────────┘  unseen  │ compute  → owned connections │
//!                 ends  │ trigger/reference → endpoints│
//!                       └──────────────────────────────┘
//! ```
//!
//! Every check for a descriptor runs before any of its ids are recorded, so
//! a rejected descriptor leaves no trace. A connection is checked together
//! with the endpoints it carries: if one of them could not be added, the
//! connection is the descriptor that fails. Descriptors absorbed earlier in
//! the same call stay in the graph, along with the endpoints their
//! connections claimed.
//!
//! # Deployment
//!
//! `deploy` replays the graph to a driver in a fixed order: events, compute,
//! storage, references, triggers. See [`crate::deploy`].

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, info, warn};

use crate::config::Region;
use crate::deploy::{DeployStep, DeploymentPlan, Driver, ReferenceConfig, TriggerConfig};
use crate::domain::{
    Compute, Descriptor, Endpoint, Event, Reference, Resource, ResourceConfig, ResourceId,
    ResourceKind, Storage, SystemId, Trigger,
};
use crate::errors::{DeployError, DeployResult, GraphError, GraphResult};

/// Application identity handed to driver factories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub id: SystemId,
    pub name: ResourceId,
}

/// Work left over from a single `with` call
///
/// `claimed` maps the user ids of queued endpoints to their system ids.
#[derive(Default)]
struct Pending {
    queue: VecDeque<Descriptor>,
    claimed: HashMap<ResourceId, SystemId>,
}

impl Pending {
    fn claimed_by_other(&self, user_id: &ResourceId, system_id: SystemId) -> bool {
        self.claimed
            .get(user_id)
            .is_some_and(|owner| *owner != system_id)
    }

    fn is_claimed(&self, descriptor: &Descriptor) -> bool {
        descriptor
            .user_id()
            .and_then(|user_id| self.claimed.get(user_id))
            .is_some_and(|owner| *owner == descriptor.system_id())
    }
}

/// Position of a connectable resource in its bucket
#[derive(Debug, Clone, Copy)]
enum Slot {
    Event(usize),
    Compute(usize),
    Storage(usize),
}

/// Root aggregate of a resource graph
///
/// # Invariants
/// - No two descriptors share a system id
/// - No two descriptors other than triggers share a user id
/// - Every connection endpoint is itself in the graph
///
/// # Example
///
/// ```rust
/// use cim_resource_graph::{Action, Application, Compute, HttpEvent, Storage, StorageCategory};
///
/// let mut app = Application::new("MyApp")?;
/// app.with(
///     Compute::new("MyCompute")?
///         .on(HttpEvent::new("MyHttpEvent")?)
///         .uses(Storage::new("MyStorage", StorageCategory::KeyValue)?, [Action::Read], None)?,
/// )?;
///
/// assert_eq!(app.events().len(), 1);
/// assert_eq!(app.storage().len(), 1);
/// assert_eq!(app.len(), 5);
/// # Ok::<(), cim_resource_graph::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Application {
    config: ApplicationConfig,
    events: Vec<Event>,
    compute: Vec<Compute>,
    storage: Vec<Storage>,
    triggers: Vec<Trigger>,
    references: Vec<Reference>,
    system_ids: HashSet<SystemId>,
    user_ids: HashSet<ResourceId>,
    nodes: HashMap<SystemId, Slot>,
}

impl Application {
    /// Create an empty application; the name follows the resource id syntax
    pub fn new(name: impl Into<String>) -> GraphResult<Self> {
        Ok(Self {
            config: ApplicationConfig {
                id: SystemId::generate(),
                name: ResourceId::parse(name, "name")?,
            },
            events: Vec::new(),
            compute: Vec::new(),
            storage: Vec::new(),
            triggers: Vec::new(),
            references: Vec::new(),
            system_ids: HashSet::new(),
            user_ids: HashSet::new(),
            nodes: HashMap::new(),
        })
    }

    /// Add a descriptor and everything it implicitly references
    ///
    /// # Errors
    /// - `DuplicateSystemId` if this very descriptor was already added
    /// - `DuplicateUserId` if another non-trigger descriptor uses its id
    /// - `InvalidTriggerSource` if a trigger's source is not an event
    /// - `MissingArgument` if a connection lacks a source or target
    /// - `InvalidTriggerTarget` / `InvalidReferenceSource` if a connection
    ///   end that must be a compute is not one
    /// - `UnresolvedEndpoint` if a compute-owned connection arrives without
    ///   its compute
    pub fn with(&mut self, descriptor: impl Into<Descriptor>) -> GraphResult<&mut Self> {
        let mut pending = Pending::default();
        if let Err(e) = self.absorb(descriptor.into(), &mut pending) {
            self.settle(&mut pending);
            return Err(e);
        }
        Ok(self)
    }

    fn absorb(&mut self, descriptor: Descriptor, pending: &mut Pending) -> GraphResult<()> {
        self.classify(descriptor, pending)?;

        while let Some(next) = pending.queue.pop_front() {
            // Reached twice through different connections
            if self.system_ids.contains(&next.system_id()) {
                continue;
            }
            self.classify(next, pending)?;
        }
        Ok(())
    }

    /// Add the endpoints recorded connections still wait for
    ///
    /// Runs after a failure. Claimed endpoints passed their checks when
    /// claimed and no later descriptor may take their user id, so they always
    /// classify; anything else left in the queue is dropped.
    fn settle(&mut self, pending: &mut Pending) {
        while let Some(next) = pending.queue.pop_front() {
            if self.system_ids.contains(&next.system_id()) || !pending.is_claimed(&next) {
                continue;
            }
            if let Err(e) = self.classify(next, pending) {
                warn!(application = %self.config.name, error = %e, "Claimed endpoint rejected");
            }
        }
    }

    /// Add descriptors in order, stopping at the first failure
    pub fn with_all<I>(&mut self, descriptors: I) -> GraphResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Descriptor>,
    {
        for descriptor in descriptors {
            self.with(descriptor)?;
        }
        Ok(self)
    }

    fn classify(&mut self, descriptor: Descriptor, pending: &mut Pending) -> GraphResult<()> {
        let system_id = descriptor.system_id();
        if self.system_ids.contains(&system_id) {
            return Err(GraphError::DuplicateSystemId(system_id));
        }
        if let Some(user_id) = descriptor.user_id() {
            if self.user_ids.contains(user_id) || pending.claimed_by_other(user_id, system_id) {
                return Err(GraphError::DuplicateUserId(user_id.to_string()));
            }
        }

        match &descriptor {
            Descriptor::Trigger(trigger) => {
                let (source, target) = connection_ends(trigger.source(), trigger.target())?;
                if !source.kind().is_event() {
                    return Err(GraphError::InvalidTriggerSource(source.user_id().to_string()));
                }
                if target.kind() != ResourceKind::Compute {
                    return Err(GraphError::InvalidTriggerTarget(target.user_id().to_string()));
                }
                self.check_endpoints(None, source, target, &pending.claimed)?;
            }
            Descriptor::Reference(reference) => {
                let (source, target) = connection_ends(reference.source(), reference.target())?;
                if source.kind() != ResourceKind::Compute {
                    return Err(GraphError::InvalidReferenceSource(
                        source.user_id().to_string(),
                    ));
                }
                self.check_endpoints(Some(reference.id()), source, target, &pending.claimed)?;
            }
            _ => {}
        }

        self.system_ids.insert(system_id);
        if let Some(user_id) = descriptor.user_id() {
            self.user_ids.insert(user_id.clone());
        }
        debug!(
            application = %self.config.name,
            kind = descriptor.label(),
            id = ?descriptor.user_id().map(ResourceId::as_str),
            system_id = %system_id,
            "Classified descriptor"
        );

        match descriptor {
            Descriptor::Http(event) => self.push_event(event.into()),
            Descriptor::Topic(event) => self.push_event(event.into()),
            Descriptor::Compute(compute) => {
                for trigger in compute.triggers() {
                    if !self.system_ids.contains(&trigger.system_id()) {
                        pending.queue.push_back(trigger.clone().into());
                    }
                }
                for reference in compute.references() {
                    if !self.system_ids.contains(&reference.system_id()) {
                        pending.queue.push_back(reference.clone().into());
                    }
                }
                self.nodes.insert(system_id, Slot::Compute(self.compute.len()));
                self.compute.push(compute);
            }
            Descriptor::Storage(storage) => {
                self.nodes.insert(system_id, Slot::Storage(self.storage.len()));
                self.storage.push(storage);
            }
            Descriptor::Trigger(trigger) => {
                self.pull_endpoints(trigger.source(), trigger.target(), pending);
                self.triggers.push(trigger);
            }
            Descriptor::Reference(reference) => {
                self.pull_endpoints(reference.source(), reference.target(), pending);
                self.references.push(reference);
            }
        }

        Ok(())
    }

    fn push_event(&mut self, event: Event) {
        self.nodes
            .insert(event.system_id(), Slot::Event(self.events.len()));
        self.events.push(event);
    }

    /// Both ends must already be in the graph or be addable afterwards
    ///
    /// A carried endpoint not yet in the graph is addable only while its user
    /// id is free: not in the graph, not the connection's own id, not the
    /// other end's id and not claimed earlier in the same `with` call. The
    /// connection is then the failing descriptor and is never recorded
    /// without its ends.
    fn check_endpoints(
        &self,
        connection_id: Option<&ResourceId>,
        source: &Endpoint,
        target: &Endpoint,
        claimed: &HashMap<ResourceId, SystemId>,
    ) -> GraphResult<()> {
        self.check_endpoint(source, connection_id, None, claimed)?;
        self.check_endpoint(target, connection_id, Some(source), claimed)
    }

    fn check_endpoint(
        &self,
        endpoint: &Endpoint,
        connection_id: Option<&ResourceId>,
        sibling: Option<&Endpoint>,
        claimed: &HashMap<ResourceId, SystemId>,
    ) -> GraphResult<()> {
        let system_id = endpoint.system_id();
        if self.system_ids.contains(&system_id) {
            return Ok(());
        }
        if endpoint.descriptor().is_none() {
            return Err(GraphError::UnresolvedEndpoint(endpoint.user_id().to_string()));
        }

        let user_id = endpoint.user_id();
        let taken_by_sibling = sibling.is_some_and(|other| {
            other.system_id() != system_id
                && other.user_id() == user_id
                && !self.system_ids.contains(&other.system_id())
        });
        let taken_by_claim = claimed.get(user_id).is_some_and(|owner| *owner != system_id);

        let taken_by_connection = connection_id == Some(user_id);

        if self.user_ids.contains(user_id)
            || taken_by_connection
            || taken_by_sibling
            || taken_by_claim
        {
            return Err(GraphError::DuplicateUserId(user_id.to_string()));
        }
        Ok(())
    }

    fn pull_endpoints(
        &self,
        source: Option<&Endpoint>,
        target: Option<&Endpoint>,
        pending: &mut Pending,
    ) {
        for endpoint in [source, target].into_iter().flatten() {
            if self.system_ids.contains(&endpoint.system_id()) {
                continue;
            }
            if let Some(resource) = endpoint.descriptor() {
                pending
                    .claimed
                    .insert(endpoint.user_id().clone(), endpoint.system_id());
                pending.queue.push_back(resource.clone().into());
            }
        }
    }

    /// Build the ordered hook calls for this graph without touching a driver
    pub fn plan(&self) -> GraphResult<DeploymentPlan> {
        let mut plan = DeploymentPlan::new(self.config.clone());

        for event in &self.events {
            plan.push(DeployStep::Event(event.config()));
        }
        for compute in &self.compute {
            plan.push(DeployStep::Compute(compute.config().clone()));
        }
        for storage in &self.storage {
            plan.push(DeployStep::Storage(storage.config().clone()));
        }
        for reference in &self.references {
            plan.push(DeployStep::Reference(ReferenceConfig {
                alias: reference.id().clone(),
                allows: reference.allows().to_vec(),
                source: self.expand(reference.source())?,
                target: self.expand(reference.target())?,
            }));
        }
        for trigger in &self.triggers {
            plan.push(DeployStep::Trigger(TriggerConfig {
                source: self.expand(trigger.source())?,
                target: self.expand(trigger.target())?,
            }));
        }

        Ok(plan)
    }

    /// Configuration of the graph's own copy of an endpoint
    fn expand(&self, endpoint: Option<&Endpoint>) -> GraphResult<ResourceConfig> {
        let endpoint = endpoint.ok_or(GraphError::MissingArgument("connection endpoint"))?;

        let config = match self.nodes.get(&endpoint.system_id()) {
            Some(Slot::Event(index)) => Resource::from(self.events[*index].clone()).config(),
            Some(Slot::Compute(index)) => {
                ResourceConfig::Compute(self.compute[*index].config().clone())
            }
            Some(Slot::Storage(index)) => {
                ResourceConfig::Storage(self.storage[*index].config().clone())
            }
            None => return Err(GraphError::UnresolvedEndpoint(endpoint.user_id().to_string())),
        };
        Ok(config)
    }

    /// Replay the graph to a driver built by `factory`
    ///
    /// The driver is refused with `InvalidDriver` before any hook fires if
    /// it reports a missing hook. A failing `finish` is reported as
    /// `DriverFinish`: every hook has run by then and nothing is rolled back.
    pub async fn deploy<F, D>(&self, factory: F, region: impl Into<Region>) -> DeployResult<D::Output>
    where
        F: FnOnce(&ApplicationConfig, &Region) -> D,
        D: Driver,
    {
        let region = region.into();
        let mut driver = factory(&self.config, &region);

        if let Some(hook) = driver.missing_hook() {
            warn!(application = %self.config.name, %hook, "Driver is missing a hook");
            return Err(DeployError::InvalidDriver(hook));
        }

        let plan = self.plan()?;
        info!(
            application = %self.config.name,
            region = %region,
            steps = plan.len(),
            "Replaying resource graph to driver"
        );
        plan.replay(&mut driver);

        match driver.finish().await {
            Ok(output) => {
                info!(application = %self.config.name, "Deployment finished");
                Ok(output)
            }
            Err(e) => {
                warn!(application = %self.config.name, error = %e, "Driver failed to finish");
                Err(DeployError::DriverFinish {
                    message: e.to_string(),
                })
            }
        }
    }

    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    pub fn name(&self) -> &ResourceId {
        &self.config.name
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn compute(&self) -> &[Compute] {
        &self.compute
    }

    pub fn storage(&self) -> &[Storage] {
        &self.storage
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Whether a descriptor with this system id is in the graph
    pub fn contains(&self, system_id: SystemId) -> bool {
        self.system_ids.contains(&system_id)
    }

    /// Total descriptors across all buckets
    pub fn len(&self) -> usize {
        self.events.len()
            + self.compute.len()
            + self.storage.len()
            + self.triggers.len()
            + self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn connection_ends<'a>(
    source: Option<&'a Endpoint>,
    target: Option<&'a Endpoint>,
) -> GraphResult<(&'a Endpoint, &'a Endpoint)> {
    let source = source.ok_or(GraphError::MissingArgument("connection source"))?;
    let target = target.ok_or(GraphError::MissingArgument("connection target"))?;
    Ok((source, target))
}
