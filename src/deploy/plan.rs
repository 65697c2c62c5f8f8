// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Deployment Plan
//!
//! A plan is the application graph flattened into the exact sequence of
//! hook calls a driver will receive. Building it performs no I/O and touches
//! no driver, so every graph-level failure surfaces before deployment starts.
//!
//! ```text
//! Application ──plan()──> [Event.., Compute.., Storage.., Reference.., Trigger..]
//!                                         │
//!                                    replay(driver)
//! ```

use serde::{Deserialize, Serialize};

use super::{Driver, Hook};
use crate::application::ApplicationConfig;
use crate::domain::{Action, ComputeConfig, EventConfig, ResourceConfig, ResourceId, StorageConfig};

/// Payload for `Driver::on_reference`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// Name under which the target is exposed to the source compute
    pub alias: ResourceId,
    pub allows: Vec<Action>,
    pub source: ResourceConfig,
    pub target: ResourceConfig,
}

/// Payload for `Driver::on_trigger`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerConfig {
    pub source: ResourceConfig,
    pub target: ResourceConfig,
}

/// A single hook invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "hook", content = "config", rename_all = "snake_case")]
pub enum DeployStep {
    Event(EventConfig),
    Compute(ComputeConfig),
    Storage(StorageConfig),
    Reference(ReferenceConfig),
    Trigger(TriggerConfig),
}

impl DeployStep {
    /// Hook this step is delivered to
    pub fn hook(&self) -> Hook {
        match self {
            DeployStep::Event(_) => Hook::OnEvent,
            DeployStep::Compute(_) => Hook::OnCompute,
            DeployStep::Storage(_) => Hook::OnStorage,
            DeployStep::Reference(_) => Hook::OnReference,
            DeployStep::Trigger(_) => Hook::OnTrigger,
        }
    }

    /// Deliver this step to its hook
    pub fn apply<D: Driver + ?Sized>(&self, driver: &mut D) {
        match self {
            DeployStep::Event(config) => driver.on_event(config),
            DeployStep::Compute(config) => driver.on_compute(config),
            DeployStep::Storage(config) => driver.on_storage(config),
            DeployStep::Reference(config) => driver.on_reference(config),
            DeployStep::Trigger(config) => driver.on_trigger(config),
        }
    }
}

/// Ordered hook calls for one application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    pub application: ApplicationConfig,
    pub steps: Vec<DeployStep>,
}

impl DeploymentPlan {
    pub fn new(application: ApplicationConfig) -> Self {
        Self {
            application,
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, step: DeployStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[DeployStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Hook sequence the plan will produce
    pub fn hooks(&self) -> Vec<Hook> {
        self.steps.iter().map(DeployStep::hook).collect()
    }

    /// Deliver every step to `driver`, in order
    pub fn replay<D: Driver + ?Sized>(&self, driver: &mut D) {
        for step in &self.steps {
            step.apply(driver);
        }
    }
}
