// Copyright (c) 2025 - Cowboy AI, Inc.

//! Driver Contract - the boundary between a resource graph and a provider
//!
//! An application never talks to a provider directly. It replays its graph
//! to a [`Driver`] in a fixed order and lets the driver turn each payload
//! into real infrastructure:
//!
//! ```text
//! Application ──plan()──> DeploymentPlan ──replay──> Driver ──finish()──> Output
//!                         [events,                   on_event
//!                          compute,                  on_compute
//!                          storage,                  on_storage
//!                          references,               on_reference
//!                          triggers]                 on_trigger
//! ```
//!
//! Events and compute exist before anything names them, storage exists
//! before references point at it, and references (grants) are in place
//! before triggers make a compute reachable.
//!
//! # Example Implementation
//!
//! ```rust
//! use async_trait::async_trait;
//! use cim_resource_graph::deploy::{Driver, ReferenceConfig, TriggerConfig};
//! use cim_resource_graph::domain::{ComputeConfig, EventConfig, StorageConfig};
//!
//! #[derive(Default)]
//! struct CountingDriver {
//!     calls: usize,
//! }
//!
//! #[async_trait]
//! impl Driver for CountingDriver {
//!     type Output = usize;
//!     type Error = std::convert::Infallible;
//!
//!     fn on_event(&mut self, _config: &EventConfig) { self.calls += 1; }
//!     fn on_compute(&mut self, _config: &ComputeConfig) { self.calls += 1; }
//!     fn on_storage(&mut self, _config: &StorageConfig) { self.calls += 1; }
//!     fn on_reference(&mut self, _config: &ReferenceConfig) { self.calls += 1; }
//!     fn on_trigger(&mut self, _config: &TriggerConfig) { self.calls += 1; }
//!
//!     async fn finish(&mut self) -> Result<usize, Self::Error> {
//!         Ok(self.calls)
//!     }
//! }
//! ```

pub mod drivers;
pub mod hooks;
pub mod plan;

pub use drivers::{LoggingDriver, NullDriver, RecordingDriver};
pub use hooks::{DriverFailure, HookDriver, HookDriverBuilder};
pub use plan::{DeployStep, DeploymentPlan, ReferenceConfig, TriggerConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{ComputeConfig, EventConfig, StorageConfig};

/// Deployment driver
///
/// Hooks are called once per resource, in plan order, with no concurrency.
/// `finish` is awaited exactly once after the last hook; its output is
/// returned verbatim from `Application::deploy`.
#[async_trait]
pub trait Driver: Send {
    /// Result of a finished deployment
    type Output: Send;

    /// Error type for finalization
    type Error: std::error::Error + Send + Sync;

    fn on_event(&mut self, config: &EventConfig);

    fn on_compute(&mut self, config: &ComputeConfig);

    fn on_storage(&mut self, config: &StorageConfig);

    /// Source and target arrive as expanded configuration payloads
    fn on_reference(&mut self, config: &ReferenceConfig);

    /// Source and target arrive as expanded configuration payloads
    fn on_trigger(&mut self, config: &TriggerConfig);

    /// Finalize the deployment
    async fn finish(&mut self) -> Result<Self::Output, Self::Error>;

    /// First hook this instance cannot serve
    ///
    /// Statically implemented drivers always serve every hook. Drivers
    /// assembled at runtime override this so that deployment can refuse
    /// them before any hook fires.
    fn missing_hook(&self) -> Option<Hook> {
        None
    }
}

/// Driver hook names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hook {
    OnEvent,
    OnCompute,
    OnStorage,
    OnTrigger,
    OnReference,
    Finish,
}

impl Hook {
    /// Hooks in the order a driver is checked for them
    pub const REQUIRED: [Hook; 6] = [
        Hook::OnEvent,
        Hook::OnCompute,
        Hook::OnStorage,
        Hook::OnTrigger,
        Hook::OnReference,
        Hook::Finish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnEvent => "on_event",
            Self::OnCompute => "on_compute",
            Self::OnStorage => "on_storage",
            Self::OnTrigger => "on_trigger",
            Self::OnReference => "on_reference",
            Self::Finish => "finish",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
