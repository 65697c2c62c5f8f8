// Copyright (c) 2025 - Cowboy AI, Inc.
//! Declarative infrastructure resource graphs for the Composable Information Machine
//!
//! Describe compute, storage and events, connect them with triggers and
//! references, and hand the resulting graph to a pluggable deployment
//! driver:
//!
//! ```rust
//! use cim_resource_graph::{Action, Application, Compute, HttpEvent, Storage, StorageCategory};
//! use cim_resource_graph::deploy::RecordingDriver;
//!
//! # tokio_test::block_on(async {
//! let mut app = Application::new("MyApp")?;
//! app.with(
//!     Compute::new("MyCompute")?
//!         .runtime("nodejs")
//!         .on(HttpEvent::new("MyHttpEvent")?.method("GET").path("/event"))
//!         .uses(Storage::new("MyStorage", StorageCategory::KeyValue)?, [Action::Read], None)?,
//! )?;
//!
//! let steps = app.deploy(|_, _| RecordingDriver::new(), "us-west-2").await?;
//! assert_eq!(steps.len(), 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # }).unwrap();
//! ```

pub mod application;
pub mod config;
pub mod deploy;
pub mod domain;
pub mod errors;

// Re-export commonly used types
pub use application::{Application, ApplicationConfig};
pub use config::{DeployConfig, Region};
pub use deploy::{DeploymentPlan, Driver, Hook};
pub use domain::{
    Action, Compute, Descriptor, Event, HttpEvent, Reference, Resource, ResourceId, Storage,
    StorageCategory, SystemId, Table, TopicEvent, Trigger,
};
pub use errors::{DeployError, DeployResult, GraphError, GraphResult};
