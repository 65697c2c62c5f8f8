// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reference Drivers
//!
//! Drivers that deploy nothing. They are useful for dry runs, debugging and
//! tests:
//!
//! - [`LoggingDriver`] - logs every payload, finishes with the call count
//! - [`RecordingDriver`] - records every call, finishes with the recording
//! - [`NullDriver`] - discards everything

use async_trait::async_trait;
use std::convert::Infallible;
use tracing::{debug, info};

use super::{DeployStep, Driver, ReferenceConfig, TriggerConfig};
use crate::application::ApplicationConfig;
use crate::config::Region;
use crate::domain::{ComputeConfig, EventConfig, StorageConfig};

/// Logging driver - logs payloads but doesn't deploy them
#[derive(Debug, Clone)]
pub struct LoggingDriver {
    application: String,
    region: Region,
    calls: usize,
}

impl LoggingDriver {
    pub fn new(application: &ApplicationConfig, region: &Region) -> Self {
        info!(
            application = %application.name,
            region = %region,
            "Starting logging driver"
        );
        Self {
            application: application.name.to_string(),
            region: region.clone(),
            calls: 0,
        }
    }

    /// Hook calls received so far
    pub fn calls(&self) -> usize {
        self.calls
    }

    fn log(&mut self, hook: &str, payload: &impl serde::Serialize) {
        self.calls += 1;
        match serde_json::to_string(payload) {
            Ok(json) => info!(hook = hook, application = %self.application, "{}", json),
            Err(e) => debug!(hook = hook, "Payload not serializable: {}", e),
        }
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    type Output = usize;
    type Error = Infallible;

    fn on_event(&mut self, config: &EventConfig) {
        self.log("on_event", config);
    }

    fn on_compute(&mut self, config: &ComputeConfig) {
        self.log("on_compute", config);
    }

    fn on_storage(&mut self, config: &StorageConfig) {
        self.log("on_storage", config);
    }

    fn on_reference(&mut self, config: &ReferenceConfig) {
        self.log("on_reference", config);
    }

    fn on_trigger(&mut self, config: &TriggerConfig) {
        self.log("on_trigger", config);
    }

    async fn finish(&mut self) -> Result<usize, Infallible> {
        info!(
            application = %self.application,
            region = %self.region,
            calls = self.calls,
            "Logging driver finished"
        );
        Ok(self.calls)
    }
}

/// Recording driver - keeps every call for later inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    recorded: Vec<DeployStep>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far
    pub fn recorded(&self) -> &[DeployStep] {
        &self.recorded
    }
}

#[async_trait]
impl Driver for RecordingDriver {
    type Output = Vec<DeployStep>;
    type Error = Infallible;

    fn on_event(&mut self, config: &EventConfig) {
        self.recorded.push(DeployStep::Event(config.clone()));
    }

    fn on_compute(&mut self, config: &ComputeConfig) {
        self.recorded.push(DeployStep::Compute(config.clone()));
    }

    fn on_storage(&mut self, config: &StorageConfig) {
        self.recorded.push(DeployStep::Storage(config.clone()));
    }

    fn on_reference(&mut self, config: &ReferenceConfig) {
        self.recorded.push(DeployStep::Reference(config.clone()));
    }

    fn on_trigger(&mut self, config: &TriggerConfig) {
        self.recorded.push(DeployStep::Trigger(config.clone()));
    }

    async fn finish(&mut self) -> Result<Vec<DeployStep>, Infallible> {
        Ok(std::mem::take(&mut self.recorded))
    }
}

/// Null driver - discards every call
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDriver;

impl NullDriver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Driver for NullDriver {
    type Output = ();
    type Error = Infallible;

    fn on_event(&mut self, _config: &EventConfig) {}

    fn on_compute(&mut self, _config: &ComputeConfig) {}

    fn on_storage(&mut self, _config: &StorageConfig) {}

    fn on_reference(&mut self, _config: &ReferenceConfig) {}

    fn on_trigger(&mut self, _config: &TriggerConfig) {}

    async fn finish(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Application;
    use crate::deploy::Hook;
    use crate::domain::{Compute, HttpEvent};

    fn application() -> Application {
        let mut app = Application::new("DriverApp").unwrap();
        app.with(
            Compute::new("Worker")
                .unwrap()
                .on(HttpEvent::new("Hook").unwrap()),
        )
        .unwrap();
        app
    }

    #[tokio::test]
    async fn test_logging_driver_counts_calls() {
        let app = application();
        let calls = app
            .deploy(LoggingDriver::new, Region::new("eu-central-1"))
            .await
            .unwrap();
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_recording_driver_returns_steps_in_order() {
        let app = application();
        let steps = app
            .deploy(|_, _| RecordingDriver::new(), Region::default())
            .await
            .unwrap();

        let hooks: Vec<Hook> = steps.iter().map(DeployStep::hook).collect();
        assert_eq!(hooks, vec![Hook::OnEvent, Hook::OnCompute, Hook::OnTrigger]);
        assert_eq!(steps, app.plan().unwrap().steps);
    }

    #[tokio::test]
    async fn test_null_driver() {
        let app = application();
        assert!(app.deploy(|_, _| NullDriver::new(), Region::default()).await.is_ok());
    }
}
