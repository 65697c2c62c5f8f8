// Copyright (c) 2025 - Cowboy AI, Inc.
//! Runtime-Assembled Drivers
//!
//! [`HookDriver`] builds a driver out of closures, for providers whose hook
//! set is only known at runtime (plugins, scripted drivers, test doubles).
//! Any hook left unset is reported through [`Driver::missing_hook`], which
//! makes `Application::deploy` refuse the driver before a single hook fires.
//!
//! # Example
//!
//! ```rust
//! use cim_resource_graph::deploy::{Driver, Hook, HookDriver};
//!
//! let driver = HookDriver::<()>::builder()
//!     .on_event(|_| {})
//!     .on_compute(|_| {})
//!     .on_storage(|_| {})
//!     .on_reference(|_| {})
//!     .finish(|| async { Ok(()) })
//!     .build();
//!
//! assert_eq!(driver.missing_hook(), Some(Hook::OnTrigger));
//! ```

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

use super::{Driver, Hook, ReferenceConfig, TriggerConfig};
use crate::domain::{ComputeConfig, EventConfig, StorageConfig};

/// Failure reported by a closure-based `finish`
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct DriverFailure(pub String);

impl DriverFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

type HookFn<C> = Box<dyn FnMut(&C) + Send>;
type FinishFuture<T> = Pin<Box<dyn Future<Output = Result<T, DriverFailure>> + Send>>;
type FinishFn<T> = Box<dyn FnMut() -> FinishFuture<T> + Send>;

/// Driver assembled from optional hook closures
pub struct HookDriver<T> {
    on_event: Option<HookFn<EventConfig>>,
    on_compute: Option<HookFn<ComputeConfig>>,
    on_storage: Option<HookFn<StorageConfig>>,
    on_trigger: Option<HookFn<TriggerConfig>>,
    on_reference: Option<HookFn<ReferenceConfig>>,
    finish: Option<FinishFn<T>>,
}

impl<T> HookDriver<T> {
    pub fn builder() -> HookDriverBuilder<T> {
        HookDriverBuilder {
            driver: HookDriver {
                on_event: None,
                on_compute: None,
                on_storage: None,
                on_trigger: None,
                on_reference: None,
                finish: None,
            },
        }
    }

    fn has(&self, hook: Hook) -> bool {
        match hook {
            Hook::OnEvent => self.on_event.is_some(),
            Hook::OnCompute => self.on_compute.is_some(),
            Hook::OnStorage => self.on_storage.is_some(),
            Hook::OnTrigger => self.on_trigger.is_some(),
            Hook::OnReference => self.on_reference.is_some(),
            Hook::Finish => self.finish.is_some(),
        }
    }
}

impl<T> std::fmt::Debug for HookDriver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let present: Vec<&str> = Hook::REQUIRED
            .iter()
            .filter(|hook| self.has(**hook))
            .map(Hook::as_str)
            .collect();
        f.debug_struct("HookDriver").field("hooks", &present).finish()
    }
}

/// Builder for [`HookDriver`]
pub struct HookDriverBuilder<T> {
    driver: HookDriver<T>,
}

impl<T> HookDriverBuilder<T> {
    pub fn on_event(mut self, hook: impl FnMut(&EventConfig) + Send + 'static) -> Self {
        self.driver.on_event = Some(Box::new(hook));
        self
    }

    pub fn on_compute(mut self, hook: impl FnMut(&ComputeConfig) + Send + 'static) -> Self {
        self.driver.on_compute = Some(Box::new(hook));
        self
    }

    pub fn on_storage(mut self, hook: impl FnMut(&StorageConfig) + Send + 'static) -> Self {
        self.driver.on_storage = Some(Box::new(hook));
        self
    }

    pub fn on_trigger(mut self, hook: impl FnMut(&TriggerConfig) + Send + 'static) -> Self {
        self.driver.on_trigger = Some(Box::new(hook));
        self
    }

    pub fn on_reference(mut self, hook: impl FnMut(&ReferenceConfig) + Send + 'static) -> Self {
        self.driver.on_reference = Some(Box::new(hook));
        self
    }

    pub fn finish<F, Fut>(mut self, mut finish: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, DriverFailure>> + Send + 'static,
    {
        self.driver.finish = Some(Box::new(move || -> FinishFuture<T> { Box::pin(finish()) }));
        self
    }

    pub fn build(self) -> HookDriver<T> {
        self.driver
    }
}

#[async_trait]
impl<T: Send + 'static> Driver for HookDriver<T> {
    type Output = T;
    type Error = DriverFailure;

    fn on_event(&mut self, config: &EventConfig) {
        if let Some(hook) = self.on_event.as_mut() {
            hook(config);
        }
    }

    fn on_compute(&mut self, config: &ComputeConfig) {
        if let Some(hook) = self.on_compute.as_mut() {
            hook(config);
        }
    }

    fn on_storage(&mut self, config: &StorageConfig) {
        if let Some(hook) = self.on_storage.as_mut() {
            hook(config);
        }
    }

    fn on_reference(&mut self, config: &ReferenceConfig) {
        if let Some(hook) = self.on_reference.as_mut() {
            hook(config);
        }
    }

    fn on_trigger(&mut self, config: &TriggerConfig) {
        if let Some(hook) = self.on_trigger.as_mut() {
            hook(config);
        }
    }

    async fn finish(&mut self) -> Result<T, DriverFailure> {
        match self.finish.as_mut() {
            Some(finish) => finish().await,
            None => Err(DriverFailure::new("driver has no finish hook")),
        }
    }

    fn missing_hook(&self) -> Option<Hook> {
        Hook::REQUIRED.into_iter().find(|hook| !self.has(*hook))
    }
}
