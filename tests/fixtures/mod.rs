// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-resource-graph
//!
//! Builders for the descriptors and drivers shared by the integration tests.
//! Ids are fixed; system ids are generated, so tests compare by user id.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use cim_resource_graph::deploy::{DriverFailure, HookDriver, HookDriverBuilder};
use cim_resource_graph::{Action, Compute, HttpEvent, Storage, StorageCategory};

pub const APP_NAME: &str = "MyApp";
pub const COMPUTE_ID: &str = "MyCompute";
pub const HTTP_EVENT_ID: &str = "MyHttpEvent";
pub const STORAGE_ID: &str = "MyStorage";

/// Shared, ordered log of hook names
pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

pub fn http_event() -> HttpEvent {
    HttpEvent::new(HTTP_EVENT_ID)
        .expect("Invalid event id in fixture")
        .method("GET")
        .path("/event")
}

pub fn key_value_storage() -> Storage {
    Storage::with_category(STORAGE_ID, "keyvalue").expect("Invalid storage in fixture")
}

pub fn relational_storage(id: &str) -> Storage {
    Storage::new(id, StorageCategory::Relational).expect("Invalid storage in fixture")
}

/// `MyCompute` triggered by `MyHttpEvent` and using `MyStorage` with no actions
pub fn wired_compute() -> Compute {
    Compute::new(COMPUTE_ID)
        .expect("Invalid compute id in fixture")
        .runtime("nodejs")
        .on(http_event())
        .uses(key_value_storage(), Vec::<Action>::new(), None)
        .expect("Invalid reference in fixture")
}

/// Driver recording every hook into `log`; `finish` returns the call count
pub fn recording_hooks(log: &CallLog) -> HookDriverBuilder<usize> {
    let (e, c, s, r, t, f) = (
        log.clone(),
        log.clone(),
        log.clone(),
        log.clone(),
        log.clone(),
        log.clone(),
    );
    HookDriver::builder()
        .on_event(move |_| e.lock().unwrap().push("on_event"))
        .on_compute(move |_| c.lock().unwrap().push("on_compute"))
        .on_storage(move |_| s.lock().unwrap().push("on_storage"))
        .on_reference(move |_| r.lock().unwrap().push("on_reference"))
        .on_trigger(move |_| t.lock().unwrap().push("on_trigger"))
        .finish(move || {
            let calls = f.lock().unwrap().len();
            async move { Ok::<usize, DriverFailure>(calls) }
        })
}

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}
