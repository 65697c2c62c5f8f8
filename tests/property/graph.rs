// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Graph Identity Invariants

use cim_resource_graph::{Application, Compute, GraphError, HttpEvent, Storage, StorageCategory};
use proptest::prelude::*;
use std::collections::HashSet;

fn counts(app: &Application) -> [usize; 5] {
    [
        app.events().len(),
        app.compute().len(),
        app.storage().len(),
        app.triggers().len(),
        app.references().len(),
    ]
}

proptest! {
    /// Property: a repeated descriptor never changes the bucket counts
    #[test]
    fn prop_duplicate_system_id_leaves_graph_unchanged(
        computes in 0usize..6,
        storages in 0usize..6,
        pick in any::<prop::sample::Index>(),
    ) {
        let mut app = Application::new("PropApp").unwrap();
        let mut added = Vec::new();
        for i in 0..computes {
            let compute = Compute::new(format!("Compute{}", i))
                .unwrap()
                .on(HttpEvent::new(format!("Event{}", i)).unwrap());
            added.push(cim_resource_graph::Descriptor::from(compute.clone()));
            app.with(compute).unwrap();
        }
        for i in 0..storages {
            let storage = Storage::new(format!("Storage{}", i), StorageCategory::KeyValue).unwrap();
            added.push(storage.clone().into());
            app.with(storage).unwrap();
        }
        prop_assume!(!added.is_empty());

        let before = counts(&app);
        let duplicate = added[pick.index(added.len())].clone();
        let system_id = duplicate.system_id();

        prop_assert_eq!(app.with(duplicate).unwrap_err(), GraphError::DuplicateSystemId(system_id));
        prop_assert_eq!(counts(&app), before);
    }

    /// Property: user ids of non-trigger descriptors stay unique
    #[test]
    fn prop_user_ids_stay_unique(ids in prop::collection::vec("[A-D][0-2]", 1..12)) {
        let mut app = Application::new("PropApp").unwrap();
        for id in &ids {
            let _ = app.with(Compute::new(id.as_str()).unwrap());
        }

        let distinct: HashSet<&String> = ids.iter().collect();
        let stored: HashSet<&str> = app.compute().iter().map(|c| c.id().as_str()).collect();
        prop_assert_eq!(app.compute().len(), distinct.len());
        prop_assert_eq!(stored.len(), distinct.len());
    }
}
