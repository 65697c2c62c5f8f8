// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Identifier Syntax

use cim_resource_graph::{
    Action, Application, Compute, GraphError, HttpEvent, Reference, Storage, StorageCategory,
    TopicEvent,
};
use proptest::prelude::*;

fn construct_all(id: &str) -> Vec<Result<(), GraphError>> {
    vec![
        Application::new(id).map(|_| ()),
        Compute::new(id).map(|_| ()),
        Storage::new(id, StorageCategory::KeyValue).map(|_| ()),
        Storage::new(id, StorageCategory::Relational).map(|_| ()),
        HttpEvent::new(id).map(|_| ()),
        TopicEvent::new(id).map(|_| ()),
        Reference::new(id).map(|_| ()),
    ]
}

proptest! {
    /// Property: every alphanumeric id is accepted by every constructor
    #[test]
    fn prop_alphanumeric_ids_are_accepted(id in "[0-9a-zA-Z]{1,32}") {
        for result in construct_all(&id) {
            prop_assert!(result.is_ok());
        }
    }

    /// Property: a space or hyphen anywhere makes the id invalid
    #[test]
    fn prop_separators_are_rejected(
        head in "[0-9a-zA-Z]{0,12}",
        separator in prop::sample::select(vec![' ', '-']),
        tail in "[0-9a-zA-Z]{0,12}",
    ) {
        let id = format!("{}{}{}", head, separator, tail);
        for result in construct_all(&id) {
            let is_invalid_identifier = matches!(result, Err(GraphError::InvalidIdentifier { .. }));
            prop_assert!(is_invalid_identifier);
        }
    }

    /// Property: the default reference alias is always a valid id
    #[test]
    fn prop_default_alias_is_valid(id in "[0-9a-zA-Z]{1,32}") {
        let storage = Storage::new(id.as_str(), StorageCategory::KeyValue).unwrap();
        let compute = Compute::new("Worker")
            .unwrap()
            .uses(storage, Vec::<Action>::new(), None)
            .unwrap();
        prop_assert_eq!(compute.references()[0].id().as_str(), format!("{}Ref", id));
    }
}
