// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! - `identifiers` - id syntax across every descriptor kind
//! - `graph` - identity invariants of assembled applications

mod graph;
mod identifiers;
