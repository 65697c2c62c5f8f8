// Copyright (c) 2025 - Cowboy AI, Inc.
//! Deployment configuration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable holding the default deployment region
pub const REGION_ENV: &str = "CIM_DEPLOY_REGION";

/// Region used when neither the caller nor the environment names one
pub const DEFAULT_REGION: &str = "us-west-2";

/// Provider region a deployment targets
///
/// The value is opaque to the graph; drivers decide which regions they
/// accept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Load the region from `CIM_DEPLOY_REGION`, falling back to the default
    pub fn from_env() -> Self {
        std::env::var(REGION_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(Self)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Region {
    fn default() -> Self {
        Self(DEFAULT_REGION.to_string())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Region {
    fn from(region: &str) -> Self {
        Self::new(region)
    }
}

impl From<String> for Region {
    fn from(region: String) -> Self {
        Self(region)
    }
}

/// Settings for a deployment run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Target region
    #[serde(default)]
    pub region: Region,

    /// Build and log the plan without calling a provider driver
    #[serde(default)]
    pub dry_run: bool,
}

impl DeployConfig {
    /// Load configuration from environment variables
    ///
    /// - `CIM_DEPLOY_REGION` - target region (default `us-west-2`)
    /// - `CIM_DEPLOY_DRY_RUN` - `1`/`true` to only plan
    pub fn from_env() -> Self {
        let dry_run = std::env::var("CIM_DEPLOY_DRY_RUN")
            .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            region: Region::from_env(),
            dry_run,
        }
    }
}
