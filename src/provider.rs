// ABOUTME: Provider root aggregating resources and data sources behind a type-name registry
// ABOUTME: Owns the shared client built from provider-level configuration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

use std::collections::HashMap;

use tracing::info;

use crate::client::OptimizelyClient;
use crate::config::ProviderConfig;
use crate::errors::{Error, Result};
use crate::resources::{
    AudienceResource, DataSource, EnvironmentDataSource, FeatureResource, ProjectDataSource,
    Resource,
};

/// The provider root: one shared client plus the registry of resource and
/// data-source implementations, keyed by their external type names.
pub struct OptimizelyProvider {
    client: OptimizelyClient,
    resources: HashMap<&'static str, Box<dyn Resource>>,
    data_sources: HashMap<&'static str, Box<dyn DataSource>>,
}

impl OptimizelyProvider {
    /// Build a provider from configuration.
    #[must_use]
    pub fn new(config: &ProviderConfig) -> Self {
        let mut resources: HashMap<&'static str, Box<dyn Resource>> = HashMap::new();
        for resource in [
            Box::new(AudienceResource) as Box<dyn Resource>,
            Box::new(FeatureResource) as Box<dyn Resource>,
        ] {
            resources.insert(resource.type_name(), resource);
        }

        let mut data_sources: HashMap<&'static str, Box<dyn DataSource>> = HashMap::new();
        for data_source in [
            Box::new(EnvironmentDataSource) as Box<dyn DataSource>,
            Box::new(ProjectDataSource) as Box<dyn DataSource>,
        ] {
            data_sources.insert(data_source.type_name(), data_source);
        }

        info!(
            resources = resources.len(),
            data_sources = data_sources.len(),
            "configured Optimizely provider"
        );

        Self {
            client: OptimizelyClient::new(config),
            resources,
            data_sources,
        }
    }

    /// Build a provider from `OPTIMIZELY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(&ProviderConfig::from_env()?))
    }

    /// The shared API client.
    #[must_use]
    pub fn client(&self) -> &OptimizelyClient {
        &self.client
    }

    /// Look up a resource implementation by type name.
    pub fn resource(&self, type_name: &str) -> Result<&dyn Resource> {
        self.resources
            .get(type_name)
            .map(AsRef::as_ref)
            .ok_or_else(|| Error::UnknownType {
                type_name: type_name.to_string(),
            })
    }

    /// Look up a data-source implementation by type name.
    pub fn data_source(&self, type_name: &str) -> Result<&dyn DataSource> {
        self.data_sources
            .get(type_name)
            .map(AsRef::as_ref)
            .ok_or_else(|| Error::UnknownType {
                type_name: type_name.to_string(),
            })
    }

    /// Registered resource type names, sorted.
    #[must_use]
    pub fn resource_types(&self) -> Vec<&'static str> {
        let mut types: Vec<&'static str> = self.resources.keys().copied().collect();
        types.sort_unstable();
        types
    }
}
