// ABOUTME: Typed resource and data-source traits bridging declarative configuration to clients
// ABOUTME: Attribute maps decode into validated config structs instead of panicking type asserts
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

mod audience;
mod environment;
mod feature;
mod project;

pub use audience::AudienceResource;
pub use environment::EnvironmentDataSource;
pub use feature::FeatureResource;
pub use project::ProjectDataSource;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::client::OptimizelyClient;
use crate::errors::{Error, Result};

/// Generic attribute bag a configuration host hands to a resource.
pub type AttributeMap = Map<String, Value>;

/// Snapshot of a resource after an operation: the identifier the host
/// should persist plus the attribute values to record.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState {
    /// Stable resource identifier
    pub id: String,
    /// Attribute snapshot
    pub attributes: AttributeMap,
}

impl ResourceState {
    /// Build a state snapshot.
    #[must_use]
    pub fn new(id: impl Into<String>, attributes: AttributeMap) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }
}

/// A managed resource with full CRUD lifecycle.
///
/// Each operation performs its HTTP calls strictly sequentially and holds
/// no state between invocations; the caller owns the state snapshots.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Externally visible type name, e.g. `optimizely_audience`.
    fn type_name(&self) -> &'static str;

    /// Create the remote object from configuration attributes.
    async fn create(
        &self,
        client: &OptimizelyClient,
        attributes: &AttributeMap,
    ) -> Result<ResourceState>;

    /// Refresh the state snapshot from the remote system of record.
    async fn read(
        &self,
        client: &OptimizelyClient,
        state: &ResourceState,
    ) -> Result<ResourceState>;

    /// Apply changed configuration attributes to the remote object.
    async fn update(
        &self,
        client: &OptimizelyClient,
        state: &ResourceState,
        attributes: &AttributeMap,
    ) -> Result<ResourceState>;

    /// Remove (or archive) the remote object.
    async fn delete(&self, client: &OptimizelyClient, state: &ResourceState) -> Result<()>;
}

/// A read-only data source. The two shipped here are pure identity
/// lookups with no remote call.
pub trait DataSource: Send + Sync {
    /// Externally visible type name, e.g. `optimizely_project`.
    fn type_name(&self) -> &'static str;

    /// Resolve the data source from its configuration attributes.
    fn read(&self, attributes: &AttributeMap) -> Result<ResourceState>;
}

/// Decode an attribute map into a typed configuration struct.
///
/// Type mismatches surface as [`Error::Validation`] naming the resource
/// type, never as a panic.
pub(crate) fn decode_attributes<T: DeserializeOwned>(
    type_name: &str,
    attributes: &AttributeMap,
) -> Result<T> {
    serde_json::from_value(Value::Object(attributes.clone()))
        .map_err(|err| Error::validation(type_name, err.to_string()))
}
