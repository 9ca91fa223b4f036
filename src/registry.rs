//! The registry: sole owner of every resource.
//!
//! All mutations go through here. Each one either succeeds and emits one
//! [`EventRecord`] to the sink, or fails with a single [`Error`] and leaves
//! the registry exactly as it was.

use crate::config::{ConfigError, EngineConfig};
use crate::error::{Error, Result};
use crate::events::{EventRecord, EventSink, TracingSink};
use crate::factory::ResourceFactory;
use crate::lifecycle::{LifecycleEvent, ResourceState};
use crate::resources::Resource;
use crate::validation::{RawConfig, ValidationError};
use indexmap::IndexMap;
use tracing::debug;

/// Named resources in creation order.
///
/// Deleted resources stay in the registry, so a name can never be reused.
///
/// # Example
///
/// ```rust
/// use cloudconnect::{RawConfig, Registry, ResourceState};
///
/// let mut registry = Registry::new();
/// let raw = RawConfig::new()
///     .with("runtime", "python")
///     .with("region", "WestEurope")
///     .with("replicas", "2");
///
/// registry.create_resource("AppService", "webapp1", &raw).unwrap();
/// assert_eq!(registry.start_resource("webapp1").unwrap(), ResourceState::Started);
/// assert!(registry.delete_resource("webapp1", true).is_err());
/// ```
#[derive(Debug)]
pub struct Registry<K: EventSink = TracingSink> {
    factory: ResourceFactory,
    resources: IndexMap<String, Resource>,
    sink: K,
}

impl Registry<TracingSink> {
    /// Every resource type enabled, events logged through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(ResourceFactory::default(), TracingSink::default())
    }

    pub fn from_config(config: &EngineConfig) -> std::result::Result<Self, ConfigError> {
        let factory = ResourceFactory::from_config(config)?;
        Ok(Self::with_sink(
            factory,
            TracingSink::new(config.include_config_in_logs),
        ))
    }
}

impl Default for Registry<TracingSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EventSink> Registry<K> {
    pub fn with_sink(factory: ResourceFactory, sink: K) -> Self {
        Self {
            factory,
            resources: IndexMap::new(),
            sink,
        }
    }

    /// Validate, build and store a new resource.
    ///
    /// A name already in use fails even when its resource is deleted.
    pub fn create_resource(
        &mut self,
        tag: &str,
        name: &str,
        raw: &RawConfig,
    ) -> Result<&Resource> {
        let name = name.trim();
        if self.resources.contains_key(name) {
            debug!(resource = %name, "Rejected duplicate resource name");
            return Err(Error::DuplicateName(name.to_string()));
        }

        let resource = self.factory.create(tag, name, raw).map_err(|err| {
            debug!(
                resource = %name,
                resource_type = %tag,
                error = %err,
                "Rejected resource creation"
            );
            err
        })?;

        let record = EventRecord::latest(&resource);
        let (index, _) = self.resources.insert_full(resource.name().to_string(), resource);
        if let Some(record) = record {
            self.sink.record(&record);
        }
        Ok(&self.resources[index])
    }

    pub fn start_resource(&mut self, name: &str) -> Result<ResourceState> {
        self.transition(name, LifecycleEvent::Start)
    }

    pub fn stop_resource(&mut self, name: &str) -> Result<ResourceState> {
        self.transition(name, LifecycleEvent::Stop)
    }

    /// Mark a resource deleted. `confirm` must be set; an unconfirmed
    /// request fails without touching the resource.
    pub fn delete_resource(&mut self, name: &str, confirm: bool) -> Result<ResourceState> {
        let name = name.trim();
        if !self.resources.contains_key(name) {
            return Err(Error::NotFound(name.to_string()));
        }
        if !confirm {
            debug!(resource = %name, "Deletion not confirmed");
            return Err(Error::DeletionNotConfirmed(name.to_string()));
        }
        self.transition(name, LifecycleEvent::Delete)
    }

    fn transition(&mut self, name: &str, event: LifecycleEvent) -> Result<ResourceState> {
        let name = name.trim();
        let resource = self
            .resources
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        match resource.apply(event) {
            Ok(state) => {
                if let Some(record) = EventRecord::latest(resource) {
                    self.sink.record(&record);
                }
                Ok(state)
            }
            Err(err) => {
                debug!(
                    resource = %name,
                    event = %event,
                    error = %err,
                    "Rejected lifecycle event"
                );
                Err(err.into())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name.trim())
    }

    /// Every resource in creation order, deleted ones included.
    pub fn list_all(&self) -> Vec<&Resource> {
        self.resources.values().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resources.contains_key(name.trim())
    }

    pub fn list(&self, include_deleted: bool) -> Vec<&Resource> {
        self.resources
            .values()
            .filter(|resource| include_deleted || !resource.is_deleted())
            .collect()
    }

    pub fn names(&self, include_deleted: bool) -> Vec<&str> {
        self.list(include_deleted)
            .into_iter()
            .map(Resource::name)
            .collect()
    }

    pub fn count(&self, include_deleted: bool) -> usize {
        self.resources
            .values()
            .filter(|resource| include_deleted || !resource.is_deleted())
            .count()
    }

    pub fn available_types(&self) -> Vec<&'static str> {
        self.factory.available_types()
    }

    /// Every violation `raw` would hit for `tag`, without creating anything.
    pub fn diagnose(&self, tag: &str, raw: &RawConfig) -> Result<Vec<ValidationError>> {
        self.factory.diagnose(tag, raw)
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Pretty JSON of [`list_all`](Self::list_all), secrets masked.
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.list_all())
    }
}
