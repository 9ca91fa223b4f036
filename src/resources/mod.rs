//! Simulated cloud resources.
//!
//! The set of resource types is closed: [`ResourceKind`] names them and
//! [`ResourceConfig`] carries the validated configuration of each. Every
//! [`Resource`] embeds the same lifecycle machine regardless of its type.

mod app_service;
mod cache_db;
mod storage_account;

pub use app_service::{AppServiceConfig, Region, Runtime};
pub use cache_db::{CacheDbConfig, EvictionPolicy};
pub use storage_account::{mask_key, StorageAccountConfig};

use crate::core::{StateHistory, StateMachine};
use crate::lifecycle::{LifecycleEvent, ResourceState, TransitionError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The resource types the engine knows how to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    AppService,
    StorageAccount,
    #[serde(rename = "CacheDB")]
    CacheDb,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [Self::AppService, Self::StorageAccount, Self::CacheDb];

    /// Type tag as typed by an operator.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::AppService => "AppService",
            Self::StorageAccount => "StorageAccount",
            Self::CacheDb => "CacheDB",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Validated, type-specific configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResourceConfig {
    AppService(AppServiceConfig),
    StorageAccount(StorageAccountConfig),
    CacheDb(CacheDbConfig),
}

impl ResourceConfig {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::AppService(_) => ResourceKind::AppService,
            Self::StorageAccount(_) => ResourceKind::StorageAccount,
            Self::CacheDb(_) => ResourceKind::CacheDb,
        }
    }

    /// Short `key=value` rendering with secrets masked.
    pub fn summary(&self) -> String {
        match self {
            Self::AppService(config) => config.summary(),
            Self::StorageAccount(config) => config.summary(),
            Self::CacheDb(config) => config.summary(),
        }
    }

    /// Deployment region, for types that have one.
    pub fn region(&self) -> Option<Region> {
        match self {
            Self::AppService(config) => Some(config.region),
            Self::StorageAccount(_) | Self::CacheDb(_) => None,
        }
    }
}

/// A simulated cloud resource and its lifecycle.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    name: String,
    kind: ResourceKind,
    config: ResourceConfig,
    created_at: DateTime<Utc>,
    lifecycle: StateMachine<ResourceState, LifecycleEvent>,
}

impl Resource {
    /// A fresh resource in `Created`, with the creation entry in its history.
    pub(crate) fn new(name: String, config: ResourceConfig) -> Self {
        Self {
            name,
            kind: config.kind(),
            config,
            created_at: Utc::now(),
            lifecycle: StateMachine::new(ResourceState::Created, LifecycleEvent::Create),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    pub fn state(&self) -> ResourceState {
        *self.lifecycle.current_state()
    }

    pub fn history(&self) -> &StateHistory<ResourceState, LifecycleEvent> {
        self.lifecycle.history()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_deleted(&self) -> bool {
        self.lifecycle.is_final()
    }

    /// Drive the lifecycle; only the registry calls this.
    pub(crate) fn apply(
        &mut self,
        event: LifecycleEvent,
    ) -> Result<ResourceState, TransitionError> {
        self.lifecycle.fire(event).copied()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' (State: {})", self.kind, self.name, self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::RawConfig;

    fn cache() -> Resource {
        let raw = RawConfig::new()
            .with("ttlSeconds", "300")
            .with("capacityMb", "256")
            .with("eviction", "LRU");
        let config = CacheDbConfig::validate(&raw).unwrap();
        Resource::new("cache1".into(), ResourceConfig::CacheDb(config))
    }

    #[test]
    fn tags_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ResourceKind::from_tag("cachedb"), None);
        assert_eq!(ResourceKind::from_tag("VirtualMachine"), None);
    }

    #[test]
    fn kind_serializes_as_tag() {
        assert_eq!(
            serde_json::to_string(&ResourceKind::CacheDb).unwrap(),
            "\"CacheDB\""
        );
        let parsed: ResourceKind = serde_json::from_str("\"StorageAccount\"").unwrap();
        assert_eq!(parsed, ResourceKind::StorageAccount);
    }

    #[test]
    fn config_reports_kind_and_region() {
        let raw = RawConfig::new()
            .with("runtime", "python")
            .with("region", "EastUS")
            .with("replicas", "1");

        let config = ResourceConfig::AppService(AppServiceConfig::validate(&raw).unwrap());
        assert_eq!(config.kind(), ResourceKind::AppService);
        assert_eq!(config.region(), Some(Region::EastUs));
        assert_eq!(config.summary(), "region=EastUS, runtime=python, replicas=1");
    }

    #[test]
    fn new_resource_starts_created() {
        let resource = cache();

        assert_eq!(resource.name(), "cache1");
        assert_eq!(resource.kind(), ResourceKind::CacheDb);
        assert_eq!(resource.state(), ResourceState::Created);
        assert!(!resource.is_deleted());
        assert_eq!(resource.history().len(), 1);
        assert_eq!(resource.config().region(), None);
        assert_eq!(resource.to_string(), "CacheDB 'cache1' (State: Created)");
    }

    #[test]
    fn apply_runs_through_lifecycle() {
        let mut resource = cache();

        assert_eq!(resource.apply(LifecycleEvent::Start), Ok(ResourceState::Started));
        assert_eq!(
            resource.apply(LifecycleEvent::Delete),
            Err(TransitionError::MustStopFirst)
        );
        assert_eq!(resource.apply(LifecycleEvent::Stop), Ok(ResourceState::Stopped));
        assert_eq!(resource.apply(LifecycleEvent::Delete), Ok(ResourceState::Deleted));

        assert!(resource.is_deleted());
        assert_eq!(resource.history().len(), 4);
    }

    #[test]
    fn snapshot_json_masks_secrets() {
        let raw = RawConfig::new()
            .with("encryption", "yes")
            .with("accessKey", "topsecretkey")
            .with("sizeGb", "10");
        let config = StorageAccountConfig::validate(&raw).unwrap();
        let resource = Resource::new("store1".into(), ResourceConfig::StorageAccount(config));

        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["name"], "store1");
        assert_eq!(json["kind"], "StorageAccount");
        assert_eq!(json["config"]["accessKey"], "top***key");
        assert_eq!(json["lifecycle"]["current"], "Created");
        assert!(!json.to_string().contains("topsecretkey"));
    }
}
