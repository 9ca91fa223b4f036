//! The table of resource types the factory can build.
//!
//! A [`Catalog`] is assembled once at startup, either with every known type
//! or from an [`EngineConfig`], and handed to the factory. Nothing registers
//! itself behind the scenes; adding a type means adding a `ResourceKind`
//! variant and the compiler points at the match below.

use crate::config::{ConfigError, EngineConfig};
use crate::resources::{
    AppServiceConfig, CacheDbConfig, ResourceConfig, ResourceKind, StorageAccountConfig,
};
use crate::validation::{Diagnosis, RawConfig, ValidationError};

/// Validates raw input and wraps it in the matching [`ResourceConfig`] variant.
pub type Builder = fn(&RawConfig) -> Result<ResourceConfig, ValidationError>;

/// Checks every field of raw input without building anything.
pub type Diagnoser = fn(&RawConfig) -> Diagnosis;

/// One row of the catalog.
#[derive(Clone, Copy, Debug)]
pub struct CatalogEntry {
    pub kind: ResourceKind,
    pub build: Builder,
    pub diagnose: Diagnoser,
}

impl CatalogEntry {
    /// The built-in validator and constructor for `kind`.
    pub fn standard(kind: ResourceKind) -> Self {
        let (build, diagnose): (Builder, Diagnoser) = match kind {
            ResourceKind::AppService => (
                |raw: &RawConfig| {
                    AppServiceConfig::validate(raw).map(ResourceConfig::AppService)
                },
                AppServiceConfig::diagnose,
            ),
            ResourceKind::StorageAccount => (
                |raw: &RawConfig| {
                    StorageAccountConfig::validate(raw).map(ResourceConfig::StorageAccount)
                },
                StorageAccountConfig::diagnose,
            ),
            ResourceKind::CacheDb => (
                |raw: &RawConfig| {
                    CacheDbConfig::validate(raw).map(ResourceConfig::CacheDb)
                },
                CacheDbConfig::diagnose,
            ),
        };

        Self {
            kind,
            build,
            diagnose,
        }
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }
}

/// Ordered set of enabled resource types.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Every known resource type, in declaration order.
    pub fn standard() -> Self {
        Self::with_kinds(&ResourceKind::ALL)
    }

    /// Only the given types, in the given order. Repeats are ignored.
    pub fn with_kinds(kinds: &[ResourceKind]) -> Self {
        let mut entries: Vec<CatalogEntry> = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if !entries.iter().any(|entry| entry.kind == *kind) {
                entries.push(CatalogEntry::standard(*kind));
            }
        }
        Self { entries }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_kinds(&config.resource_types))
    }

    /// Find the entry for an operator-supplied type tag.
    pub fn lookup(&self, tag: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.tag() == tag)
    }

    pub fn kinds(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.entries.iter().map(|entry| entry.kind)
    }

    pub fn tags(&self) -> Vec<&'static str> {
        self.entries.iter().map(CatalogEntry::tag).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
