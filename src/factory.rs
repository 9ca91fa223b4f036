//! Builds typed resources from operator input.

use crate::catalog::Catalog;
use crate::config::{ConfigError, EngineConfig};
use crate::error::{Error, Result};
use crate::resources::Resource;
use crate::validation::{violations, RawConfig, ValidationError};

/// Validates raw configuration and constructs the matching resource.
///
/// The factory has no side effects beyond construction. Uniqueness and
/// storage are the registry's concern.
#[derive(Clone, Debug, Default)]
pub struct ResourceFactory {
    catalog: Catalog,
}

impl ResourceFactory {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn from_config(config: &EngineConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(Catalog::from_config(config)?))
    }

    /// Build a resource in `Created`.
    ///
    /// Checks run in order: type tag, then name, then the type's own
    /// validator. The first failure is returned unchanged.
    pub fn create(&self, tag: &str, name: &str, raw: &RawConfig) -> Result<Resource> {
        let entry = self
            .catalog
            .lookup(tag)
            .ok_or_else(|| Error::UnknownResourceType(tag.to_string()))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidName);
        }

        let config = (entry.build)(raw)?;
        Ok(Resource::new(name.to_string(), config))
    }

    /// Every violation in `raw` for the given type, empty when it would pass.
    pub fn diagnose(&self, tag: &str, raw: &RawConfig) -> Result<Vec<ValidationError>> {
        let entry = self
            .catalog
            .lookup(tag)
            .ok_or_else(|| Error::UnknownResourceType(tag.to_string()))?;

        Ok(violations(&(entry.diagnose)(raw)))
    }

    pub fn available_types(&self) -> Vec<&'static str> {
        self.catalog.tags()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
