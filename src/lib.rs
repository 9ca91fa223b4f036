//! CloudConnect: an in-memory lifecycle engine for simulated cloud resources
//!
//! An operator creates typed resources, has their configuration validated,
//! and drives them through a fixed lifecycle. Nothing is provisioned; the
//! engine only enforces the rules a real control plane would.
//!
//! # Core Concepts
//!
//! - **Resource types**: a closed set (`AppService`, `StorageAccount`,
//!   `CacheDB`), each with its own validator
//! - **Lifecycle**: `Created → Started ⇄ Stopped → Deleted`, driven by a
//!   generic state machine with an append-only history
//! - **Registry**: owns every resource, keeps names unique forever and
//!   reports each successful change to an event sink
//!
//! # Example
//!
//! ```rust
//! use cloudconnect::{Error, MemorySink, RawConfig, Registry, ResourceFactory, ResourceState};
//! use cloudconnect::TransitionError;
//!
//! let mut registry = Registry::with_sink(ResourceFactory::default(), MemorySink::new());
//!
//! let raw = RawConfig::new()
//!     .with("ttlSeconds", "300")
//!     .with("capacityMb", "256")
//!     .with("eviction", "LRU");
//! registry.create_resource("CacheDB", "cache1", &raw).unwrap();
//!
//! let err = registry.stop_resource("cache1").unwrap_err();
//! assert_eq!(err, Error::Transition(TransitionError::NotStarted));
//! assert_eq!(registry.get("cache1").unwrap().state(), ResourceState::Created);
//! assert_eq!(registry.sink().len(), 1);
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod factory;
pub mod lifecycle;
pub mod registry;
pub mod resources;
pub mod validation;

// Re-export commonly used types
pub use catalog::Catalog;
pub use config::{ConfigError, EngineConfig};
pub use error::{Error, Result};
pub use events::{EventRecord, EventSink, MemorySink, NullSink, TracingSink};
pub use factory::ResourceFactory;
pub use lifecycle::{LifecycleEvent, ResourceState, TransitionError};
pub use registry::Registry;
pub use resources::{Resource, ResourceConfig, ResourceKind};
pub use validation::{RawConfig, ValidationError, Violation};
