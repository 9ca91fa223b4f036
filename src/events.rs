//! Lifecycle event records and the sinks that receive them.
//!
//! The registry emits one [`EventRecord`] per successful mutation. Rejected
//! operations never reach a sink.

use crate::lifecycle::{LifecycleEvent, ResourceState};
use crate::resources::{Region, Resource, ResourceKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// What happened to a resource, and what it looked like afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub timestamp: DateTime<Utc>,
    pub resource_name: String,
    pub resource_type: ResourceKind,
    pub event: LifecycleEvent,
    pub resulting_state: ResourceState,
    pub previous_state: Option<ResourceState>,
    pub region: Option<Region>,
    /// `key=value` rendering of the config, secrets masked.
    pub config_summary: String,
}

impl EventRecord {
    /// Describe the latest history entry of `resource`.
    pub fn latest(resource: &Resource) -> Option<Self> {
        let transition = resource.history().last()?;
        Some(Self {
            timestamp: transition.timestamp,
            resource_name: resource.name().to_string(),
            resource_type: resource.kind(),
            event: transition.event,
            resulting_state: transition.to,
            previous_state: transition.from,
            region: resource.config().region(),
            config_summary: resource.config().summary(),
        })
    }

    /// A start out of `Stopped`.
    pub fn is_restart(&self) -> bool {
        self.event == LifecycleEvent::Start
            && self.previous_state == Some(ResourceState::Stopped)
    }

    /// Short human-readable description of the change.
    pub fn action(&self) -> String {
        let region = self
            .region
            .map_or("unknown region".to_string(), |r| r.to_string());

        match (self.event, self.previous_state) {
            (LifecycleEvent::Create, _) => "created".to_string(),
            (LifecycleEvent::Start, Some(ResourceState::Stopped)) => {
                format!("restarted in {region}")
            }
            (LifecycleEvent::Start, _) => format!("started in {region}"),
            (LifecycleEvent::Stop, _) => "stopped".to_string(),
            (LifecycleEvent::Delete, Some(ResourceState::Created)) => {
                "marked as deleted (unused)".to_string()
            }
            (LifecycleEvent::Delete, _) => "marked as deleted".to_string(),
        }
    }
}

/// Receiver for lifecycle events.
pub trait EventSink {
    fn record(&mut self, record: &EventRecord);
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    fn record(&mut self, record: &EventRecord) {
        (**self).record(record)
    }
}

/// Emits each record as a structured `tracing` event at INFO.
#[derive(Clone, Copy, Debug)]
pub struct TracingSink {
    include_config: bool,
}

impl TracingSink {
    pub fn new(include_config: bool) -> Self {
        Self { include_config }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EventSink for TracingSink {
    fn record(&mut self, record: &EventRecord) {
        let action = record.action();
        if self.include_config {
            info!(
                resource = %record.resource_name,
                resource_type = %record.resource_type,
                event = %record.event,
                state = %record.resulting_state,
                config = %record.config_summary,
                "{}: {}",
                record.resource_type,
                action
            );
        } else {
            info!(
                resource = %record.resource_name,
                resource_type = %record.resource_type,
                event = %record.event,
                state = %record.resulting_state,
                "{}: {}",
                record.resource_type,
                action
            );
        }
    }
}

/// Keeps every record in arrival order.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    records: Vec<EventRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn for_type(&self, kind: ResourceKind) -> Vec<&EventRecord> {
        self.records
            .iter()
            .filter(|record| record.resource_type == kind)
            .collect()
    }

    /// The last `n` records, oldest first.
    pub fn tail(&self, n: usize) -> &[EventRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl EventSink for MemorySink {
    fn record(&mut self, record: &EventRecord) {
        self.records.push(record.clone());
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _record: &EventRecord) {}
}
