//! CacheDB: an in-memory cache with expiry and an eviction policy.

use crate::validation::{
    all, check, choice_display, require_choice, require_int, Choice, Diagnosis, RawConfig,
    ValidationError,
};
use serde::Serialize;

/// How entries are dropped once the cache is full.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EvictionPolicy {
    /// Least recently used
    Lru,
    /// First in, first out
    Fifo,
    /// Least frequently used
    Lfu,
}

impl Choice for EvictionPolicy {
    const ALL: &'static [Self] = &[Self::Lru, Self::Fifo, Self::Lfu];
    const NAMES: &'static [&'static str] = &["LRU", "FIFO", "LFU"];
    const IGNORE_CASE: bool = true;

    fn as_str(&self) -> &'static str {
        match self {
            Self::Lru => "LRU",
            Self::Fifo => "FIFO",
            Self::Lfu => "LFU",
        }
    }
}

choice_display!(EvictionPolicy);

/// Validated CacheDB configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheDbConfig {
    pub ttl_seconds: u32,
    pub capacity_mb: u32,
    pub eviction: EvictionPolicy,
}

impl CacheDbConfig {
    /// One minute to one day.
    pub const TTL_SECONDS: std::ops::RangeInclusive<i64> = 60..=86_400;
    /// 128 MB to 16 GB.
    pub const CAPACITY_MB: std::ops::RangeInclusive<i64> = 128..=16_384;

    /// Validate fields in order ttlSeconds, capacityMb, eviction; the first
    /// violation wins.
    pub fn validate(raw: &RawConfig) -> Result<Self, ValidationError> {
        let ttl_seconds = require_int(raw, "ttlSeconds", Self::TTL_SECONDS)? as u32;
        let capacity_mb = require_int(raw, "capacityMb", Self::CAPACITY_MB)? as u32;
        let eviction = require_choice::<EvictionPolicy>(raw, "eviction")?;

        Ok(Self {
            ttl_seconds,
            capacity_mb,
            eviction,
        })
    }

    /// Check every field and keep all violations.
    pub fn diagnose(raw: &RawConfig) -> Diagnosis {
        all(vec![
            check(require_int(raw, "ttlSeconds", Self::TTL_SECONDS)),
            check(require_int(raw, "capacityMb", Self::CAPACITY_MB)),
            check(require_choice::<EvictionPolicy>(raw, "eviction")),
        ])
    }

    pub fn summary(&self) -> String {
        format!(
            "ttlSeconds={}, capacityMb={}, eviction={}",
            self.ttl_seconds, self.capacity_mb, self.eviction
        )
    }
}
