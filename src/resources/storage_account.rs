//! StorageAccount: encrypted-or-not blob storage guarded by an access key.

use crate::validation::{
    all, check, require_bool, require_int, require_min_len, Diagnosis, RawConfig,
    ValidationError,
};
use serde::{Serialize, Serializer};
use std::fmt;

/// Validated StorageAccount configuration.
///
/// The access key never leaves this type unmasked except through
/// [`StorageAccountConfig::access_key`]; `Debug` and `Serialize` both mask it.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageAccountConfig {
    pub encryption: bool,
    #[serde(serialize_with = "serialize_masked")]
    access_key: String,
    pub size_gb: u32,
}

impl StorageAccountConfig {
    pub const MIN_KEY_LENGTH: usize = 8;
    pub const SIZE_GB: std::ops::RangeInclusive<i64> = 1..=10_000;

    /// Validate fields in order encryption, accessKey, sizeGb; the first
    /// violation wins.
    pub fn validate(raw: &RawConfig) -> Result<Self, ValidationError> {
        let encryption = require_bool(raw, "encryption")?;
        let access_key = require_min_len(raw, "accessKey", Self::MIN_KEY_LENGTH)?;
        let size_gb = require_int(raw, "sizeGb", Self::SIZE_GB)? as u32;

        Ok(Self {
            encryption,
            access_key,
            size_gb,
        })
    }

    /// Check every field and keep all violations.
    pub fn diagnose(raw: &RawConfig) -> Diagnosis {
        all(vec![
            check(require_bool(raw, "encryption")),
            check(require_min_len(raw, "accessKey", Self::MIN_KEY_LENGTH)),
            check(require_int(raw, "sizeGb", Self::SIZE_GB)),
        ])
    }

    /// The secret key, unmasked.
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn masked_access_key(&self) -> String {
        mask_key(&self.access_key)
    }

    pub fn summary(&self) -> String {
        format!(
            "encryption={}, accessKey={}, sizeGb={}",
            self.encryption,
            self.masked_access_key(),
            self.size_gb
        )
    }
}

impl fmt::Debug for StorageAccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageAccountConfig")
            .field("encryption", &self.encryption)
            .field("access_key", &self.masked_access_key())
            .field("size_gb", &self.size_gb)
            .finish()
    }
}

/// Keep the first and last three characters; short keys are hidden entirely.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 6 {
        return "***".to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 3..].iter().collect();
    format!("{head}***{tail}")
}

fn serialize_masked<S: Serializer>(key: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&mask_key(key))
}
