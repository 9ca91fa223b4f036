//! AppService: a hosted web application with a fixed number of replicas.

use crate::validation::{
    all, check, choice_display, require_choice, require_int, Choice, Diagnosis, RawConfig,
    ValidationError,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Runtime {
    Python,
    NodeJs,
    DotNet,
}

impl Choice for Runtime {
    const ALL: &'static [Self] = &[Self::Python, Self::NodeJs, Self::DotNet];
    const NAMES: &'static [&'static str] = &["python", "nodejs", "dotnet"];
    const IGNORE_CASE: bool = true;

    fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::NodeJs => "nodejs",
            Self::DotNet => "dotnet",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    EastUs,
    WestEurope,
    CentralIndia,
}

impl Choice for Region {
    const ALL: &'static [Self] = &[Self::EastUs, Self::WestEurope, Self::CentralIndia];
    const NAMES: &'static [&'static str] = &["EastUS", "WestEurope", "CentralIndia"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::EastUs => "EastUS",
            Self::WestEurope => "WestEurope",
            Self::CentralIndia => "CentralIndia",
        }
    }
}

choice_display!(Runtime, Region);

/// Validated AppService configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppServiceConfig {
    pub runtime: Runtime,
    pub region: Region,
    pub replicas: u8,
}

impl AppServiceConfig {
    pub const REPLICAS: std::ops::RangeInclusive<i64> = 1..=3;

    /// Validate fields in order runtime, region, replicas; the first
    /// violation wins.
    pub fn validate(raw: &RawConfig) -> Result<Self, ValidationError> {
        let runtime = require_choice::<Runtime>(raw, "runtime")?;
        let region = require_choice::<Region>(raw, "region")?;
        let replicas = require_int(raw, "replicas", Self::REPLICAS)? as u8;

        Ok(Self {
            runtime,
            region,
            replicas,
        })
    }

    /// Check every field and keep all violations.
    pub fn diagnose(raw: &RawConfig) -> Diagnosis {
        all(vec![
            check(require_choice::<Runtime>(raw, "runtime")),
            check(require_choice::<Region>(raw, "region")),
            check(require_int(raw, "replicas", Self::REPLICAS)),
        ])
    }

    pub fn summary(&self) -> String {
        format!(
            "region={}, runtime={}, replicas={}",
            self.region, self.runtime, self.replicas
        )
    }
}
