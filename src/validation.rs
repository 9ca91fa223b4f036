//! Raw operator input and the field-level checks shared by every validator.
//!
//! Operators type configuration as text. Each validator pulls fields out
//! of a [`RawConfig`] with the `require_*` helpers below, which turn bad
//! text into a [`ValidationError`] naming the field instead of a generic
//! parse failure.

use std::collections::BTreeMap;
use std::fmt;
use std::num::IntErrorKind;
use std::ops::RangeInclusive;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Unvalidated configuration: field name to the text the operator typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawConfig {
    fields: BTreeMap<String, String>,
}

impl RawConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Value for `field` with surrounding whitespace removed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(|v| v.trim())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut raw = RawConfig::new();
        for (field, value) in iter {
            raw.insert(field, value);
        }
        raw
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Missing,
    NotANumber { value: String },
    NotABoolean { value: String },
    NotAllowed {
        value: String,
        allowed: &'static [&'static str],
    },
    OutOfRange { value: i64, min: i64, max: i64 },
    TooShort { min: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("missing"),
            Self::NotANumber { value } => write!(f, "'{value}' is not a number"),
            Self::NotABoolean { value } => write!(f, "'{value}' is not yes/no"),
            Self::NotAllowed { value, allowed } => {
                write!(f, "'{value}' not one of {}", allowed.join(", "))
            }
            Self::OutOfRange { value, min, max } => {
                write!(f, "{value} outside [{min}, {max}]")
            }
            Self::TooShort { min } => write!(f, "length < {min}"),
        }
    }
}

/// A raw configuration violated a field constraint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: Violation,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: Violation) -> Self {
        Self { field, reason }
    }
}

/// Every violation found in one configuration.
pub type Diagnosis = Validation<(), NonEmptyVec<ValidationError>>;

/// Lift a single field check into an accumulating [`Diagnosis`].
pub(crate) fn check<T>(result: Result<T, ValidationError>) -> Diagnosis {
    match result {
        Ok(_) => Validation::success(()),
        Err(err) => Validation::fail(err),
    }
}

/// Combine field checks so that every failure is kept.
pub(crate) fn all(checks: Vec<Diagnosis>) -> Diagnosis {
    Validation::all_vec(checks).map(|_| ())
}

/// Flatten a diagnosis into the list of violations (empty when valid).
pub fn violations(diagnosis: &Diagnosis) -> Vec<ValidationError> {
    match diagnosis {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}

pub(crate) fn require<'a>(
    raw: &'a RawConfig,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    raw.get(field)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ValidationError::new(field, Violation::Missing))
}

/// A closed set of values an operator picks by name.
pub trait Choice: Copy + 'static {
    /// Every value, in the same order as [`Choice::NAMES`].
    const ALL: &'static [Self];
    /// Canonical spelling of each value.
    const NAMES: &'static [&'static str];
    /// Accept any casing of a name.
    const IGNORE_CASE: bool = false;

    fn as_str(&self) -> &'static str;
}

/// `Display` and `Serialize` for [`Choice`] types, both via `as_str`.
macro_rules! choice_display {
    ($($ty:ty),* $(,)?) => {$(
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::validation::Choice::as_str(self))
            }
        }

        impl ::serde::Serialize for $ty {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::validation::Choice::as_str(self))
            }
        }
    )*};
}

pub(crate) use choice_display;

/// Field must name one of `C`'s values.
pub(crate) fn require_choice<C: Choice>(
    raw: &RawConfig,
    field: &'static str,
) -> Result<C, ValidationError> {
    let value = require(raw, field)?;
    C::NAMES
        .iter()
        .position(|name| {
            if C::IGNORE_CASE {
                name.eq_ignore_ascii_case(value)
            } else {
                *name == value
            }
        })
        .map(|index| C::ALL[index])
        .ok_or_else(|| {
            ValidationError::new(
                field,
                Violation::NotAllowed {
                    value: value.to_string(),
                    allowed: C::NAMES,
                },
            )
        })
}

pub(crate) fn require_int(
    raw: &RawConfig,
    field: &'static str,
    bounds: RangeInclusive<i64>,
) -> Result<i64, ValidationError> {
    let text = require(raw, field)?;
    // Digits too long for i64 are still a number, clamped to the side they overflow.
    let value = match text.parse::<i64>() {
        Ok(value) => value,
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => {
                return Err(ValidationError::new(
                    field,
                    Violation::NotANumber {
                        value: text.to_string(),
                    },
                ));
            }
        },
    };

    if bounds.contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::new(
            field,
            Violation::OutOfRange {
                value,
                min: *bounds.start(),
                max: *bounds.end(),
            },
        ))
    }
}

pub(crate) fn require_bool(raw: &RawConfig, field: &'static str) -> Result<bool, ValidationError> {
    let text = require(raw, field)?;
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" => Ok(true),
        "false" | "no" | "n" => Ok(false),
        _ => Err(ValidationError::new(
            field,
            Violation::NotABoolean {
                value: text.to_string(),
            },
        )),
    }
}

pub(crate) fn require_min_len(
    raw: &RawConfig,
    field: &'static str,
    min: usize,
) -> Result<String, ValidationError> {
    let value = raw
        .get(field)
        .ok_or_else(|| ValidationError::new(field, Violation::Missing))?;
    if value.chars().count() < min {
        return Err(ValidationError::new(field, Violation::TooShort { min }));
    }
    Ok(value.to_string())
}
