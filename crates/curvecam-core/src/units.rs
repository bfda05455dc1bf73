//! Machine units
//!
//! A program may select one unit from a fixed set. Unit names coming from
//! configuration are validated here so a bad value fails as early as possible.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit of length selected for the generated program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Millimeters
    #[serde(rename = "mm")]
    Millimeters,
    /// Inches
    #[serde(rename = "in")]
    Inches,
}

impl Unit {
    /// Every supported unit
    pub const ALL: [Unit; 2] = [Unit::Millimeters, Unit::Inches];

    /// Short name used in configuration ("mm" or "in")
    pub fn name(&self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Inches => "in",
        }
    }

    /// Comma separated list of valid unit names
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|u| u.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Validate an optional unit name; `None` means "leave the machine default"
    pub fn parse_optional(name: Option<&str>) -> Result<Option<Self>, Error> {
        name.map(str::parse).transpose()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mm" => Ok(Self::Millimeters),
            "in" => Ok(Self::Inches),
            _ => Err(Error::InvalidUnit {
                unit: s.to_string(),
                valid: Self::valid_names(),
            }),
        }
    }
}
