use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A resolved canvas font, rendered as the CSS shorthand `"<weight> <size>px <family>"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub weight: String,
    pub size: f64,
    pub family: String,
}

impl FontSpec {
    pub fn new(weight: impl Into<String>, size: f64, family: impl Into<String>) -> Self {
        Self {
            weight: weight.into(),
            size,
            family: family.into(),
        }
    }

    pub fn with_size(&self, size: f64) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}px {}", self.weight, self.size, self.family)
    }
}

impl FromStr for FontSpec {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidFont(input.to_string());
        let trimmed = input.trim();
        let (weight, rest) = trimmed.split_once(char::is_whitespace).ok_or_else(invalid)?;
        let rest = rest.trim_start();
        let (size, family) = rest.split_once(char::is_whitespace).ok_or_else(invalid)?;
        let size = size
            .strip_suffix("px")
            .and_then(|raw| raw.parse::<f64>().ok())
            .ok_or_else(invalid)?;
        let family = family.trim();
        if family.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(weight, size, family))
    }
}
