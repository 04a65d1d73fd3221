//! Quality tiers for bank items.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One of the three independent stock tiers an item can be held in.
///
/// An item "has" a quality iff the corresponding stock counter is above
/// zero. Raw is the tradeable default when a request names no tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Raw,
    Enchanted,
    Legendary,
}

impl Quality {
    /// All tiers, lowest first.
    pub fn all() -> &'static [Quality] {
        &[Self::Raw, Self::Enchanted, Self::Legendary]
    }

    /// Convert to the lowercase wire/key form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Enchanted => "enchanted",
            Self::Legendary => "legendary",
        }
    }

    /// Display name with canonical casing.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Raw => "Raw",
            Self::Enchanted => "Enchanted",
            Self::Legendary => "Legendary",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Quality {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "enchanted" => Ok(Self::Enchanted),
            "legendary" => Ok(Self::Legendary),
            other => Err(DomainError::parse(format!("Unknown quality: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Enchanted".parse::<Quality>().unwrap(), Quality::Enchanted);
        assert_eq!("LEGENDARY".parse::<Quality>().unwrap(), Quality::Legendary);
        assert!("mythic".parse::<Quality>().is_err());
    }

    #[test]
    fn round_trips_through_as_str() {
        for quality in Quality::all() {
            assert_eq!(quality.as_str().parse::<Quality>().unwrap(), *quality);
        }
    }
}
