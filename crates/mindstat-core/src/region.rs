use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// World region a country belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Americas,
    Europe,
    Asia,
    Oceania,
    Africa,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Americas,
        Region::Europe,
        Region::Asia,
        Region::Oceania,
        Region::Africa,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Americas => "americas",
            Region::Europe => "europe",
            Region::Asia => "asia",
            Region::Oceania => "oceania",
            Region::Africa => "africa",
        }
    }
}

impl FromStr for Region {
    type Err = Error;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        Region::ALL
            .into_iter()
            .find(|region| region.as_str() == normalized)
            .ok_or_else(|| Error::UnknownRegion(value.to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_regions_case_insensitively() {
        assert_eq!("Europe".parse::<Region>(), Ok(Region::Europe));
        assert_eq!(" AFRICA ".parse::<Region>(), Ok(Region::Africa));
        assert_eq!(
            "atlantis".parse::<Region>(),
            Err(Error::UnknownRegion("atlantis".to_string()))
        );
    }

    #[test]
    fn global_is_not_a_region() {
        assert!("global".parse::<Region>().is_err());
    }
}
