//! Business verticals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A business vertical. Selects the default content set and the family of
/// compatible templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Niche {
    Cleaning,
    Landscaping,
}

impl Niche {
    /// Niche used when a config names none that is known.
    pub const FALLBACK: Niche = Niche::Cleaning;

    pub const ALL: [Niche; 2] = [Niche::Cleaning, Niche::Landscaping];

    pub fn as_str(self) -> &'static str {
        match self {
            Niche::Cleaning => "cleaning",
            Niche::Landscaping => "landscaping",
        }
    }
}

impl fmt::Display for Niche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown niche `{0}`")]
pub struct UnknownNiche(pub String);

impl FromStr for Niche {
    type Err = UnknownNiche;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Niche::ALL
            .into_iter()
            .find(|n| n.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownNiche(s.to_string()))
    }
}
