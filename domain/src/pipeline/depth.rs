//! Pipeline depth value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Number of model stages the linear pipeline runs after validation
///
/// | Depth | Stages |
/// |-------|--------|
/// | 1 | Expansion |
/// | 2 | Expansion, Critique |
/// | 3 | Expansion, Critique, Refinement |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Depth {
    Expand = 1,
    Critique = 2,
    Full = 3,
}

impl Depth {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether the critique stage runs at this depth
    pub fn includes_critique(self) -> bool {
        self >= Depth::Critique
    }

    /// Whether the refinement stage runs at this depth
    pub fn includes_refinement(self) -> bool {
        self == Depth::Full
    }
}

impl Default for Depth {
    fn default() -> Self {
        Depth::Full
    }
}

impl TryFrom<u8> for Depth {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Depth::Expand),
            2 => Ok(Depth::Critique),
            3 => Ok(Depth::Full),
            other => Err(DomainError::InvalidDepth(other.to_string())),
        }
    }
}

impl From<Depth> for u8 {
    fn from(depth: Depth) -> Self {
        depth.as_u8()
    }
}

impl std::str::FromStr for Depth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| DomainError::InvalidDepth(s.to_string()))
            .and_then(Depth::try_from)
    }
}

impl std::fmt::Display for Depth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_full() {
        assert_eq!(Depth::default(), Depth::Full);
    }

    #[test]
    fn test_parse() {
        assert_eq!("1".parse::<Depth>().unwrap(), Depth::Expand);
        assert_eq!(" 2 ".parse::<Depth>().unwrap(), Depth::Critique);
        assert_eq!(
            "4".parse::<Depth>(),
            Err(DomainError::InvalidDepth("4".to_string()))
        );
        assert!("deep".parse::<Depth>().is_err());
        assert!(Depth::try_from(0).is_err());
    }

    #[test]
    fn test_stage_inclusion() {
        assert!(!Depth::Expand.includes_critique());
        assert!(Depth::Critique.includes_critique());
        assert!(!Depth::Critique.includes_refinement());
        assert!(Depth::Full.includes_refinement());
    }

    #[test]
    fn test_serde_as_number() {
        assert_eq!(serde_json::to_string(&Depth::Critique).unwrap(), "2");
        let depth: Depth = serde_json::from_str("3").unwrap();
        assert_eq!(depth, Depth::Full);
        assert!(serde_json::from_str::<Depth>("9").is_err());
    }
}
