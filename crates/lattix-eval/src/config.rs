//! Evaluation configuration.

use serde::{Deserialize, Serialize};

use crate::fact::CorruptionSide;

/// Cut-off used when no `k` is given.
pub const DEFAULT_K: usize = 10;

/// Which corruption sides an evaluation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideSelection {
    /// Subject then object, ranks pooled.
    #[default]
    Both,
    /// Head prediction only.
    Subject,
    /// Tail prediction only.
    Object,
}

impl SideSelection {
    /// Sides to evaluate, in order.
    pub fn sides(self) -> &'static [CorruptionSide] {
        match self {
            Self::Both => &CorruptionSide::BOTH,
            Self::Subject => &[CorruptionSide::Subject],
            Self::Object => &[CorruptionSide::Object],
        }
    }
}

impl From<CorruptionSide> for SideSelection {
    fn from(side: CorruptionSide) -> Self {
        match side {
            CorruptionSide::Subject => Self::Subject,
            CorruptionSide::Object => Self::Object,
        }
    }
}

/// Evaluation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Hits@k cut-off: a rank counts as a hit when `rank < k` (default: 10).
    pub k: usize,
    /// Corruption sides to evaluate (default: both).
    pub sides: SideSelection,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            sides: SideSelection::Both,
        }
    }
}

impl EvalConfig {
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_sides(mut self, sides: impl Into<SideSelection>) -> Self {
        self.sides = sides.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = EvalConfig::default();
        assert_eq!(c.k, 10);
        assert_eq!(c.sides.sides(), &[CorruptionSide::Subject, CorruptionSide::Object]);
    }

    #[test]
    fn test_builder() {
        let c = EvalConfig::default().with_k(3).with_sides(CorruptionSide::Object);
        assert_eq!(c.k, 3);
        assert_eq!(c.sides, SideSelection::Object);
        assert_eq!(c.sides.sides(), &[CorruptionSide::Object]);
    }

    #[test]
    fn test_partial_config_from_json() {
        let c: EvalConfig = serde_json::from_str(r#"{"sides": "subject"}"#).unwrap();
        assert_eq!(c.k, DEFAULT_K);
        assert_eq!(c.sides, SideSelection::Subject);
    }
}
