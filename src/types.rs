//! Shared data structures for the adaptation core.

use std::fmt;
use std::str::FromStr;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{AdaptError, AdaptResult};

/// Default cost of deleting one symbol.
pub const DEFAULT_DELETION_WEIGHT: u32 = 100;
/// Default cost of inserting one symbol.
pub const DEFAULT_INSERTION_WEIGHT: u32 = 49;

/// Asymmetric insertion/deletion costs.
///
/// Two insertions must always be cheaper than one deletion, so
/// `deletion > 2 * insertion` is enforced by [`CostWeights::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostWeights {
    pub deletion: u32,
    pub insertion: u32,
}

impl CostWeights {
    pub fn new(deletion: u32, insertion: u32) -> AdaptResult<Self> {
        let weights = Self {
            deletion,
            insertion,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Check the threshold principle.
    pub fn validate(&self) -> AdaptResult<()> {
        if self.insertion == 0 || u64::from(self.deletion) <= 2 * u64::from(self.insertion) {
            return Err(AdaptError::InvalidWeights {
                deletion: self.deletion,
                insertion: self.insertion,
            });
        }
        Ok(())
    }
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            deletion: DEFAULT_DELETION_WEIGHT,
            insertion: DEFAULT_INSERTION_WEIGHT,
        }
    }
}

/// Edit operation in a symbol-level alignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditOp {
    Keep(String),
    Insert(String),
    Delete(String),
    Substitute(String, String),
}

impl EditOp {
    /// Number of source symbols this operation consumes.
    pub fn consumes(&self) -> usize {
        match self {
            EditOp::Insert(_) => 0,
            EditOp::Keep(_) | EditOp::Delete(_) | EditOp::Substitute(_, _) => 1,
        }
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOp::Keep(s) => write!(f, "keep {s}"),
            EditOp::Insert(s) => write!(f, "insert {s}"),
            EditOp::Delete(s) => write!(f, "delete {s}"),
            EditOp::Substitute(from, to) => write!(f, "substitute {from} by {to}"),
        }
    }
}

impl FromStr for EditOp {
    type Err = AdaptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AdaptError::InvalidEditOp(s.to_string());
        let (verb, rest) = s.trim().split_once(' ').ok_or_else(invalid)?;
        if rest.is_empty() {
            return Err(invalid());
        }

        match verb {
            "keep" => Ok(EditOp::Keep(rest.to_string())),
            "insert" => Ok(EditOp::Insert(rest.to_string())),
            "delete" => Ok(EditOp::Delete(rest.to_string())),
            "substitute" => {
                let (from, to) = rest.split_once(" by ").ok_or_else(invalid)?;
                Ok(EditOp::Substitute(from.to_string(), to.to_string()))
            }
            _ => Err(invalid()),
        }
    }
}

/// One position of a word skeleton together with its ranked fillers.
///
/// `alternatives` is ordered by descending attestation. An empty string
/// alternative stands for deletion of the position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub source: String,
    pub alternatives: Vec<String>,
}

impl Slot {
    pub fn new(source: impl Into<String>, alternatives: Vec<String>) -> Self {
        Self {
            source: source.into(),
            alternatives,
        }
    }
}

pub type CandidatePool = Vec<Slot>;

/// Source symbol to target symbols, most frequent first.
pub type CorrespondenceDict = AHashMap<String, Vec<String>>;

/// Attestation counts keyed by `source + connector + target`.
pub type FrequencyTable = AHashMap<String, f64>;

/// How many values to draw along each combinatorial axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    /// Substitution combinations per skeleton (x).
    pub substitutions: usize,
    /// Phonotactic target structures (y).
    pub structures: usize,
    /// Repair paths per structure (z).
    pub paths: usize,
}

impl AllocationPlan {
    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.substitutions, self.structures, self.paths)
    }
}

/// Result of running the adaptation pipeline on one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Candidates(Vec<String>),
    /// A symbol has no documented correspondence.
    Undocumented(String),
    NoCandidates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_hold_threshold() {
        let w = CostWeights::default();
        assert!(w.deletion > 2 * w.insertion);
        assert!(w.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert!(CostWeights::new(98, 49).is_err());
        assert!(CostWeights::new(10, 0).is_err());
        assert!(CostWeights::new(99, 49).is_ok());
    }

    #[test]
    fn test_editop_display_parse() {
        let ops = [
            EditOp::Keep("ó".into()),
            EditOp::Insert("V".into()),
            EditOp::Delete("C".into()),
            EditOp::Substitute("l".into(), "h".into()),
        ];
        for op in ops {
            assert_eq!(op.to_string().parse::<EditOp>().unwrap(), op);
        }
        assert_eq!(
            EditOp::Substitute("l".into(), "h".into()).to_string(),
            "substitute l by h"
        );
    }

    #[test]
    fn test_editop_parse_errors() {
        assert!("keep".parse::<EditOp>().is_err());
        assert!("swap a".parse::<EditOp>().is_err());
        assert!("substitute a".parse::<EditOp>().is_err());
    }
}
