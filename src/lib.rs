//! LangViz Adapt: loanword adaptation and proto-form reconstruction kernel.
//!
//! Provides:
//! - Insert/delete distance matrices and weighted edit graphs
//! - Shortest repair paths as readable edit operations, and their replay
//! - Budget allocation over substitutions, structures and repair paths
//! - Frequency-guided candidate expansion and lazy candidate generation
//!
//! Python bindings are available behind the `python` feature.

pub mod adapter;
pub mod allocate;
pub mod config;
pub mod editops;
pub mod error;
pub mod expand;
pub mod graph;
pub mod phonetic;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use adapter::{batch_adapt, profile_of, Adapter};
pub use allocate::allocate;
pub use config::{AdapterConfig, Mode};
pub use editops::{apply_ops, apply_ops_str, compute_repair_ops, editops, editops_str, translate};
pub use error::{AdaptError, AdaptResult};
pub use expand::{expand_candidates, generate_candidates, CandidateProduct};
pub use graph::EditGraph;
pub use phonetic::{distance_matrix, edit_distance_with2ops, segments};
pub use types::{
    AllocationPlan, CandidatePool, CorrespondenceDict, CostWeights, EditOp, FrequencyTable,
    Outcome, Slot,
};
