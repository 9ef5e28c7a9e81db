//! Translation of graph paths into edit operations, and their replay.

use rustc_hash::FxHashSet;

use crate::error::{AdaptError, AdaptResult};
use crate::graph::{EditGraph, Node};
use crate::phonetic::segments;
use crate::types::{CostWeights, EditOp};

/// Turn a path (as returned by the path search) into edit operations.
///
/// The path is walked from `(0, 0)` outwards. A deletion directly followed
/// by an insertion, or the other way round, is merged into one
/// substitution; only the immediately preceding operation is considered.
///
/// Translation stops at the first step that is not a unit move towards the
/// bottom-right corner or that leaves the `source` x `target` grid; the
/// operations before it are returned.
pub fn translate<T: AsRef<str>>(path: &[Node], source: &[T], target: &[T]) -> Vec<EditOp> {
    let forward: Vec<Node> = path.iter().rev().copied().collect();
    let mut ops: Vec<EditOp> = Vec::with_capacity(forward.len());

    for step in forward.windows(2) {
        let (r0, c0) = step[0];
        let (r1, c1) = step[1];
        if r1 > source.len() || c1 > target.len() {
            tracing::warn!(from = ?step[0], to = ?step[1], "path step leaves the grid");
            break;
        }

        match (r1.checked_sub(r0), c1.checked_sub(c0)) {
            (Some(1), Some(1)) => ops.push(EditOp::Keep(source[r1 - 1].as_ref().to_string())),
            (Some(0), Some(1)) => {
                let inserted = target[c1 - 1].as_ref().to_string();
                // last op is a Delete only if the previous step deleted and stayed unmerged
                if let Some(EditOp::Delete(_)) = ops.last() {
                    if let Some(EditOp::Delete(deleted)) = ops.pop() {
                        ops.push(EditOp::Substitute(deleted, inserted));
                    }
                } else {
                    ops.push(EditOp::Insert(inserted));
                }
            }
            (Some(1), Some(0)) => {
                let deleted = source[r1 - 1].as_ref().to_string();
                if let Some(EditOp::Insert(_)) = ops.last() {
                    if let Some(EditOp::Insert(inserted)) = ops.pop() {
                        ops.push(EditOp::Substitute(deleted, inserted));
                    }
                } else {
                    ops.push(EditOp::Delete(deleted));
                }
            }
            _ => {
                tracing::warn!(from = ?step[0], to = ?step[1], "path step is not a grid move");
                break;
            }
        }
    }

    ops
}

/// Up to `k` distinct cheapest ways of turning `source` into `target`.
///
/// Different paths can translate to the same operations; such duplicates
/// are counted once. `k == 0` is treated as 1.
pub fn editops<T: AsRef<str> + PartialEq>(
    source: &[T],
    target: &[T],
    k: usize,
    weights: CostWeights,
) -> Vec<Vec<EditOp>> {
    let graph = EditGraph::build(source, target, weights);
    let wanted = k.max(1);

    let mut seen: FxHashSet<Vec<EditOp>> = FxHashSet::default();
    let mut out = Vec::with_capacity(wanted);
    for path in graph.shortest_paths_iter() {
        let ops = translate(&path, source, target);
        if seen.insert(ops.clone()) {
            out.push(ops);
            if out.len() == wanted {
                break;
            }
        }
    }
    out
}

/// [`editops`] over the grapheme segments of two strings.
pub fn editops_str(source: &str, target: &str, k: usize, weights: CostWeights) -> Vec<Vec<EditOp>> {
    editops(&segments(source), &segments(target), k, weights)
}

/// Cheapest operations reshaping one phonotactic profile into another.
pub fn compute_repair_ops<T: AsRef<str> + PartialEq>(
    current: &[T],
    target: &[T],
    weights: CostWeights,
) -> Vec<EditOp> {
    editops(current, target, 1, weights)
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// Replay `ops` against `source`.
///
/// Keep re-emits the current source symbol, so a profile-level operation
/// list can be applied to the word it was computed for.
pub fn apply_ops<T: AsRef<str>>(source: &[T], ops: &[EditOp]) -> AdaptResult<Vec<String>> {
    let consumed: usize = ops.iter().map(EditOp::consumes).sum();
    if consumed != source.len() {
        return Err(AdaptError::OpsLengthMismatch {
            consumed,
            expected: source.len(),
        });
    }

    let mut out = Vec::with_capacity(ops.len());
    let mut cursor = 0;
    for op in ops {
        match op {
            EditOp::Keep(_) => {
                out.push(source[cursor].as_ref().to_string());
                cursor += 1;
            }
            EditOp::Delete(_) => cursor += 1,
            EditOp::Insert(symbol) => out.push(symbol.clone()),
            EditOp::Substitute(_, to) => {
                out.push(to.clone());
                cursor += 1;
            }
        }
    }

    Ok(out)
}

/// Apply textual operations such as `"substitute l by h"` to a string.
pub fn apply_ops_str<S: AsRef<str>>(source: &str, ops: &[S]) -> AdaptResult<String> {
    let parsed = ops
        .iter()
        .map(|op| op.as_ref().parse::<EditOp>())
        .collect::<AdaptResult<Vec<_>>>()?;
    Ok(apply_ops(&segments(source), &parsed)?.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn render(ops: &[EditOp]) -> Vec<String> {
        ops.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_substitution_collapses() {
        let result = editops_str("ló", "hó", 1, CostWeights::default());
        assert_eq!(result.len(), 1);
        assert_eq!(render(&result[0]), ["substitute l by h", "keep ó"]);
    }

    #[test]
    fn test_two_paths_for_cluster_reduction() {
        let result = editops_str("CCV", "CV", 2, CostWeights::default());
        assert_eq!(result.len(), 2);
        assert_eq!(render(&result[0]), ["delete C", "keep C", "keep V"]);
        assert_eq!(render(&result[1]), ["keep C", "delete C", "keep V"]);
    }

    #[test]
    fn test_paths_deduplicated() {
        // delete-then-insert and insert-then-delete both merge into one substitution
        let w = CostWeights::default();
        let graph = EditGraph::build(&segments("ló"), &segments("hó"), w);
        assert_eq!(graph.shortest_paths(10).len(), 2);
        assert_eq!(editops_str("ló", "hó", 10, w).len(), 1);

        let result = editops_str("CC", "C", 10, w);
        assert_eq!(result.len(), 2);
        assert_ne!(result[0], result[1]);
    }

    #[test]
    fn test_translate_stops_at_malformed_step() {
        let source = ["a", "b"];
        let target = ["a", "b"];
        // paths run from the bottom-right corner back to (0, 0)
        let good = [(2, 2), (1, 1), (0, 0)];
        assert_eq!(render(&translate(&good, &source, &target)), ["keep a", "keep b"]);

        let jump = [(3, 2), (1, 1), (0, 0)];
        assert_eq!(render(&translate(&jump, &source, &target)), ["keep a"]);

        let backwards = [(0, 0), (1, 1)];
        assert!(translate(&backwards, &source, &target).is_empty());

        let off_grid = [(2, 3), (2, 2), (1, 1), (0, 0)];
        assert_eq!(render(&translate(&off_grid, &source, &target)), ["keep a", "keep b"]);
    }

    #[test]
    fn test_identical_sequences_keep_everything() {
        let profile = ["C", "V", "C", "V"];
        let ops = compute_repair_ops(&profile, &profile, CostWeights::default());
        assert!(ops.iter().all(|op| matches!(op, EditOp::Keep(_))));
        assert_eq!(apply_ops(&["k", "a", "t", "a"], &ops).unwrap().concat(), "kata");
    }

    #[test]
    fn test_repair_applied_to_word() {
        let w = CostWeights::default();
        let ops = compute_repair_ops(&["C", "V", "C", "C"], &["C", "V", "C", "V"], w);
        let word = apply_ops(&["k", "a", "r", "t"], &ops).unwrap();
        assert_eq!(word, ["k", "a", "r", "V"]);
    }

    #[test]
    fn test_empty_inputs() {
        let w = CostWeights::default();
        let empty: [&str; 0] = [];
        assert_eq!(editops(&empty, &empty, 1, w), vec![Vec::<EditOp>::new()]);
        let ops = compute_repair_ops(&empty, &["C", "V"], w);
        assert_eq!(render(&ops), ["insert C", "insert V"]);
        assert_eq!(apply_ops(&empty, &ops).unwrap(), ["C", "V"]);
    }

    #[test]
    fn test_apply_rejects_length_mismatch() {
        let ops = vec![EditOp::Keep("a".into())];
        let err = apply_ops(&["a", "b"], &ops).unwrap_err();
        assert!(matches!(
            err,
            AdaptError::OpsLengthMismatch {
                consumed: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn test_apply_ops_str() {
        let out = apply_ops_str("ló", &["substitute l by h", "keep ó"]).unwrap();
        assert_eq!(out, "hó");
        assert!(apply_ops_str("ló", &["keep l", "remove ó"]).is_err());
    }

    proptest! {
        #[test]
        fn round_trip_reaches_target(
            source in prop::collection::vec(prop::sample::select(vec!["C", "V", "a", "b"]), 0..7),
            target in prop::collection::vec(prop::sample::select(vec!["C", "V", "a", "b"]), 0..7),
            k in 1usize..4,
        ) {
            for ops in editops(&source, &target, k, CostWeights::default()) {
                let out = apply_ops(&source, &ops)
                    .expect("translated ops consume the whole source");
                prop_assert_eq!(out, target.iter().map(|s| s.to_string()).collect::<Vec<_>>());
            }
        }
    }
}
