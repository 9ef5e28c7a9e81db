//! Insertion/deletion distance between phonetic sequences.

use ndarray::Array2;
use unicode_segmentation::UnicodeSegmentation;

use crate::types::CostWeights;

/// Split an IPA string into grapheme-cluster segments.
pub fn segments(ipa: &str) -> Vec<&str> {
    ipa.graphemes(true).collect()
}

/// Unit-cost distance matrix using only insertions and deletions.
///
/// Rows index `source`, columns index `target`; row and column 0 stand for
/// a synthetic start marker. Cell `(r, c)` is the number of operations
/// needed to turn `source[..r]` into `target[..c]`, so a substitution shows
/// up as a step of 2.
pub fn distance_matrix<T: PartialEq>(source: &[T], target: &[T]) -> Array2<u32> {
    let height = source.len() + 1;
    let width = target.len() + 1;
    let mut mtx = Array2::<u32>::zeros((height, width));

    for r in 0..height {
        mtx[[r, 0]] = r as u32;
    }
    for c in 0..width {
        mtx[[0, c]] = c as u32;
    }

    for r in 1..height {
        for c in 1..width {
            mtx[[r, c]] = if source[r - 1] == target[c - 1] {
                mtx[[r - 1, c - 1]]
            } else {
                mtx[[r - 1, c]].min(mtx[[r, c - 1]]) + 1
            };
        }
    }

    mtx
}

/// Length of the longest common subsequence.
pub fn lcs_length<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let mut prev_row = vec![0usize; b.len() + 1];
    let mut curr_row = vec![0usize; b.len() + 1];

    for seg_a in a {
        for (j, seg_b) in b.iter().enumerate() {
            curr_row[j + 1] = if seg_a == seg_b {
                prev_row[j] + 1
            } else {
                prev_row[j + 1].max(curr_row[j])
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// Weighted insert/delete distance from `source` to `target`.
///
/// Every symbol of `source` outside the LCS is deleted and every symbol of
/// `target` outside it is inserted, so no matrix is needed when only the
/// scalar is wanted.
pub fn edit_distance_with2ops<T: PartialEq>(
    source: &[T],
    target: &[T],
    weights: CostWeights,
) -> u64 {
    let lcs = lcs_length(source, target);
    (source.len() - lcs) as u64 * u64::from(weights.deletion)
        + (target.len() - lcs) as u64 * u64::from(weights.insertion)
}

/// [`edit_distance_with2ops`] over grapheme segments of two strings.
pub fn string_distance_with2ops(source: &str, target: &str, weights: CostWeights) -> u64 {
    edit_distance_with2ops(&segments(source), &segments(target), weights)
}
