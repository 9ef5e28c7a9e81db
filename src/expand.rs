//! Budgeted growth of per-slot alternatives and their Cartesian product.

use ordered_float::OrderedFloat;

use crate::types::{CandidatePool, FrequencyTable, Slot};

fn frequency(freq: &FrequencyTable, connector: &str, source: &str, target: &str) -> f64 {
    freq.get(&format!("{source}{connector}{target}"))
        .copied()
        .unwrap_or(0.0)
}

fn saturating_product(counts: impl IntoIterator<Item = usize>) -> usize {
    counts
        .into_iter()
        .fold(1usize, |acc, k| acc.saturating_mul(k))
}

/// Extension cost of every slot: the frequency lost by taking its next
/// alternative after the last one taken.
///
/// `None` marks a slot that cannot be extended: it is exhausted, or its last
/// taken alternative is unattested while another extendable slot is not.
fn frontier_diffs(
    pool: &[Slot],
    claimed: &[usize],
    frequencies: &FrequencyTable,
    connector: &str,
) -> Vec<Option<OrderedFloat<f64>>> {
    let frontier: Vec<Option<(f64, f64)>> = pool
        .iter()
        .zip(claimed)
        .map(|(slot, &k)| {
            if k == 0 || k >= slot.alternatives.len() {
                return None;
            }
            let lookup = |alt: &str| frequency(frequencies, connector, &slot.source, alt);
            Some((lookup(&slot.alternatives[k - 1]), lookup(&slot.alternatives[k])))
        })
        .collect();

    let any_attested = frontier.iter().flatten().any(|&(best, _)| best > 0.0);
    frontier
        .iter()
        .map(|f| match *f {
            Some((best, _)) if best == 0.0 && any_attested => None,
            Some((best, next)) => Some(OrderedFloat(best - next)),
            None => None,
        })
        .collect()
}

/// Grow each slot's list of alternatives until their product reaches
/// `target`, or until nothing can grow any further.
///
/// Every slot starts with its top alternative. Each round extends the slots
/// whose next alternative loses the least frequency compared to the last
/// one taken; slots tied at that minimum are extended once each, in order,
/// until some slot becomes cheaper to extend than the tie.
/// A slot whose last taken alternative is unattested is held back while
/// some other extendable slot still has attested alternatives.
pub fn expand_candidates(
    pool: &[Slot],
    frequencies: &FrequencyTable,
    connector: &str,
    target: usize,
) -> CandidatePool {
    let mut claimed: Vec<usize> = pool.iter().map(|s| s.alternatives.len().min(1)).collect();
    // an empty slot keeps the product at zero whatever the others do
    let blocked = claimed.contains(&0);

    while !blocked && saturating_product(claimed.iter().copied()) < target {
        let mut diffs = frontier_diffs(pool, &claimed, frequencies, connector);
        let Some(min_diff) = diffs.iter().flatten().min().copied() else {
            break;
        };

        for idx in 0..pool.len() {
            if diffs[idx] != Some(min_diff) {
                continue;
            }
            claimed[idx] += 1;
            tracing::trace!(slot = idx, claimed = claimed[idx], diff = min_diff.0, "extended slot");
            if saturating_product(claimed.iter().copied()) >= target {
                break;
            }

            diffs = frontier_diffs(pool, &claimed, frequencies, connector);
            if diffs.iter().flatten().any(|&d| d < min_diff) {
                break;
            }
        }
    }

    pool.iter()
        .zip(claimed)
        .map(|(slot, k)| Slot::new(slot.source.clone(), slot.alternatives[..k].to_vec()))
        .collect()
}

/// Lazily join one alternative from every slot, in odometer order.
pub fn generate_candidates(pool: &[Slot]) -> CandidateProduct<'_> {
    CandidateProduct::new(pool)
}

/// Iterator over the Cartesian product of a candidate pool.
///
/// The last slot varies fastest. A clone replays the remaining words
/// independently of the original.
#[derive(Debug, Clone)]
pub struct CandidateProduct<'a> {
    slots: &'a [Slot],
    indices: Vec<usize>,
    remaining: usize,
}

impl<'a> CandidateProduct<'a> {
    fn new(slots: &'a [Slot]) -> Self {
        Self {
            slots,
            indices: vec![0; slots.len()],
            remaining: saturating_product(slots.iter().map(|s| s.alternatives.len())),
        }
    }
}

impl Iterator for CandidateProduct<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }

        let word: String = self
            .slots
            .iter()
            .zip(&self.indices)
            .map(|(slot, &i)| slot.alternatives[i].as_str())
            .collect();

        for (slot, index) in self.slots.iter().zip(self.indices.iter_mut()).rev() {
            *index += 1;
            if *index < slot.alternatives.len() {
                break;
            }
            *index = 0;
        }
        self.remaining -= 1;

        Some(word)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CandidateProduct<'_> {}
