//! End-to-end prediction of target forms for a tokenized word.
//!
//! An [`Adapter`] owns the immutable data a prediction needs (configuration,
//! sound correspondences, frequencies, allowed profiles) and is built once.
//! Each call allocates its own bookkeeping, so one adapter can serve many
//! words in parallel.

use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::allocate::allocate;
use crate::config::{AdapterConfig, Mode};
use crate::editops::{apply_ops, editops};
use crate::error::{AdaptError, AdaptResult};
use crate::expand::{expand_candidates, generate_candidates};
use crate::phonetic::{edit_distance_with2ops, segments};
use crate::types::{CandidatePool, CorrespondenceDict, FrequencyTable, Outcome, Slot};

/// Classify tokens as consonants (`C`) or vowels (`V`) by their first grapheme.
pub fn profile_of<S: AsRef<str>>(tokens: &[S], vowels: &[&str]) -> String {
    tokens
        .iter()
        .map(|token| {
            let first = segments(token.as_ref()).first().copied().unwrap_or("");
            if vowels.contains(&first) {
                'V'
            } else {
                'C'
            }
        })
        .collect()
}

pub struct Adapter {
    config: AdapterConfig,
    correspondences: CorrespondenceDict,
    frequencies: FrequencyTable,
    inventory: Vec<String>,
}

impl Adapter {
    /// Build an adapter.
    ///
    /// `inventory` lists the allowed phonotactic profiles (e.g. `"CVCV"`). It
    /// must be present and non-empty when the mode repairs phonotactics.
    pub fn new(
        config: AdapterConfig,
        correspondences: CorrespondenceDict,
        frequencies: FrequencyTable,
        inventory: Option<Vec<String>>,
    ) -> AdaptResult<Self> {
        config.validate()?;
        let inventory = inventory.unwrap_or_default();
        if inventory.is_empty() && config.mode.repairs_phonotactics() {
            return Err(AdaptError::InventoryMissing("phonotactic inventory"));
        }

        tracing::debug!(
            mode = ?config.mode,
            correspondences = correspondences.len(),
            profiles = inventory.len(),
            "adapter ready"
        );

        Ok(Self {
            config,
            correspondences,
            frequencies,
            inventory,
        })
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// Up to `n` allowed profiles closest to `profile`, cheapest first.
    ///
    /// A profile that is already allowed is returned on its own. Ties keep
    /// inventory order.
    pub fn nearest_profiles(&self, profile: &str, n: usize) -> Vec<String> {
        if self.inventory.iter().any(|p| p == profile) {
            return vec![profile.to_string()];
        }

        let current = segments(profile);
        let mut ranked: Vec<(u64, &String)> = self
            .inventory
            .iter()
            .map(|p| {
                let distance = edit_distance_with2ops(&current, &segments(p), self.config.weights);
                (distance, p)
            })
            .collect();
        ranked.sort_by_key(|&(distance, _)| distance);

        ranked
            .into_iter()
            .take(n)
            .map(|(_, p)| p.clone())
            .collect()
    }

    /// Reshape `tokens` from `profile` to `target`, once per repair path.
    ///
    /// Kept positions carry their token; inserted or substituted positions
    /// carry the target's class marker.
    pub fn repair<S: AsRef<str>>(
        &self,
        tokens: &[S],
        profile: &str,
        target: &str,
        paths: usize,
    ) -> AdaptResult<Vec<Vec<String>>> {
        editops(&segments(profile), &segments(target), paths, self.config.weights)
            .iter()
            .map(|ops| apply_ops(tokens, ops))
            .collect()
    }

    fn lookup(&self, token: &str, first: bool, last: bool) -> Option<(String, &Vec<String>)> {
        let mut keys = Vec::with_capacity(4);
        if self.config.mode.tags_boundaries() {
            if first && last {
                keys.push(format!("#{token}#"));
            }
            if first {
                keys.push(format!("#{token}"));
            }
            if last {
                keys.push(format!("{token}#"));
            }
        }
        keys.push(token.to_string());

        keys.into_iter()
            .find_map(|key| self.correspondences.get(&key).map(|alts| (key, alts)))
    }

    /// Look up the ranked correspondences of every skeleton position.
    ///
    /// Fails with the first token that has no documented correspondence.
    pub fn fill_slots<S: AsRef<str>>(&self, skeleton: &[S]) -> Result<CandidatePool, String> {
        let last = skeleton.len().saturating_sub(1);
        skeleton
            .iter()
            .enumerate()
            .map(|(i, token)| {
                let token = token.as_ref();
                self.lookup(token, i == 0, i == last)
                    .map(|(key, alts)| Slot::new(key, alts.clone()))
                    .ok_or_else(|| token.to_string())
            })
            .collect()
    }

    /// Predict up to `howmany` target forms for a tokenized word.
    ///
    /// `profile` is the word's C/V skeleton, one marker per token.
    pub fn adapt<S: AsRef<str>>(
        &self,
        tokens: &[S],
        profile: &str,
        howmany: usize,
    ) -> AdaptResult<Outcome> {
        if howmany == 0 {
            return Ok(Outcome::NoCandidates);
        }

        let structures = if self.config.mode.repairs_phonotactics() {
            self.nearest_profiles(profile, self.config.max_structures)
        } else {
            Vec::new()
        };
        let plan = allocate(howmany, structures.len(), self.config.max_repair_paths);
        tracing::debug!(?plan, structures = ?structures, "allocation plan");

        let skeletons: Vec<Vec<String>> = if structures.is_empty() {
            vec![tokens.iter().map(|t| t.as_ref().to_string()).collect()]
        } else {
            let mut skeletons = Vec::new();
            for target in structures.iter().take(plan.structures) {
                skeletons.extend(self.repair(tokens, profile, target, plan.paths)?);
            }
            skeletons
        };

        let connector = self.config.mode.connector();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut candidates = Vec::new();
        let mut undocumented = None;

        'skeletons: for skeleton in &skeletons {
            let pool = match self.fill_slots(skeleton) {
                Ok(pool) => pool,
                Err(symbol) => {
                    tracing::warn!(%symbol, "no documented correspondence");
                    if undocumented.is_none() {
                        undocumented = Some(symbol);
                    }
                    continue;
                }
            };
            let pool = expand_candidates(&pool, &self.frequencies, connector, plan.substitutions);
            for word in generate_candidates(&pool) {
                if seen.insert(word.clone()) {
                    candidates.push(word);
                    if candidates.len() == howmany {
                        break 'skeletons;
                    }
                }
            }
        }

        Ok(match (candidates.is_empty(), undocumented) {
            (false, _) => Outcome::Candidates(candidates),
            (true, Some(symbol)) => Outcome::Undocumented(symbol),
            (true, None) => Outcome::NoCandidates,
        })
    }
}

/// Run [`Adapter::adapt`] over many `(tokens, profile)` words in parallel.
pub fn batch_adapt(
    adapter: &Adapter,
    words: &[(Vec<String>, String)],
    howmany: usize,
) -> Vec<AdaptResult<Outcome>> {
    words
        .par_iter()
        .map(|(tokens, profile)| adapter.adapt(tokens, profile, howmany))
        .collect()
}
