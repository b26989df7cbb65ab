use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use agora_store::Record;
use agora_types::ItemId;

/// Where unranked records go relative to ranked ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    RankedFirst,
    UnrankedFirst,
}

/// Combines partial rankings with the full candidate universe.
pub struct ResultMerger;

impl ResultMerger {
    /// Ranked records first, in `ranked` order, then the rest in `all` order.
    ///
    /// Ranked ids that are not in `all` are skipped, as are repeats. Every
    /// distinct id of `all` appears exactly once in the output.
    pub fn reconcile<E, K>(ranked: &[ItemId], all: Vec<E>, key_of: K) -> Vec<E>
    where
        K: Fn(&E) -> ItemId,
    {
        Self::reconcile_with(ranked, all, key_of, Placement::RankedFirst)
    }

    pub fn reconcile_with<E, K>(
        ranked: &[ItemId],
        all: Vec<E>,
        key_of: K,
        placement: Placement,
    ) -> Vec<E>
    where
        K: Fn(&E) -> ItemId,
    {
        let mut positions = HashMap::with_capacity(all.len());
        let mut slots = Vec::with_capacity(all.len());
        for entity in all {
            let id = key_of(&entity);
            if positions.contains_key(&id) {
                continue;
            }
            positions.insert(id, slots.len());
            slots.push(Some(entity));
        }

        let mut emitted = Vec::with_capacity(slots.len());
        for id in ranked {
            let Some(&position) = positions.get(id) else {
                continue;
            };
            if let Some(entity) = slots[position].take() {
                emitted.push(entity);
            }
        }

        let remainder = slots.into_iter().flatten();
        match placement {
            Placement::RankedFirst => {
                emitted.extend(remainder);
                emitted
            }
            Placement::UnrankedFirst => {
                let mut merged: Vec<E> = remainder.collect();
                merged.extend(emitted);
                merged
            }
        }
    }

    /// Records whose `field` contains `pattern`, ignoring case.
    ///
    /// An empty pattern keeps everything.
    pub fn filtered_by_text_match<E, F>(all: Vec<E>, pattern: &str, field: F) -> Vec<E>
    where
        F: Fn(&E) -> &str,
    {
        if pattern.is_empty() {
            return all;
        }
        let needle = pattern.to_lowercase();
        all.into_iter()
            .filter(|entity| field(entity).to_lowercase().contains(&needle))
            .collect()
    }

    /// Uniform sample without replacement of `min(limit, all.len())` records.
    pub fn random_sample<E, R>(mut all: Vec<E>, limit: usize, rng: &mut R) -> Vec<E>
    where
        R: Rng + ?Sized,
    {
        all.shuffle(rng);
        all.truncate(limit);
        all
    }

    /// Like [`random_sample`](Self::random_sample), over the records attached
    /// to `parent` only.
    pub fn random_sample_filtered<E, R>(
        all: Vec<E>,
        parent: &ItemId,
        limit: usize,
        rng: &mut R,
    ) -> Vec<E>
    where
        E: Record,
        R: Rng + ?Sized,
    {
        let children = all
            .into_iter()
            .filter(|entity| entity.parent() == Some(*parent))
            .collect();
        Self::random_sample(children, limit, rng)
    }
}
