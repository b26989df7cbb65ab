use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use agora_store::{Record, RecordFilter, RecordStore};
use agora_types::ItemId;

use crate::error::RankResult;

/// Number of child records attached to one parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementEntry {
    pub parent: ItemId,
    pub count: usize,
}

/// Child counts per parent, recomputed from the child store on every call.
///
/// Parents without children never appear. Each call scans the whole child
/// store.
pub struct EngagementIndex;

impl EngagementIndex {
    /// Counts grouped by parent, largest first. Equal counts keep the order in
    /// which each parent's first child appears in the store.
    pub fn response_counts_by_parent<C, S>(children: &S) -> RankResult<Vec<EngagementEntry>>
    where
        C: Record,
        S: RecordStore<C> + ?Sized,
    {
        let mut positions: HashMap<ItemId, usize> = HashMap::new();
        let mut counts: Vec<EngagementEntry> = Vec::new();

        for child in children.list(&RecordFilter::all())? {
            let Some(parent) = child.parent() else {
                continue;
            };
            match positions.get(&parent) {
                Some(&position) => counts[position].count += 1,
                None => {
                    positions.insert(parent, counts.len());
                    counts.push(EngagementEntry { parent, count: 1 });
                }
            }
        }

        counts.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(counts)
    }

    /// Parent ids in engagement order.
    pub fn ranked_parents<C, S>(children: &S) -> RankResult<Vec<ItemId>>
    where
        C: Record,
        S: RecordStore<C> + ?Sized,
    {
        Ok(Self::response_counts_by_parent(children)?
            .into_iter()
            .map(|entry| entry.parent)
            .collect())
    }
}
