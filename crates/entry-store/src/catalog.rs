//! Tag and category aggregation over stored entries.

use std::collections::{BTreeMap, BTreeSet};

use entry_types::{Category, Entry};
use serde::{Deserialize, Serialize};

/// A tag name and how many entries use it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// Count tags by name. An entry listing the same tag twice counts once.
/// The result is ordered by name.
pub fn tag_counts(entries: &[Entry]) -> Vec<TagCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        let names: BTreeSet<&str> = entry
            .document
            .metadata
            .tags
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        for name in names {
            *counts.entry(name).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(name, count)| TagCount {
            name: name.to_string(),
            count,
        })
        .collect()
}

/// Most used first; ties keep name order.
pub fn sort_by_count(tags: &mut [TagCount]) {
    tags.sort_by(|a, b| b.count.cmp(&a.count));
}

/// Distinct category paths, sorted. Entries without categories are skipped.
pub fn category_paths(entries: &[Entry]) -> Vec<Vec<Category>> {
    let paths: BTreeSet<Vec<&str>> = entries
        .iter()
        .map(|e| {
            e.document
                .metadata
                .categories
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
        })
        .filter(|path| !path.is_empty())
        .collect();
    paths
        .into_iter()
        .map(|path| path.into_iter().map(Category::new).collect())
        .collect()
}
