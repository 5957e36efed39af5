//! Evidence category tally.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EvidenceCategory;

/// Upper bound on evidence records fetched for one tally.
pub const MAX_EVIDENCE_RECORDS: u32 = 500;

/// Number of evidence records in one category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: EvidenceCategory,
    pub count: usize,
}

/// Count categories in a single pass.
///
/// Only categories with a non-zero count are emitted. The result is sorted by
/// count, descending; equal counts keep enumeration order.
#[must_use]
pub fn aggregate<I>(categories: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = EvidenceCategory>,
{
    let mut counts = [0usize; EvidenceCategory::ALL.len()];
    for category in categories {
        counts[category.index()] += 1;
    }

    let mut out: Vec<CategoryCount> = EvidenceCategory::ALL
        .into_iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(category, count)| CategoryCount { category, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Sum of all counts.
#[must_use]
pub fn total(counts: &[CategoryCount]) -> usize {
    counts.iter().map(|c| c.count).sum()
}
