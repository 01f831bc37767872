use std::collections::BTreeMap;

use super::filter::FilteredView;
use super::model::LaunchDataset;

/// Counts per group label. Only groups with at least one member appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResult {
    counts: BTreeMap<String, usize>,
}

impl AggregateResult {
    fn from_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for label in labels {
            *counts.entry(label.to_string()).or_default() += 1;
        }
        AggregateResult { counts }
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.counts.get(label).copied()
    }

    /// Sum of all group counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(label, count)` pairs sorted by label.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(label, &count)| (label.as_str(), count))
    }

    /// `(label, count, fraction of total)` for proportion charts.
    pub fn proportions(&self) -> Vec<(&str, usize, f64)> {
        let total = self.total();
        self.iter()
            .map(|(label, count)| {
                let fraction = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                };
                (label, count, fraction)
            })
            .collect()
    }
}

/// Count launches per outcome within a filtered view.
pub fn aggregate_by_outcome(view: &FilteredView<'_>) -> AggregateResult {
    AggregateResult::from_labels(view.iter().map(|l| l.outcome.label()))
}

/// Count successful launches per site over the whole dataset.
///
/// Sites without a success are omitted. The payload range plays no part here.
pub fn aggregate_by_site(dataset: &LaunchDataset) -> AggregateResult {
    AggregateResult::from_labels(
        dataset
            .launches()
            .iter()
            .filter(|l| l.outcome.is_success())
            .map(|l| l.site.label()),
    )
}
