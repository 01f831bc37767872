use thiserror::Error;

use super::model::{Launch, LaunchDataset, PayloadRange, SiteFilter};
use crate::views::ScatterPoint;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FilterError {
    #[error("invalid payload range: low {low} is greater than high {high}")]
    InvalidRange { low: f64, high: f64 },
}

// ---------------------------------------------------------------------------
// FilteredView – the rows passing the current selectors
// ---------------------------------------------------------------------------

/// Ordered subsequence of a dataset, held as row indices into it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    dataset: &'a LaunchDataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Row indices into the source dataset, strictly increasing.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Launch> + '_ {
        let dataset: &'a LaunchDataset = self.dataset;
        let launches = dataset.launches();
        self.indices.iter().map(move |&i| &launches[i])
    }

    /// Project to the columns the correlation chart plots.
    pub fn scatter_points(&self) -> Vec<ScatterPoint> {
        self.iter()
            .map(|l| ScatterPoint {
                payload_mass: l.payload_mass,
                outcome: l.outcome,
                booster_category: l.booster_category.clone(),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Return the launches that pass both selectors, in dataset order.
///
/// * `SiteFilter::All` applies no site predicate; a site with no launches
///   yields an empty view, not an error.
/// * The payload predicate `low <= mass <= high` is always applied.
/// * `low > high` is rejected rather than swapped.
pub fn filter_launches(
    dataset: &LaunchDataset,
    site_filter: SiteFilter,
    payload_range: PayloadRange,
) -> Result<FilteredView<'_>, FilterError> {
    if !payload_range.is_valid() {
        return Err(FilterError::InvalidRange {
            low: payload_range.low,
            high: payload_range.high,
        });
    }

    let indices = dataset
        .launches()
        .iter()
        .enumerate()
        .filter(|(_, l)| site_filter.matches(l.site) && payload_range.contains(l.payload_mass))
        .map(|(i, _)| i)
        .collect();

    Ok(FilteredView { dataset, indices })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchSite, Outcome};
    use crate::data::testing::scenario_dataset;

    #[test]
    fn all_sites_applies_only_the_payload_range() {
        let ds = scenario_dataset();
        let view = filter_launches(&ds, SiteFilter::All, PayloadRange::new(1000.0, 10000.0)).unwrap();
        assert_eq!(view.indices(), &[1, 2, 3]);
        assert!(view.iter().all(|l| l.payload_mass >= 1000.0));
    }

    #[test]
    fn range_is_inclusive_at_both_ends() {
        let ds = scenario_dataset();
        let view = filter_launches(&ds, SiteFilter::All, PayloadRange::new(500.0, 6000.0)).unwrap();
        assert_eq!(view.indices(), &[0, 1, 2]);
    }

    #[test]
    fn site_predicate_keeps_matching_rows_in_order() {
        let ds = scenario_dataset();
        let view = filter_launches(
            &ds,
            SiteFilter::Site(LaunchSite::CcafsLc40),
            PayloadRange::new(0.0, 10000.0),
        )
        .unwrap();
        let outcomes: Vec<Outcome> = view.iter().map(|l| l.outcome).collect();
        assert_eq!(outcomes, vec![Outcome::Success, Outcome::Failure]);
    }

    #[test]
    fn site_without_launches_is_an_empty_view() {
        let ds = scenario_dataset();
        let view = filter_launches(
            &ds,
            SiteFilter::Site(LaunchSite::CcafsSlc40),
            PayloadRange::new(0.0, 10000.0),
        )
        .unwrap();
        assert!(view.is_empty());
        assert!(view.scatter_points().is_empty());
    }

    #[test]
    fn inverted_range_is_rejected_for_every_site() {
        let ds = scenario_dataset();
        let filters = std::iter::once(SiteFilter::All)
            .chain(LaunchSite::ALL.into_iter().map(SiteFilter::Site));
        for site_filter in filters {
            assert_eq!(
                filter_launches(&ds, site_filter, PayloadRange::new(5000.0, 4000.0)).unwrap_err(),
                FilterError::InvalidRange {
                    low: 5000.0,
                    high: 4000.0
                }
            );
        }
    }

    #[test]
    fn filter_is_sound_complete_and_idempotent() {
        let ds = scenario_dataset();
        let before = ds.launches().to_vec();
        for (lo, hi) in [(0.0, 0.0), (0.0, 500.0), (2999.0, 3001.0), (6000.0, 9000.0), (0.0, 1e9)] {
            let range = PayloadRange::new(lo, hi);
            let first = filter_launches(&ds, SiteFilter::All, range).unwrap();
            let second = filter_launches(&ds, SiteFilter::All, range).unwrap();
            assert_eq!(first, second);

            let expected = ds
                .launches()
                .iter()
                .filter(|l| lo <= l.payload_mass && l.payload_mass <= hi)
                .count();
            assert_eq!(first.len(), expected);
            assert!(first.iter().all(|l| range.contains(l.payload_mass)));
            assert!(first.indices().windows(2).all(|w| w[0] < w[1]));
        }
        assert_eq!(ds.launches(), before.as_slice());
    }

    #[test]
    fn scatter_points_project_payload_outcome_and_booster() {
        let ds = scenario_dataset();
        let view = filter_launches(&ds, SiteFilter::All, PayloadRange::new(8000.0, 9000.0)).unwrap();
        let points = view.scatter_points();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].payload_mass, 9000.0);
        assert_eq!(points[0].outcome, Outcome::Failure);
        assert_eq!(points[0].booster_category, "B4");
    }
}
