use serde::Serialize;

use crate::data::aggregate::AggregateResult;
use crate::data::model::{Outcome, SiteFilter};

// ---------------------------------------------------------------------------
// Proportion (pie) chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub count: usize,
    /// Share of the chart total, in `0.0..=1.0`.
    pub fraction: f64,
}

/// Everything the renderer needs to draw the proportion chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionChartSpec {
    pub title: String,
    pub slices: Vec<Slice>,
}

impl ProportionChartSpec {
    pub fn new(site_filter: SiteFilter, aggregate: &AggregateResult) -> Self {
        let title = match site_filter {
            SiteFilter::All => "Total Success Launches by Site".to_string(),
            SiteFilter::Site(site) => format!("Total Success Launches for Site {site}"),
        };
        let slices = aggregate
            .proportions()
            .into_iter()
            .map(|(label, count, fraction)| Slice {
                label: label.to_string(),
                count,
                fraction,
            })
            .collect();
        ProportionChartSpec { title, slices }
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    pub fn count(&self, label: &str) -> Option<usize> {
        self.slices.iter().find(|s| s.label == label).map(|s| s.count)
    }
}

// ---------------------------------------------------------------------------
// Correlation (scatter) chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass: f64,
    pub outcome: Outcome,
    pub booster_category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChartSpec {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChartSpec {
    pub fn new(site_filter: SiteFilter, points: Vec<ScatterPoint>) -> Self {
        let title = match site_filter {
            SiteFilter::All => "Correlation Between Payload and Success for All Sites".to_string(),
            SiteFilter::Site(site) => {
                format!("Correlation Between Payload and Success for Site {site}")
            }
        };
        ScatterChartSpec { title, points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::aggregate_by_site;
    use crate::data::model::LaunchSite;
    use crate::data::testing::scenario_dataset;

    #[test]
    fn titles_follow_the_site_filter() {
        let agg = AggregateResult::default();
        assert_eq!(
            ProportionChartSpec::new(SiteFilter::All, &agg).title,
            "Total Success Launches by Site"
        );
        assert_eq!(
            ProportionChartSpec::new(SiteFilter::Site(LaunchSite::VafbSlc4e), &agg).title,
            "Total Success Launches for Site VAFB SLC-4E"
        );
        assert_eq!(
            ScatterChartSpec::new(SiteFilter::Site(LaunchSite::KscLc39a), Vec::new()).title,
            "Correlation Between Payload and Success for Site KSC LC-39A"
        );
    }

    #[test]
    fn slices_carry_counts_and_fractions() {
        let spec = ProportionChartSpec::new(SiteFilter::All, &aggregate_by_site(&scenario_dataset()));
        assert_eq!(spec.total(), 2);
        assert_eq!(spec.count("KSC LC-39A"), Some(1));
        assert!(spec.slices.iter().all(|s| (s.fraction - 0.5).abs() < 1e-12));
    }

    #[test]
    fn scatter_spec_serializes_outcome_as_label() {
        let spec = ScatterChartSpec::new(
            SiteFilter::All,
            vec![ScatterPoint {
                payload_mass: 500.0,
                outcome: Outcome::Success,
                booster_category: "v1.0".into(),
            }],
        );
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["points"][0]["outcome"], "success");
        assert_eq!(json["points"][0]["payload_mass"], 500.0);
    }
}
