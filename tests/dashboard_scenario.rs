use std::io::Write;

use launch_dash::binding::{Dashboard, NodeState, OutputNode};
use launch_dash::data::aggregate::{aggregate_by_outcome, aggregate_by_site};
use launch_dash::data::filter::{filter_launches, FilterError};
use launch_dash::data::loader::load_file;
use launch_dash::data::model::{LaunchDataset, LaunchSite, PayloadRange, SiteFilter};
use launch_dash::state::{InputEvent, SelectorError};

const SCENARIO_CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,1,500,F9 v1.0 B0003,v1.0
2,CCAFS LC-40,0,6000,F9 v1.1 B1011,v1.1
3,KSC LC-39A,1,3000,F9 FT B1031.1,FT
4,VAFB SLC-4E,0,9000,F9 B4 B1041.1,B4
";

fn load_scenario() -> LaunchDataset {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(SCENARIO_CSV.as_bytes()).unwrap();
    file.flush().unwrap();
    load_file(file.path()).unwrap()
}

#[test]
fn scenario_aggregates_and_filters() {
    let ds = load_scenario();

    let by_site = aggregate_by_site(&ds);
    assert_eq!(by_site.get("CCAFS LC-40"), Some(1));
    assert_eq!(by_site.get("KSC LC-39A"), Some(1));
    assert_eq!(by_site.len(), 2);

    let heavy = filter_launches(&ds, SiteFilter::All, PayloadRange::new(1000.0, 10000.0)).unwrap();
    assert_eq!(heavy.len(), 3);
    assert!(heavy.iter().all(|l| l.payload_mass != 500.0));

    let ccafs = filter_launches(
        &ds,
        SiteFilter::Site(LaunchSite::CcafsLc40),
        PayloadRange::new(0.0, 10000.0),
    )
    .unwrap();
    let by_outcome = aggregate_by_outcome(&ccafs);
    assert_eq!(by_outcome.get("success"), Some(1));
    assert_eq!(by_outcome.get("failure"), Some(1));
}

#[test]
fn every_site_partitions_its_rows() {
    let ds = load_scenario();
    for site in LaunchSite::ALL {
        let view = filter_launches(&ds, SiteFilter::Site(site), ds.bounds().into()).unwrap();
        let agg = aggregate_by_outcome(&view);
        assert_eq!(agg.total(), view.len());
        assert!(agg.iter().all(|(_, count)| count > 0));
    }
}

#[test]
fn inverted_range_is_rejected() {
    let ds = load_scenario();
    assert_eq!(
        filter_launches(&ds, SiteFilter::All, PayloadRange::new(2.0, 1.0)).unwrap_err(),
        FilterError::InvalidRange { low: 2.0, high: 1.0 }
    );
}

#[test]
fn dispatch_loop_over_a_session() {
    let mut dash = Dashboard::new(load_scenario()).unwrap();

    let events = [
        InputEvent::PayloadRange([1000.0, 10000.0]),
        InputEvent::SiteFilter("Cape Canaveral".into()),
        InputEvent::SiteFilter("CCAFS LC-40".into()),
        InputEvent::PayloadRange([8000.0, 1000.0]),
        InputEvent::SiteFilter("ALL".into()),
    ];
    let results: Vec<_> = events.iter().map(|e| dash.dispatch(e)).collect();

    assert_eq!(results[0], Ok(vec![OutputNode::Correlation]));
    assert!(matches!(results[1], Err(SelectorError::UnknownSite(_))));
    assert_eq!(
        results[2],
        Ok(vec![OutputNode::Proportion, OutputNode::Correlation])
    );
    assert!(matches!(results[3], Err(SelectorError::InvalidRange { .. })));
    assert_eq!(
        results[4],
        Ok(vec![OutputNode::Proportion, OutputNode::Correlation])
    );

    // 1 at startup + the accepted events that touched each node
    assert_eq!(dash.recompute_count(OutputNode::Proportion), 3);
    assert_eq!(dash.recompute_count(OutputNode::Correlation), 4);
    for node in OutputNode::ALL {
        assert_eq!(dash.node_state(node), NodeState::Fresh);
    }

    // the rejected range left [1000, 10000] in place
    assert_eq!(dash.selectors().payload_range, PayloadRange::new(1000.0, 10000.0));
    assert_eq!(dash.scatter().points.len(), 3);
}

/// The proportion view deliberately ignores the payload range, even for `ALL`.
/// This pins the current behaviour; change it here if the views are aligned.
#[test]
fn proportion_view_ignores_payload_range() {
    let mut dash = Dashboard::new(load_scenario()).unwrap();
    let full = dash.proportion().clone();

    // excludes the only successful CCAFS LC-40 launch (500 kg)
    dash.dispatch(&InputEvent::PayloadRange([1000.0, 10000.0]))
        .unwrap();
    assert_eq!(dash.proportion(), &full);
    assert_eq!(dash.proportion().count("CCAFS LC-40"), Some(1));

    // the scatter does honour it
    assert!(dash.scatter().points.iter().all(|p| p.payload_mass >= 1000.0));
}

#[test]
fn headless_output_shape() {
    let dash = Dashboard::new(load_scenario()).unwrap();
    let json = serde_json::json!({
        "proportion_chart_spec": dash.proportion(),
        "scatter_chart_spec": dash.scatter(),
    });
    assert_eq!(
        json["proportion_chart_spec"]["title"],
        "Total Success Launches by Site"
    );
    assert_eq!(json["scatter_chart_spec"]["points"].as_array().unwrap().len(), 4);
    assert_eq!(
        json["scatter_chart_spec"]["points"][2]["booster_category"],
        "FT"
    );
}
