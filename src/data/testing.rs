use super::model::{Launch, LaunchDataset, LaunchSite, Outcome};

pub fn launch(site: LaunchSite, payload_mass: f64, outcome: Outcome, booster: &str) -> Launch {
    Launch {
        site,
        payload_mass,
        booster_category: booster.to_string(),
        outcome,
    }
}

/// Four launches over three sites; CCAFS SLC-40 has none.
pub fn scenario_dataset() -> LaunchDataset {
    LaunchDataset::from_launches(vec![
        launch(LaunchSite::CcafsLc40, 500.0, Outcome::Success, "v1.0"),
        launch(LaunchSite::CcafsLc40, 6000.0, Outcome::Failure, "v1.1"),
        launch(LaunchSite::KscLc39a, 3000.0, Outcome::Success, "FT"),
        launch(LaunchSite::VafbSlc4e, 9000.0, Outcome::Failure, "B4"),
    ])
    .expect("scenario dataset is non-empty")
}
