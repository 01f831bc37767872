use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// LaunchSite – the closed set of known launch sites
// ---------------------------------------------------------------------------

/// A launch site. The set is fixed; labels outside it are rejected at load
/// time and when they arrive as input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LaunchSite {
    CcafsLc40,
    VafbSlc4e,
    KscLc39a,
    CcafsSlc40,
}

impl LaunchSite {
    /// All known sites, in dropdown order.
    pub const ALL: [LaunchSite; 4] = [
        LaunchSite::CcafsLc40,
        LaunchSite::VafbSlc4e,
        LaunchSite::KscLc39a,
        LaunchSite::CcafsSlc40,
    ];

    /// The label used in the source file and in input events.
    pub fn label(self) -> &'static str {
        match self {
            LaunchSite::CcafsLc40 => "CCAFS LC-40",
            LaunchSite::VafbSlc4e => "VAFB SLC-4E",
            LaunchSite::KscLc39a => "KSC LC-39A",
            LaunchSite::CcafsSlc40 => "CCAFS SLC-40",
        }
    }
}

impl fmt::Display for LaunchSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a label is not one of [`LaunchSite::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown launch site '{0}'")]
pub struct UnknownSite(pub String);

impl FromStr for LaunchSite {
    type Err = UnknownSite;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LaunchSite::ALL
            .into_iter()
            .find(|site| site.label() == s)
            .ok_or_else(|| UnknownSite(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Map the `class` column (0 or 1) to an outcome.
    pub fn from_class(class: f64) -> Option<Self> {
        if class == 0.0 {
            Some(Outcome::Failure)
        } else if class == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "failure",
            Outcome::Success => "success",
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Launch – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch record.
#[derive(Debug, Clone, PartialEq)]
pub struct Launch {
    pub site: LaunchSite,
    /// Payload mass in kg, finite and non-negative.
    pub payload_mass: f64,
    pub booster_category: String,
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// Selector values
// ---------------------------------------------------------------------------

/// Site dropdown value: the `ALL` sentinel or one specific site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SiteFilter {
    #[default]
    All,
    Site(LaunchSite),
}

impl SiteFilter {
    pub const ALL_LABEL: &'static str = "ALL";

    pub fn label(self) -> &'static str {
        match self {
            SiteFilter::All => Self::ALL_LABEL,
            SiteFilter::Site(site) => site.label(),
        }
    }

    pub fn matches(self, site: LaunchSite) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(wanted) => wanted == site,
        }
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SiteFilter {
    type Err = UnknownSite;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ALL_LABEL {
            Ok(SiteFilter::All)
        } else {
            s.parse().map(SiteFilter::Site)
        }
    }
}

/// Inclusive payload mass range `[low, high]`.
///
/// Construction does not validate; the filter engine rejects `low > high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// `low <= high` with both bounds comparable (not NaN).
    pub fn is_valid(&self) -> bool {
        self.low <= self.high
    }

    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }
}

impl From<[f64; 2]> for PayloadRange {
    fn from([low, high]: [f64; 2]) -> Self {
        PayloadRange { low, high }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Observed min / max of the payload column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

impl From<PayloadBounds> for PayloadRange {
    fn from(bounds: PayloadBounds) -> Self {
        PayloadRange::new(bounds.min, bounds.max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("dataset contains no launch records")]
pub struct EmptyDataset;

/// The full parsed table. Write-once: there are no mutation methods.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchDataset {
    launches: Vec<Launch>,
    bounds: PayloadBounds,
}

impl LaunchDataset {
    /// Build the dataset and compute payload bounds once.
    pub fn from_launches(launches: Vec<Launch>) -> Result<Self, EmptyDataset> {
        let first = launches.first().ok_or(EmptyDataset)?.payload_mass;
        let bounds = launches.iter().fold(
            PayloadBounds {
                min: first,
                max: first,
            },
            |b, l| PayloadBounds {
                min: b.min.min(l.payload_mass),
                max: b.max.max(l.payload_mass),
            },
        );
        Ok(LaunchDataset { launches, bounds })
    }

    /// Min / max payload mass across all rows.
    pub fn bounds(&self) -> PayloadBounds {
        self.bounds
    }

    pub fn launches(&self) -> &[Launch] {
        &self.launches
    }

    pub fn get(&self, index: usize) -> Option<&Launch> {
        self.launches.get(index)
    }

    pub fn len(&self) -> usize {
        self.launches.len()
    }

    /// Always false for a constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.launches.is_empty()
    }

    /// Sites that actually occur in the table.
    pub fn sites(&self) -> BTreeSet<LaunchSite> {
        self.launches.iter().map(|l| l.site).collect()
    }

    pub fn booster_categories(&self) -> BTreeSet<&str> {
        self.launches
            .iter()
            .map(|l| l.booster_category.as_str())
            .collect()
    }
}
