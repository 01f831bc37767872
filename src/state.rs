use std::fmt;

use thiserror::Error;

use crate::data::filter::FilterError;
use crate::data::model::{LaunchDataset, PayloadRange, SiteFilter, UnknownSite};

// ---------------------------------------------------------------------------
// Selector state
// ---------------------------------------------------------------------------

/// The current user inputs, independent of rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorState {
    pub site_filter: SiteFilter,
    pub payload_range: PayloadRange,
}

impl SelectorState {
    /// `ALL` sites over the dataset's full observed payload range.
    pub fn initial(dataset: &LaunchDataset) -> Self {
        SelectorState {
            site_filter: SiteFilter::All,
            payload_range: dataset.bounds().into(),
        }
    }

    /// Validate `event` and return the state it leads to, together with the
    /// input it changed. `Ok(None)` means the event carries the value already
    /// held.
    pub fn apply(&self, event: &InputEvent) -> Result<Option<(SelectorState, Input)>, SelectorError> {
        let mut next = *self;
        match event {
            InputEvent::SiteFilter(label) => {
                next.site_filter = label.parse()?;
            }
            InputEvent::PayloadRange([low, high]) => {
                let range = PayloadRange::new(*low, *high);
                if !range.is_valid() {
                    return Err(SelectorError::InvalidRange {
                        low: *low,
                        high: *high,
                    });
                }
                next.payload_range = range;
            }
        }
        Ok((next != *self).then_some((next, event.input())))
    }
}

// ---------------------------------------------------------------------------
// Input events
// ---------------------------------------------------------------------------

/// The named input signals the dashboard reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Input {
    SiteFilter,
    PayloadRange,
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::SiteFilter => f.write_str("site_filter"),
            Input::PayloadRange => f.write_str("payload_range"),
        }
    }
}

/// One event from the UI layer, carrying the raw widget value.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// `"ALL"` or a launch site label.
    SiteFilter(String),
    /// `[low, high]` in kg.
    PayloadRange([f64; 2]),
}

impl InputEvent {
    pub fn input(&self) -> Input {
        match self {
            InputEvent::SiteFilter(_) => Input::SiteFilter,
            InputEvent::PayloadRange(_) => Input::PayloadRange,
        }
    }
}

/// An input event that was rejected. The prior selector state is kept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectorError {
    #[error(transparent)]
    UnknownSite(#[from] UnknownSite),
    #[error("invalid payload range: low {low} is greater than high {high}")]
    InvalidRange { low: f64, high: f64 },
}

impl From<FilterError> for SelectorError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::InvalidRange { low, high } => SelectorError::InvalidRange { low, high },
        }
    }
}
