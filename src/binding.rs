//! Reactive binding between selector inputs and chart outputs.
//!
//! ```text
//!  site_filter ───────┬──────────► Proportion  (pie)
//!                     │
//!  payload_range ─────┴──────────► Correlation (scatter)
//! ```
//!
//! Every accepted input event marks the outputs that depend on it Stale and
//! recomputes each of them exactly once before `dispatch` returns. Readers
//! only get at outputs through `&Dashboard`, so they can never observe a node
//! mid-recompute.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::data::aggregate::{aggregate_by_outcome, aggregate_by_site};
use crate::data::filter::{filter_launches, FilterError};
use crate::data::model::{LaunchDataset, SiteFilter};
use crate::state::{Input, InputEvent, SelectorError, SelectorState};
use crate::views::{ProportionChartSpec, ScatterChartSpec};

// ---------------------------------------------------------------------------
// Graph nodes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputNode {
    /// Pie chart of success counts.
    Proportion,
    /// Payload vs. outcome scatter.
    Correlation,
}

impl OutputNode {
    pub const ALL: [OutputNode; 2] = [OutputNode::Proportion, OutputNode::Correlation];

    fn index(self) -> usize {
        match self {
            OutputNode::Proportion => 0,
            OutputNode::Correlation => 1,
        }
    }
}

impl fmt::Display for OutputNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputNode::Proportion => f.write_str("proportion"),
            OutputNode::Correlation => f.write_str("correlation"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Stale,
    Recomputing,
    Fresh,
}

// ---------------------------------------------------------------------------
// Dependency graph
// ---------------------------------------------------------------------------

/// Declared `output ← input` edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: BTreeMap<OutputNode, BTreeSet<Input>>,
}

impl DependencyGraph {
    pub fn empty() -> Self {
        DependencyGraph {
            edges: BTreeMap::new(),
        }
    }

    /// Declare that `node` must be recomputed when `input` changes.
    pub fn depends_on(mut self, node: OutputNode, input: Input) -> Self {
        self.edges.entry(node).or_default().insert(input);
        self
    }

    /// The dashboard wiring. The proportion view ignores the payload range.
    pub fn dashboard() -> Self {
        DependencyGraph::empty()
            .depends_on(OutputNode::Proportion, Input::SiteFilter)
            .depends_on(OutputNode::Correlation, Input::SiteFilter)
            .depends_on(OutputNode::Correlation, Input::PayloadRange)
    }

    /// Outputs depending on `input`, in a fixed order.
    pub fn dependents(&self, input: Input) -> Vec<OutputNode> {
        self.edges
            .iter()
            .filter(|(_, inputs)| inputs.contains(&input))
            .map(|(node, _)| *node)
            .collect()
    }

    pub fn inputs_of(&self, node: OutputNode) -> impl Iterator<Item = Input> + '_ {
        self.edges.get(&node).into_iter().flatten().copied()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        DependencyGraph::dashboard()
    }
}

// ---------------------------------------------------------------------------
// Dashboard – owns the dataset, the selectors and the computed views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct NodeSlot {
    state: NodeState,
    recomputes: u64,
}

enum NodeOutput {
    Proportion(ProportionChartSpec),
    Correlation(ScatterChartSpec),
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: LaunchDataset,
    selectors: SelectorState,
    graph: DependencyGraph,
    slots: [NodeSlot; 2],
    proportion: ProportionChartSpec,
    scatter: ScatterChartSpec,
}

impl Dashboard {
    /// Take ownership of the dataset and compute both views for the default
    /// selectors (`ALL`, full payload range).
    pub fn new(dataset: LaunchDataset) -> Result<Self, FilterError> {
        let selectors = SelectorState::initial(&dataset);
        let proportion = proportion_view(&dataset, selectors)?;
        let scatter = correlation_view(&dataset, selectors)?;
        let fresh = NodeSlot {
            state: NodeState::Fresh,
            recomputes: 1,
        };
        log::debug!(
            "Dashboard initialised: {} slices, {} points",
            proportion.slices.len(),
            scatter.points.len()
        );
        Ok(Dashboard {
            dataset,
            selectors,
            graph: DependencyGraph::dashboard(),
            slots: [fresh; 2],
            proportion,
            scatter,
        })
    }

    /// Apply one input event and recompute its dependents.
    ///
    /// Returns the recomputed nodes (empty when the event changes nothing).
    /// A rejected event leaves selectors and outputs untouched.
    pub fn dispatch(&mut self, event: &InputEvent) -> Result<Vec<OutputNode>, SelectorError> {
        let (next, input) = match self.selectors.apply(event) {
            Ok(Some(change)) => change,
            Ok(None) => {
                log::debug!("Ignoring {event:?}: value unchanged");
                return Ok(Vec::new());
            }
            Err(e) => {
                log::warn!("Rejected {event:?}: {e}");
                return Err(e);
            }
        };

        let dirty = self.graph.dependents(input);
        for &node in &dirty {
            self.slots[node.index()].state = NodeState::Stale;
        }

        let mut outputs = Vec::with_capacity(dirty.len());
        for &node in &dirty {
            self.slots[node.index()].state = NodeState::Recomputing;
            match self.compute(node, next) {
                Ok(output) => outputs.push(output),
                Err(e) => {
                    for &node in &dirty {
                        self.slots[node.index()].state = NodeState::Fresh;
                    }
                    log::warn!("Rejected {event:?}: {e}");
                    return Err(e.into());
                }
            }
        }

        // Commit everything at once so no partial result is ever visible.
        self.selectors = next;
        for output in outputs {
            let node = match output {
                NodeOutput::Proportion(spec) => {
                    self.proportion = spec;
                    OutputNode::Proportion
                }
                NodeOutput::Correlation(spec) => {
                    self.scatter = spec;
                    OutputNode::Correlation
                }
            };
            let slot = &mut self.slots[node.index()];
            slot.state = NodeState::Fresh;
            slot.recomputes += 1;
        }

        log::debug!("{input} changed to {:?}, recomputed {dirty:?}", self.selectors);
        Ok(dirty)
    }

    fn compute(&self, node: OutputNode, selectors: SelectorState) -> Result<NodeOutput, FilterError> {
        match node {
            OutputNode::Proportion => {
                proportion_view(&self.dataset, selectors).map(NodeOutput::Proportion)
            }
            OutputNode::Correlation => {
                correlation_view(&self.dataset, selectors).map(NodeOutput::Correlation)
            }
        }
    }

    pub fn proportion(&self) -> &ProportionChartSpec {
        &self.proportion
    }

    pub fn scatter(&self) -> &ScatterChartSpec {
        &self.scatter
    }

    pub fn selectors(&self) -> SelectorState {
        self.selectors
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn node_state(&self, node: OutputNode) -> NodeState {
        self.slots[node.index()].state
    }

    /// How many times `node` has been computed, including at startup.
    pub fn recompute_count(&self, node: OutputNode) -> u64 {
        self.slots[node.index()].recomputes
    }
}

// ---------------------------------------------------------------------------
// View computations
// ---------------------------------------------------------------------------

/// `ALL` → successes per site over the whole table; a single site →
/// success vs. failure at that site. The payload range is not applied.
fn proportion_view(
    dataset: &LaunchDataset,
    selectors: SelectorState,
) -> Result<ProportionChartSpec, FilterError> {
    let aggregate = match selectors.site_filter {
        SiteFilter::All => aggregate_by_site(dataset),
        site_filter @ SiteFilter::Site(_) => {
            let view = filter_launches(dataset, site_filter, dataset.bounds().into())?;
            aggregate_by_outcome(&view)
        }
    };
    Ok(ProportionChartSpec::new(selectors.site_filter, &aggregate))
}

fn correlation_view(
    dataset: &LaunchDataset,
    selectors: SelectorState,
) -> Result<ScatterChartSpec, FilterError> {
    let view = filter_launches(dataset, selectors.site_filter, selectors.payload_range)?;
    Ok(ScatterChartSpec::new(selectors.site_filter, view.scatter_points()))
}
