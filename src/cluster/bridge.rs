//! Edge counting between candidate proteins and clusters, and detection of
//! candidates that would reconnect separate cluster components.
//!
//! Counting comes in three explicit flavours so the early-exit trade-off is
//! visible at the call site:
//!
//! * [`BridgeAnalyzer::count_edges`] scans the whole cluster and is exact.
//! * [`BridgeAnalyzer::count_edges_capped`] stops scanning once the cap is
//!   reached, so a result equal to the cap only means "at least the cap".
//! * [`BridgeAnalyzer::incidence`] always scans the whole cluster and returns
//!   which positions the candidate touches. It has no capped variant.
//!
//! A candidate that is itself a cluster member contributes nothing: every
//! count is 0 and its incidence is empty.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::cluster::components::ComponentLabeling;
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::{InducedSubgraph, InteractionGraph};

/// Which positions of a cluster a candidate protein interacts with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incidence {
    connected: Vec<bool>,
}

impl Incidence {
    fn empty(size: usize) -> Self {
        Self {
            connected: vec![false; size],
        }
    }

    /// Number of cluster positions (not the number of incident ones)
    pub fn len(&self) -> usize {
        self.connected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connected.is_empty()
    }

    /// Whether the candidate interacts with the protein at this position
    pub fn is_incident(&self, position: usize) -> bool {
        self.connected[position]
    }

    /// Incident positions in ascending order
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.connected
            .iter()
            .enumerate()
            .filter(|(_, connected)| **connected)
            .map(|(position, _)| position)
    }

    /// Number of incident positions
    pub fn count(&self) -> usize {
        self.connected.iter().filter(|&&c| c).count()
    }
}

/// A protein whose edges would merge separate components of a cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeCandidate {
    pub protein: String,

    /// Degree in the full interaction graph
    pub degree: usize,

    /// Component labels the protein has at least one edge into
    pub touched_components: BTreeSet<usize>,

    /// True when every component of the cluster is touched
    pub connects_all: bool,
}

/// Screens candidate proteins against clusters of one interaction graph
#[derive(Debug, Clone, Copy)]
pub struct BridgeAnalyzer<'g> {
    graph: &'g InteractionGraph,
}

impl<'g> BridgeAnalyzer<'g> {
    pub fn new(graph: &'g InteractionGraph) -> Self {
        Self { graph }
    }

    /// Resolve a candidate, returning None when it is a member of the cluster
    fn outside_candidate(&self, candidate: &str, cluster: &InducedSubgraph) -> AnalysisResult<Option<u32>> {
        let node = self.graph.require_index(candidate)?;
        if cluster.position_of_node(node).is_some() {
            return Ok(None);
        }
        Ok(Some(node))
    }

    /// Exact number of cluster proteins the candidate interacts with
    pub fn count_edges(&self, candidate: &str, cluster: &InducedSubgraph) -> AnalysisResult<usize> {
        Ok(self.incidence(candidate, cluster)?.count())
    }

    /// Number of cluster proteins the candidate interacts with, scanning in
    /// position order and stopping as soon as `cap` edges have been seen.
    ///
    /// The result is exact when below `cap`; otherwise it equals `cap`.
    pub fn count_edges_capped(
        &self,
        candidate: &str,
        cluster: &InducedSubgraph,
        cap: usize,
    ) -> AnalysisResult<usize> {
        let Some(node) = self.outside_candidate(candidate, cluster)? else {
            return Ok(0);
        };

        let mut count = 0;
        for position in 0..cluster.size() {
            if count >= cap {
                break;
            }
            if self.graph.has_edge_between(node, cluster.node_at(position)) {
                count += 1;
            }
        }

        Ok(count)
    }

    /// Full incidence of the candidate against every cluster position
    pub fn incidence(&self, candidate: &str, cluster: &InducedSubgraph) -> AnalysisResult<Incidence> {
        let mut incidence = Incidence::empty(cluster.size());
        let Some(node) = self.outside_candidate(candidate, cluster)? else {
            return Ok(incidence);
        };

        for (position, connected) in incidence.connected.iter_mut().enumerate() {
            *connected = self.graph.has_edge_between(node, cluster.node_at(position));
        }

        Ok(incidence)
    }

    /// Candidates from `pool` with at least `min_connections` edges into the
    /// cluster, in pool order. Stops once `max_results` candidates qualify.
    pub fn find_connected_candidates<'a, I>(
        &self,
        pool: I,
        cluster: &InducedSubgraph,
        min_connections: usize,
        max_results: Option<usize>,
    ) -> AnalysisResult<Vec<&'a str>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut qualifying = Vec::new();
        if cluster.is_empty() || max_results == Some(0) {
            return Ok(qualifying);
        }

        for candidate in pool {
            let count = self.count_edges_capped(candidate, cluster, min_connections)?;
            if count >= min_connections {
                qualifying.push(candidate);
                if max_results.is_some_and(|max| qualifying.len() >= max) {
                    break;
                }
            }
        }

        Ok(qualifying)
    }

    /// Component labels of every cluster protein the candidate interacts with
    pub fn touched_components(
        &self,
        candidate: &str,
        cluster: &InducedSubgraph,
        labeling: &ComponentLabeling,
    ) -> AnalysisResult<BTreeSet<usize>> {
        if labeling.labels().len() != cluster.size() {
            return Err(AnalysisError::LabelingMismatch {
                labeled: labeling.labels().len(),
                size: cluster.size(),
            });
        }

        let incidence = self.incidence(candidate, cluster)?;
        Ok(incidence.positions().map(|p| labeling.label_of(p)).collect())
    }

    /// Whether adding the candidate would join at least `min_components`
    /// previously separate components into one group
    pub fn would_bridge(
        &self,
        candidate: &str,
        cluster: &InducedSubgraph,
        labeling: &ComponentLabeling,
        min_components: usize,
    ) -> AnalysisResult<bool> {
        let touched = self.touched_components(candidate, cluster, labeling)?;
        Ok(touched.len() >= min_components)
    }

    /// Evaluate each candidate and keep those touching at least
    /// `min_components` components, ranked by how many they touch.
    /// Ties keep the order of `candidates`.
    pub fn bridging_candidates<'a, I>(
        &self,
        candidates: I,
        cluster: &InducedSubgraph,
        labeling: &ComponentLabeling,
        min_components: usize,
    ) -> AnalysisResult<Vec<BridgeCandidate>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut bridges = Vec::new();
        for candidate in candidates {
            let touched = self.touched_components(candidate, cluster, labeling)?;
            if touched.len() < min_components {
                log::debug!(
                    "Protein {} touches {} component(s), not a bridge",
                    candidate,
                    touched.len()
                );
                continue;
            }

            bridges.push(BridgeCandidate {
                protein: candidate.to_string(),
                degree: self.graph.degree(candidate)?,
                connects_all: touched.len() == labeling.component_count(),
                touched_components: touched,
            });
        }

        bridges.sort_by(|a, b| b.touched_components.len().cmp(&a.touched_components.len()));

        Ok(bridges)
    }
}
