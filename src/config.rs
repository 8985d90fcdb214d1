//! Configuration management for the cluster connectivity analyzer

use serde::{Deserialize, Serialize};

/// What to do with protein identifiers that are absent from the interaction graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnknownProteinPolicy {
    /// Surface an error to the caller
    Fail,
    /// Drop the protein from the cluster or candidate pool and log a warning
    Skip,
}

/// Order in which candidate proteins are scanned against a cluster.
///
/// When a result cap is set, this decides which candidates are found first,
/// so it changes the returned set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CandidateOrder {
    /// Highest degree first
    Descending,
    /// Lowest degree first
    Ascending,
}

/// Configuration for a cluster connectivity analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Policy for cluster members and candidates missing from the graph
    pub unknown_protein_policy: UnknownProteinPolicy,

    /// Candidate scanning order over the degree index
    pub candidate_order: CandidateOrder,

    /// Minimum number of edges a candidate needs into the cluster
    pub min_connections: usize,

    /// Stop candidate filtering after this many qualifying proteins
    pub max_candidates: Option<usize>,

    /// Minimum number of components a candidate must touch to count as a bridge
    pub min_components: usize,

    /// Exclude candidates whose degree exceeds this value
    pub max_candidate_degree: Option<usize>,

    /// Reject cluster sets in which a protein belongs to more than one cluster
    pub require_disjoint_clusters: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unknown_protein_policy: UnknownProteinPolicy::Fail,
            candidate_order: CandidateOrder::Descending,
            min_connections: 3,
            max_candidates: None,
            min_components: 2,
            max_candidate_degree: None,
            require_disjoint_clusters: false,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        unknown_protein_policy: UnknownProteinPolicy,
        candidate_order: CandidateOrder,
        min_connections: usize,
        max_candidates: Option<usize>,
        min_components: usize,
    ) -> Self {
        Self {
            unknown_protein_policy,
            candidate_order,
            min_connections,
            max_candidates,
            min_components,
            ..Self::default()
        }
    }

    pub fn with_max_candidate_degree(mut self, max_degree: Option<usize>) -> Self {
        self.max_candidate_degree = max_degree;
        self
    }

    pub fn with_disjoint_clusters(mut self, required: bool) -> Self {
        self.require_disjoint_clusters = required;
        self
    }
}
