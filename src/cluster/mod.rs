//! Cluster representation and connectivity analysis module

pub mod bridge;
pub mod components;
pub mod inspection;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::UnknownProteinPolicy;
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::InteractionGraph;

pub use bridge::{BridgeAnalyzer, BridgeCandidate, Incidence};
pub use components::{ComponentLabeler, ComponentLabeling};
pub use inspection::{ClusterInspection, ClusterReport};

/// An externally supplied, ordered group of proteins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Identifier of this cluster in its source file
    pub id: String,

    /// Member proteins in listing order
    pub proteins: Vec<String>,
}

impl Cluster {
    /// Create a cluster, dropping repeated members after their first listing
    pub fn new(id: impl Into<String>, proteins: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let id = id.into();
        let mut seen = HashSet::new();
        let mut members = Vec::new();
        for protein in proteins {
            let protein = protein.into();
            if seen.insert(protein.clone()) {
                members.push(protein);
            } else {
                log::warn!("Cluster {} lists protein {} more than once", id, protein);
            }
        }

        Self { id, proteins: members }
    }

    pub fn len(&self) -> usize {
        self.proteins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proteins.is_empty()
    }

    /// Split the members into those present in the graph and those absent.
    ///
    /// With [`UnknownProteinPolicy::Fail`] the first absent member is an error;
    /// with [`UnknownProteinPolicy::Skip`] absent members are returned separately.
    pub fn resolve(
        &self,
        graph: &InteractionGraph,
        policy: UnknownProteinPolicy,
    ) -> AnalysisResult<(Vec<&str>, Vec<String>)> {
        let mut known = Vec::with_capacity(self.proteins.len());
        let mut skipped = Vec::new();

        for protein in &self.proteins {
            if graph.contains(protein) {
                known.push(protein.as_str());
                continue;
            }
            match policy {
                UnknownProteinPolicy::Fail => {
                    return Err(AnalysisError::UnknownProtein(protein.clone()));
                }
                UnknownProteinPolicy::Skip => {
                    log::warn!(
                        "Skipping protein {} of cluster {}: not in the interaction graph",
                        protein,
                        self.id
                    );
                    skipped.push(protein.clone());
                }
            }
        }

        Ok((known, skipped))
    }
}

/// All clusters of one analysis run, in source order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterSet {
    pub clusters: Vec<Cluster>,
}

impl ClusterSet {
    pub fn new(clusters: Vec<Cluster>) -> Self {
        Self { clusters }
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }

    /// Fail if any protein belongs to more than one cluster
    pub fn validate_disjoint(&self) -> AnalysisResult<()> {
        let mut owner: HashMap<&str, &str> = HashMap::new();
        for cluster in &self.clusters {
            for protein in &cluster.proteins {
                if let Some(first) = owner.insert(protein, &cluster.id) {
                    return Err(AnalysisError::OverlappingClusters {
                        protein: protein.clone(),
                        first: first.to_string(),
                        second: cluster.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
