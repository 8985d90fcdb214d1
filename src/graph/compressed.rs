//! Memory-efficient weighted interaction graph

use std::collections::HashMap;
use std::mem;

use crate::error::{AnalysisError, AnalysisResult};

/// Compressed sparse representation of an undirected, weighted protein interaction graph.
///
/// Every edge is stored in both directions so that neighbor lookups never need
/// a reverse index. The graph is immutable once built by [`GraphBuilder`].
///
/// [`GraphBuilder`]: crate::graph::builder::GraphBuilder
#[derive(Debug, Clone)]
pub struct InteractionGraph {
    /// Offset array: index where each node's neighbors begin
    /// offsets[i] to offsets[i+1] defines the neighbor range for node i
    pub(crate) offsets: Vec<u32>,

    /// Concatenated, sorted neighbor lists
    pub(crate) neighbors: Vec<u32>,

    /// Edge weights, parallel to `neighbors`
    pub(crate) weights: Vec<f64>,

    /// Protein identifiers in construction order
    pub(crate) protein_ids: Vec<String>,

    /// Mapping from protein identifiers to node indices
    pub(crate) id_to_index: HashMap<String, u32>,
}

impl InteractionGraph {
    /// Number of proteins in the graph
    pub fn protein_count(&self) -> usize {
        self.protein_ids.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    /// Protein identifiers in construction order
    pub fn proteins(&self) -> &[String] {
        &self.protein_ids
    }

    /// Node index of a protein, if it is part of the graph
    pub fn index_of(&self, protein: &str) -> Option<u32> {
        self.id_to_index.get(protein).copied()
    }

    /// Node index of a protein, failing if it is unknown
    pub fn require_index(&self, protein: &str) -> AnalysisResult<u32> {
        self.index_of(protein)
            .ok_or_else(|| AnalysisError::UnknownProtein(protein.to_string()))
    }

    pub fn contains(&self, protein: &str) -> bool {
        self.id_to_index.contains_key(protein)
    }

    /// Protein identifier of a node index
    pub fn protein_id(&self, node: u32) -> &str {
        &self.protein_ids[node as usize]
    }

    /// Sorted neighbor indices of a node
    pub fn neighbors(&self, node: u32) -> &[u32] {
        let start = self.offsets[node as usize] as usize;
        let end = self.offsets[node as usize + 1] as usize;
        &self.neighbors[start..end]
    }

    /// Edge weights of a node, aligned with [`InteractionGraph::neighbors`]
    pub fn edge_weights(&self, node: u32) -> &[f64] {
        let start = self.offsets[node as usize] as usize;
        let end = self.offsets[node as usize + 1] as usize;
        &self.weights[start..end]
    }

    /// Check if there's an edge between two node indices
    pub fn has_edge_between(&self, a: u32, b: u32) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Check if two proteins interact
    pub fn has_edge(&self, a: &str, b: &str) -> AnalysisResult<bool> {
        let a = self.require_index(a)?;
        let b = self.require_index(b)?;
        Ok(self.has_edge_between(a, b))
    }

    /// Interaction weight between two proteins, 0.0 when they do not interact
    pub fn weight(&self, a: &str, b: &str) -> AnalysisResult<f64> {
        let a = self.require_index(a)?;
        let b = self.require_index(b)?;
        Ok(self
            .neighbors(a)
            .binary_search(&b)
            .map(|pos| self.edge_weights(a)[pos])
            .unwrap_or(0.0))
    }

    /// Degree of a node: number of positive-weight neighbors
    pub fn node_degree(&self, node: u32) -> usize {
        let start = self.offsets[node as usize] as usize;
        let end = self.offsets[node as usize + 1] as usize;
        end - start
    }

    /// Degree of a protein: number of positive-weight neighbors
    pub fn degree(&self, protein: &str) -> AnalysisResult<usize> {
        Ok(self.node_degree(self.require_index(protein)?))
    }

    /// Sum of incident edge weights
    pub fn weighted_degree(&self, protein: &str) -> AnalysisResult<f64> {
        let node = self.require_index(protein)?;
        Ok(self.edge_weights(node).iter().sum())
    }

    /// Proteins that interact with the given protein
    pub fn neighbors_of(&self, protein: &str) -> AnalysisResult<Vec<&str>> {
        let node = self.require_index(protein)?;
        Ok(self
            .neighbors(node)
            .iter()
            .map(|&n| self.protein_id(n))
            .collect())
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let neighbors = self.neighbors.capacity() * mem::size_of::<u32>();
        let weights = self.weights.capacity() * mem::size_of::<f64>();
        let ids = self.protein_ids.iter().map(|s| s.capacity()).sum::<usize>();

        base + offsets + neighbors + weights + 2 * ids
    }
}
