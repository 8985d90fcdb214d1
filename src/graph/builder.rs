//! Graph construction module

use std::collections::HashMap;

use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::InteractionGraph;

/// Builder for incrementally constructing an InteractionGraph
pub struct GraphBuilder {
    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, u32>,

    /// Node string IDs
    protein_ids: Vec<String>,

    /// Weight of every undirected edge, keyed by (smaller index, larger index)
    edges: HashMap<(u32, u32), f64>,

    /// Self-loops dropped while building
    skipped_self_loops: usize,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            protein_ids: Vec::with_capacity(capacity),
            edges: HashMap::with_capacity(capacity * 4),
            skipped_self_loops: 0,
        }
    }

    /// Get or create a node ID for the given protein
    pub fn add_protein(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.protein_ids.len() as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.protein_ids.push(id.to_string());

        idx
    }

    /// Add an undirected edge between two proteins.
    ///
    /// The weight must be finite and positive. Recording the same pair twice
    /// is allowed only when both records carry the same weight, so an edge
    /// list that lists both directions with differing weights is rejected.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: f64) -> AnalysisResult<()> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(AnalysisError::MalformedEdge {
                a: a.to_string(),
                b: b.to_string(),
                reason: format!("weight {} is not positive", weight),
            });
        }

        let a_idx = self.add_protein(a);
        let b_idx = self.add_protein(b);

        if a_idx == b_idx {
            log::warn!("Ignoring self-loop on protein {}", a);
            self.skipped_self_loops += 1;
            return Ok(());
        }

        let key = (a_idx.min(b_idx), a_idx.max(b_idx));
        match self.edges.get(&key) {
            Some(&existing) if existing != weight => Err(AnalysisError::MalformedEdge {
                a: a.to_string(),
                b: b.to_string(),
                reason: format!("asymmetric weights {} and {}", existing, weight),
            }),
            Some(_) => Ok(()),
            None => {
                self.edges.insert(key, weight);
                Ok(())
            }
        }
    }

    /// Number of proteins registered so far
    pub fn protein_count(&self) -> usize {
        self.protein_ids.len()
    }

    /// Build the compressed graph
    pub fn build(self) -> InteractionGraph {
        let node_count = self.protein_ids.len();

        // Adjacency lists in both directions
        let mut adjacency: Vec<Vec<(u32, f64)>> = vec![Vec::new(); node_count];
        for (&(a, b), &weight) in &self.edges {
            adjacency[a as usize].push((b, weight));
            adjacency[b as usize].push((a, weight));
        }

        // Create offsets array
        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);

        let mut offset = 0;
        for list in &adjacency {
            offset += list.len() as u32;
            offsets.push(offset);
        }

        let mut neighbors = Vec::with_capacity(offset as usize);
        let mut weights = Vec::with_capacity(offset as usize);
        for list in &mut adjacency {
            // Sort for binary search efficiency
            list.sort_unstable_by_key(|&(node, _)| node);
            for &(node, weight) in list.iter() {
                neighbors.push(node);
                weights.push(weight);
            }
        }

        if self.skipped_self_loops > 0 {
            log::info!("Dropped {} self-loops", self.skipped_self_loops);
        }

        InteractionGraph {
            offsets,
            neighbors,
            weights,
            protein_ids: self.protein_ids,
            id_to_index: self.id_to_index,
        }
    }
}
