//! Subgraph induced by one cluster's protein list

use std::collections::HashMap;

use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::InteractionGraph;

/// View of an [`InteractionGraph`] restricted to the proteins of one cluster.
///
/// Positions follow the cluster's listing order: position 0 is the first
/// listed protein. Only edges with both endpoints inside the cluster are
/// visible through this view.
#[derive(Debug, Clone)]
pub struct InducedSubgraph<'g> {
    graph: &'g InteractionGraph,

    /// Graph node index of every position
    nodes: Vec<u32>,

    /// Mapping from graph node index back to position
    node_to_position: HashMap<u32, usize>,
}

impl<'g> InducedSubgraph<'g> {
    /// Induce the subgraph of the given proteins, keeping their order
    pub fn new<S: AsRef<str>>(graph: &'g InteractionGraph, proteins: &[S]) -> AnalysisResult<Self> {
        let mut nodes = Vec::with_capacity(proteins.len());
        let mut node_to_position = HashMap::with_capacity(proteins.len());

        for (position, protein) in proteins.iter().enumerate() {
            let protein = protein.as_ref();
            let node = graph
                .index_of(protein)
                .ok_or_else(|| AnalysisError::MissingProtein(protein.to_string()))?;

            if node_to_position.insert(node, position).is_some() {
                return Err(AnalysisError::DuplicateProtein(protein.to_string()));
            }
            nodes.push(node);
        }

        Ok(Self {
            graph,
            nodes,
            node_to_position,
        })
    }

    /// The graph this view was induced from
    pub fn graph(&self) -> &'g InteractionGraph {
        self.graph
    }

    /// Number of positions (= cluster length)
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Protein identifiers in position order
    pub fn positions(&self) -> Vec<&'g str> {
        let graph = self.graph;
        self.nodes.iter().map(|&n| graph.protein_id(n)).collect()
    }

    /// Protein identifier at a position
    pub fn protein_at(&self, position: usize) -> &'g str {
        self.graph.protein_id(self.nodes[position])
    }

    /// Graph node index at a position
    pub fn node_at(&self, position: usize) -> u32 {
        self.nodes[position]
    }

    /// Position of a graph node, if it belongs to this subgraph
    pub fn position_of_node(&self, node: u32) -> Option<usize> {
        self.node_to_position.get(&node).copied()
    }

    /// Position of a protein, if it belongs to this subgraph
    pub fn position_of(&self, protein: &str) -> Option<usize> {
        self.graph
            .index_of(protein)
            .and_then(|node| self.position_of_node(node))
    }

    /// Whether the two positions interact in the underlying graph
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.graph.has_edge_between(self.nodes[i], self.nodes[j])
    }

    /// Internal edges as (i, j) position pairs with i < j
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.iter().enumerate().flat_map(move |(i, &node)| {
            self.graph
                .neighbors(node)
                .iter()
                .filter_map(move |n| self.position_of_node(*n))
                .filter(move |&j| i < j)
                .map(move |j| (i, j))
        })
    }

    /// Number of internal edges
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn build_graph() -> InteractionGraph {
        let mut builder = GraphBuilder::with_capacity(5);
        builder.add_edge("A", "B", 1.0).unwrap();
        builder.add_edge("C", "D", 1.0).unwrap();
        builder.add_edge("E", "A", 1.0).unwrap();
        builder.add_edge("E", "C", 1.0).unwrap();
        builder.build()
    }

    #[test]
    fn keeps_cluster_order() {
        let graph = build_graph();
        let sub = InducedSubgraph::new(&graph, &["D", "A", "C"]).unwrap();
        assert_eq!(sub.size(), 3);
        assert_eq!(sub.positions(), vec!["D", "A", "C"]);
        assert_eq!(sub.position_of("C"), Some(2));
        assert_eq!(sub.position_of("B"), None);
        assert!(sub.has_edge(0, 2));
        assert!(!sub.has_edge(0, 1));
    }

    #[test]
    fn only_internal_edges_are_visible() {
        let graph = build_graph();
        let sub = InducedSubgraph::new(&graph, &["A", "B", "C", "D"]).unwrap();
        let edges: Vec<(usize, usize)> = sub.edges().collect();
        assert_eq!(edges, vec![(0, 1), (2, 3)]);
        assert_eq!(sub.edge_count(), 2);
    }

    #[test]
    fn missing_and_duplicate_members_fail() {
        let graph = build_graph();
        assert_eq!(
            InducedSubgraph::new(&graph, &["A", "X"]).unwrap_err(),
            AnalysisError::MissingProtein("X".to_string())
        );
        assert_eq!(
            InducedSubgraph::new(&graph, &["A", "A"]).unwrap_err(),
            AnalysisError::DuplicateProtein("A".to_string())
        );
    }

    #[test]
    fn empty_cluster_is_allowed() {
        let graph = build_graph();
        let members: Vec<String> = Vec::new();
        let sub = InducedSubgraph::new(&graph, &members).unwrap();
        assert!(sub.is_empty());
        assert_eq!(sub.edges().count(), 0);
    }
}
