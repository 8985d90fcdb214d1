//! Connected component labeling of induced cluster subgraphs

use std::collections::HashMap;

use serde::Serialize;

use crate::graph::InducedSubgraph;

/// Union-Find over subgraph positions
struct DisjointSets {
    /// Parent pointers (parent[i] = parent of position i)
    parent: Vec<usize>,

    /// Size of each set (for union by size)
    size: Vec<usize>,
}

impl DisjointSets {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
        }
    }

    /// Find the root of the set containing x with path halving
    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Union the sets containing x and y
    fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Attach smaller tree under root of larger tree
        if self.size[root_x] >= self.size[root_y] {
            self.parent[root_y] = root_x;
            self.size[root_x] += self.size[root_y];
        } else {
            self.parent[root_x] = root_y;
            self.size[root_y] += self.size[root_x];
        }
    }
}

/// Connected components of one induced subgraph.
///
/// Labels are numbered by first appearance in position order: the component
/// holding position 0 is component 0, the next component to appear is 1, etc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentLabeling {
    component_count: usize,
    labels: Vec<usize>,
}

impl ComponentLabeling {
    /// Number of components
    pub fn component_count(&self) -> usize {
        self.component_count
    }

    /// Component label of every position
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Component label of a position
    pub fn label_of(&self, position: usize) -> usize {
        self.labels[position]
    }

    /// True when the whole cluster is one component
    pub fn is_connected(&self) -> bool {
        self.component_count == 1
    }

    /// Positions of each component, in position order
    pub fn component_positions(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.component_count];
        for (position, &label) in self.labels.iter().enumerate() {
            groups[label].push(position);
        }
        groups
    }

    /// Protein lists of each component, in cluster order
    pub fn components<'g>(&self, subgraph: &InducedSubgraph<'g>) -> Vec<Vec<&'g str>> {
        self.component_positions()
            .into_iter()
            .map(|positions| positions.into_iter().map(|p| subgraph.protein_at(p)).collect())
            .collect()
    }

    /// Component label of every protein in the subgraph
    pub fn protein_labels<'g>(&self, subgraph: &InducedSubgraph<'g>) -> HashMap<&'g str, usize> {
        self.labels
            .iter()
            .enumerate()
            .map(|(position, &label)| (subgraph.protein_at(position), label))
            .collect()
    }
}

/// Computes connected components of induced subgraphs
#[derive(Debug, Default, Clone, Copy)]
pub struct ComponentLabeler;

impl ComponentLabeler {
    /// Label every position of the subgraph with its component
    pub fn label(subgraph: &InducedSubgraph) -> ComponentLabeling {
        let n = subgraph.size();
        let mut sets = DisjointSets::new(n);

        for (i, j) in subgraph.edges() {
            sets.union(i, j);
        }

        // Renumber roots in order of first appearance
        let mut root_to_label: HashMap<usize, usize> = HashMap::new();
        let mut labels = Vec::with_capacity(n);
        for position in 0..n {
            let root = sets.find(position);
            let next = root_to_label.len();
            labels.push(*root_to_label.entry(root).or_insert(next));
        }

        ComponentLabeling {
            component_count: root_to_label.len(),
            labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBuilder, InteractionGraph};
    use petgraph::graph::UnGraph;

    fn build_graph(edges: &[(&str, &str)], extra: &[&str]) -> InteractionGraph {
        let mut builder = GraphBuilder::with_capacity(8);
        for (a, b) in edges {
            builder.add_edge(a, b, 1.0).unwrap();
        }
        for p in extra {
            builder.add_protein(p);
        }
        builder.build()
    }

    #[test]
    fn two_components() {
        let graph = build_graph(&[("A", "B"), ("C", "D")], &[]);
        let sub = InducedSubgraph::new(&graph, &["A", "B", "C", "D"]).unwrap();
        let labeling = ComponentLabeler::label(&sub);

        assert_eq!(labeling.component_count(), 2);
        assert_eq!(labeling.labels(), &[0, 0, 1, 1]);
        assert_eq!(labeling.components(&sub), vec![vec!["A", "B"], vec!["C", "D"]]);
        assert!(!labeling.is_connected());
    }

    #[test]
    fn outside_edges_do_not_connect() {
        // A and C only meet through E, which is outside the cluster
        let graph = build_graph(&[("A", "E"), ("E", "C")], &[]);
        let sub = InducedSubgraph::new(&graph, &["A", "C"]).unwrap();
        assert_eq!(ComponentLabeler::label(&sub).component_count(), 2);
    }

    #[test]
    fn labels_follow_position_order() {
        let graph = build_graph(&[("A", "B"), ("C", "D")], &["E"]);
        let sub = InducedSubgraph::new(&graph, &["E", "D", "A", "C", "B"]).unwrap();
        let labeling = ComponentLabeler::label(&sub);
        assert_eq!(labeling.labels(), &[0, 1, 2, 1, 2]);

        let by_protein = labeling.protein_labels(&sub);
        assert_eq!(by_protein["C"], by_protein["D"]);
        assert_ne!(by_protein["A"], by_protein["E"]);
    }

    #[test]
    fn single_and_empty_clusters() {
        let graph = build_graph(&[("A", "B")], &[]);
        let single = InducedSubgraph::new(&graph, &["A"]).unwrap();
        let labeling = ComponentLabeler::label(&single);
        assert_eq!(labeling.component_count(), 1);
        assert!(labeling.is_connected());

        let none: [&str; 0] = [];
        let empty = InducedSubgraph::new(&graph, &none).unwrap();
        let labeling = ComponentLabeler::label(&empty);
        assert_eq!(labeling.component_count(), 0);
        assert!(labeling.labels().is_empty());
    }

    #[test]
    fn relabeling_is_idempotent() {
        let graph = build_graph(&[("A", "B"), ("B", "C"), ("D", "E"), ("F", "G")], &[]);
        let sub = InducedSubgraph::new(&graph, &["G", "A", "E", "C", "F", "D", "B"]).unwrap();
        let first = ComponentLabeler::label(&sub);
        for _ in 0..5 {
            assert_eq!(ComponentLabeler::label(&sub), first);
        }
    }

    #[test]
    fn count_matches_petgraph() {
        let edges = [
            ("P1", "P2"),
            ("P2", "P3"),
            ("P4", "P5"),
            ("P6", "P7"),
            ("P7", "P8"),
            ("P8", "P6"),
            ("P3", "P9"),
        ];
        let graph = build_graph(&edges, &["P10"]);
        let members = ["P1", "P2", "P4", "P5", "P6", "P7", "P8", "P9", "P10"];
        let sub = InducedSubgraph::new(&graph, &members).unwrap();

        let mut reference = UnGraph::<(), ()>::new_undirected();
        let nodes: Vec<_> = (0..sub.size()).map(|_| reference.add_node(())).collect();
        for (i, j) in sub.edges() {
            reference.add_edge(nodes[i], nodes[j], ());
        }

        let labeling = ComponentLabeler::label(&sub);
        assert_eq!(
            labeling.component_count(),
            petgraph::algo::connected_components(&reference)
        );
        for (i, j) in sub.edges() {
            assert_eq!(labeling.label_of(i), labeling.label_of(j));
        }
    }
}
