//! Per-cluster connectivity inspection

use rayon::prelude::*;
use serde::Serialize;

use crate::cluster::bridge::{BridgeAnalyzer, BridgeCandidate};
use crate::cluster::components::ComponentLabeler;
use crate::cluster::{Cluster, ClusterSet};
use crate::config::Config;
use crate::error::AnalysisResult;
use crate::graph::{DegreeIndex, InducedSubgraph, InteractionGraph};

/// Below this many clusters the batch runs sequentially
const PARALLEL_THRESHOLD: usize = 16;

/// Connectivity findings for one cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterReport {
    pub cluster_id: String,

    /// Number of proteins listed for the cluster
    pub size: usize,

    /// Listed proteins that were absent from the graph and skipped
    pub skipped_proteins: Vec<String>,

    /// True when no member of the cluster could be analyzed
    pub empty: bool,

    pub component_count: usize,

    /// Member proteins of each component, in cluster order
    pub components: Vec<Vec<String>>,

    /// Outside proteins with at least the configured number of edges into the cluster
    pub connected_candidates: Vec<String>,

    /// Connected candidates that would merge separate components
    pub bridges: Vec<BridgeCandidate>,
}

impl ClusterReport {
    pub fn is_connected(&self) -> bool {
        self.component_count == 1
    }
}

/// Runs the connectivity pipeline over clusters of one interaction graph
pub struct ClusterInspection<'g> {
    graph: &'g InteractionGraph,
    degrees: &'g DegreeIndex,
    config: Config,
}

impl<'g> ClusterInspection<'g> {
    pub fn new(graph: &'g InteractionGraph, degrees: &'g DegreeIndex, config: Config) -> Self {
        Self {
            graph,
            degrees,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Candidate proteins in configured scanning order, hubs above the
    /// configured degree limit removed
    pub fn candidate_pool(&self) -> Vec<&'g str> {
        let degrees = self.degrees;
        let max_degree = self.config.max_candidate_degree;
        degrees
            .candidate_entries(self.config.candidate_order)
            .into_iter()
            .filter(|&(_, degree)| max_degree.map_or(true, |max| degree <= max))
            .map(|(protein, _)| protein)
            .collect()
    }

    /// Candidate pool with the members of `subgraph` removed
    pub fn outside_pool(&self, subgraph: &InducedSubgraph) -> Vec<&'g str> {
        self.candidate_pool()
            .into_iter()
            .filter(|protein| subgraph.position_of(protein).is_none())
            .collect()
    }

    /// Analyze one cluster: induce its subgraph, label components and, when
    /// it is fragmented, search for bridging proteins
    pub fn inspect(&self, cluster: &Cluster) -> AnalysisResult<ClusterReport> {
        let (members, skipped_proteins) = cluster.resolve(self.graph, self.config.unknown_protein_policy)?;

        let mut report = ClusterReport {
            cluster_id: cluster.id.clone(),
            size: cluster.len(),
            skipped_proteins,
            empty: members.is_empty(),
            component_count: 0,
            components: Vec::new(),
            connected_candidates: Vec::new(),
            bridges: Vec::new(),
        };

        if report.empty {
            log::warn!("Cluster {} has no members to analyze", cluster.id);
            return Ok(report);
        }

        let subgraph = InducedSubgraph::new(self.graph, &members)?;
        let labeling = ComponentLabeler::label(&subgraph);

        report.component_count = labeling.component_count();
        report.components = labeling
            .components(&subgraph)
            .into_iter()
            .map(|c| c.into_iter().map(str::to_string).collect())
            .collect();

        log::debug!(
            "Cluster {} has {} components: {:?}",
            cluster.id,
            report.component_count,
            report.components
        );

        if labeling.is_connected() {
            log::debug!("Cluster {} is fully connected, skipping bridge search", cluster.id);
            return Ok(report);
        }

        let analyzer = BridgeAnalyzer::new(self.graph);
        let connected = analyzer.find_connected_candidates(
            self.outside_pool(&subgraph),
            &subgraph,
            self.config.min_connections,
            self.config.max_candidates,
        )?;

        report.bridges = analyzer.bridging_candidates(
            connected.iter().copied(),
            &subgraph,
            &labeling,
            self.config.min_components,
        )?;
        report.connected_candidates = connected.into_iter().map(str::to_string).collect();

        for bridge in &report.bridges {
            if bridge.connects_all {
                log::debug!(
                    "Protein {} (degree {}) connects all {} components of cluster {}",
                    bridge.protein,
                    bridge.degree,
                    report.component_count,
                    cluster.id
                );
            } else {
                log::debug!(
                    "Protein {} (degree {}) connects components {:?} of cluster {}",
                    bridge.protein,
                    bridge.degree,
                    bridge.touched_components,
                    cluster.id
                );
            }
        }

        Ok(report)
    }

    /// Analyze every cluster. Results keep the order of `clusters`; a failure
    /// in one cluster does not stop the others.
    pub fn inspect_all(&self, clusters: &ClusterSet) -> Vec<AnalysisResult<ClusterReport>> {
        log::info!("Inspecting {} clusters", clusters.len());

        if clusters.len() < PARALLEL_THRESHOLD {
            return clusters.iter().map(|c| self.inspect(c)).collect();
        }

        clusters
            .clusters
            .par_iter()
            .map(|c| self.inspect(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CandidateOrder, UnknownProteinPolicy};
    use crate::error::AnalysisError;
    use crate::graph::GraphBuilder;

    fn build_graph() -> InteractionGraph {
        let mut builder = GraphBuilder::with_capacity(8);
        for (a, b) in [
            ("A", "B"),
            ("C", "D"),
            ("E", "A"),
            ("E", "C"),
            ("E", "H"),
            ("F", "A"),
            ("F", "B"),
            ("F", "C"),
            ("G", "A"),
            ("G", "B"),
        ] {
            builder.add_edge(a, b, 1.0).unwrap();
        }
        builder.build()
    }

    fn config(min_connections: usize) -> Config {
        Config::new(
            UnknownProteinPolicy::Fail,
            CandidateOrder::Descending,
            min_connections,
            None,
            2,
        )
    }

    #[test]
    fn fragmented_cluster_reports_bridges() {
        let graph = build_graph();
        let degrees = DegreeIndex::new(&graph);
        let inspection = ClusterInspection::new(&graph, &degrees, config(2));

        let report = inspection
            .inspect(&Cluster::new("0", ["A", "B", "C", "D"]))
            .unwrap();

        assert_eq!(report.component_count, 2);
        assert_eq!(report.components, vec![vec!["A", "B"], vec!["C", "D"]]);
        // E, F and G each have two or more edges into the cluster
        let mut connected = report.connected_candidates.clone();
        connected.sort();
        assert_eq!(connected, vec!["E", "F", "G"]);
        // G touches only the A-B component
        let bridges: Vec<&str> = report.bridges.iter().map(|b| b.protein.as_str()).collect();
        assert_eq!(bridges, vec!["E", "F"]);
        assert!(report.bridges.iter().all(|b| b.connects_all));
    }

    #[test]
    fn connected_cluster_skips_search() {
        let graph = build_graph();
        let degrees = DegreeIndex::new(&graph);
        let inspection = ClusterInspection::new(&graph, &degrees, config(1));

        let report = inspection.inspect(&Cluster::new("1", ["A"])).unwrap();
        assert!(report.is_connected());
        assert!(report.connected_candidates.is_empty());
        assert!(report.bridges.is_empty());
    }

    #[test]
    fn unknown_members_follow_policy() {
        let graph = build_graph();
        let degrees = DegreeIndex::new(&graph);
        let cluster = Cluster::new("2", ["A", "Q", "C"]);

        let strict = ClusterInspection::new(&graph, &degrees, config(2));
        assert_eq!(
            strict.inspect(&cluster),
            Err(AnalysisError::UnknownProtein("Q".to_string()))
        );

        let mut lenient_config = config(2);
        lenient_config.unknown_protein_policy = UnknownProteinPolicy::Skip;
        let lenient = ClusterInspection::new(&graph, &degrees, lenient_config);
        let report = lenient.inspect(&cluster).unwrap();
        assert_eq!(report.skipped_proteins, vec!["Q".to_string()]);
        assert_eq!(report.size, 3);
        assert_eq!(report.component_count, 2);
    }

    #[test]
    fn empty_cluster_is_not_an_error() {
        let graph = build_graph();
        let degrees = DegreeIndex::new(&graph);
        let inspection = ClusterInspection::new(&graph, &degrees, config(2));

        let none: [&str; 0] = [];
        let report = inspection.inspect(&Cluster::new("3", none)).unwrap();
        assert!(report.empty);
        assert_eq!(report.component_count, 0);
        assert!(report.bridges.is_empty());
    }

    #[test]
    fn degree_limit_and_result_cap() {
        let graph = build_graph();
        let degrees = DegreeIndex::new(&graph);

        // E has degree 3, F degree 3, G degree 2
        let limited = ClusterInspection::new(
            &graph,
            &degrees,
            config(2).with_max_candidate_degree(Some(2)),
        );
        assert!(!limited.candidate_pool().contains(&"E"));
        let report = limited.inspect(&Cluster::new("0", ["A", "B", "C", "D"])).unwrap();
        assert_eq!(report.connected_candidates, vec!["G"]);
        assert!(report.bridges.is_empty());

        let mut capped_config = config(2);
        capped_config.max_candidates = Some(1);
        let capped = ClusterInspection::new(&graph, &degrees, capped_config);
        let report = capped.inspect(&Cluster::new("0", ["A", "B", "C", "D"])).unwrap();
        assert_eq!(report.connected_candidates.len(), 1);
    }

    #[test]
    fn members_never_fill_the_candidate_cap() {
        let mut builder = GraphBuilder::with_capacity(5);
        for (a, b) in [("A", "B"), ("C", "D"), ("E", "A"), ("E", "C")] {
            builder.add_edge(a, b, 1.0).unwrap();
        }
        let graph = builder.build();
        let degrees = DegreeIndex::new(&graph);
        let inspection = ClusterInspection::new(
            &graph,
            &degrees,
            Config::new(
                UnknownProteinPolicy::Fail,
                CandidateOrder::Descending,
                0,
                Some(2),
                2,
            ),
        );

        let report = inspection
            .inspect(&Cluster::new("0", ["A", "B", "C", "D"]))
            .unwrap();
        for member in ["A", "B", "C", "D"] {
            assert!(!report.connected_candidates.iter().any(|p| p == member));
        }
        assert_eq!(report.connected_candidates, vec!["E"]);
        assert_eq!(report.bridges.len(), 1);
        assert_eq!(report.bridges[0].protein, "E");
    }

    #[test]
    fn batch_keeps_cluster_order() {
        let graph = build_graph();
        let degrees = DegreeIndex::new(&graph);
        let inspection = ClusterInspection::new(&graph, &degrees, config(2));

        let clusters: Vec<Cluster> = (0..40)
            .map(|i| {
                if i % 2 == 0 {
                    Cluster::new(i.to_string(), ["A", "B", "C", "D"])
                } else {
                    Cluster::new(i.to_string(), ["A", "Z"])
                }
            })
            .collect();
        let results = inspection.inspect_all(&ClusterSet::new(clusters));

        assert_eq!(results.len(), 40);
        for (i, result) in results.iter().enumerate() {
            match result {
                Ok(report) => {
                    assert_eq!(i % 2, 0);
                    assert_eq!(report.cluster_id, i.to_string());
                }
                Err(err) => {
                    assert_eq!(i % 2, 1);
                    assert_eq!(err, &AnalysisError::UnknownProtein("Z".to_string()));
                }
            }
        }
    }
}
