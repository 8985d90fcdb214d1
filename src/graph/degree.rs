//! Degree ranking of every protein in a graph snapshot

use std::collections::HashMap;

use crate::config::CandidateOrder;
use crate::graph::InteractionGraph;

/// Proteins of an [`InteractionGraph`] ranked by degree.
///
/// Ranking is descending by degree; ties keep graph construction order, so
/// the index is reproducible for a given graph. The index is built once and
/// never updated; rebuild it if the graph is rebuilt.
#[derive(Debug, Clone)]
pub struct DegreeIndex {
    ranked: Vec<(String, usize)>,

    /// Rank of every protein in `ranked`
    rank_of: HashMap<String, usize>,
}

impl DegreeIndex {
    /// Compute every degree and rank the proteins
    pub fn new(graph: &InteractionGraph) -> Self {
        let mut ranked: Vec<(String, usize)> = graph
            .proteins()
            .iter()
            .enumerate()
            .map(|(node, id)| (id.clone(), graph.node_degree(node as u32)))
            .collect();

        // Stable sort keeps construction order among equal degrees
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let rank_of = ranked
            .iter()
            .enumerate()
            .map(|(rank, (id, _))| (id.clone(), rank))
            .collect();

        Self { ranked, rank_of }
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// (protein, degree) pairs, highest degree first
    pub fn ranked_descending(&self) -> &[(String, usize)] {
        &self.ranked
    }

    /// Protein identifiers, lowest degree first.
    ///
    /// This is the exact reverse of [`DegreeIndex::ranked_descending`], so
    /// among equal degrees the later-constructed protein comes first.
    pub fn ranked_ascending_proteins(&self) -> Vec<&str> {
        self.ranked.iter().rev().map(|(id, _)| id.as_str()).collect()
    }

    /// Protein identifiers, highest degree first
    pub fn ranked_descending_proteins(&self) -> Vec<&str> {
        self.ranked.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Candidate scanning order for bridge searches
    pub fn candidates(&self, order: CandidateOrder) -> Vec<&str> {
        self.candidate_entries(order)
            .into_iter()
            .map(|(id, _)| id)
            .collect()
    }

    /// (protein, degree) pairs in candidate scanning order
    pub fn candidate_entries(&self, order: CandidateOrder) -> Vec<(&str, usize)> {
        let entries = self.ranked.iter().map(|(id, degree)| (id.as_str(), *degree));
        match order {
            CandidateOrder::Descending => entries.collect(),
            CandidateOrder::Ascending => entries.rev().collect(),
        }
    }

    /// (protein, degree) at a rank in descending order
    pub fn entry_at(&self, rank: usize) -> Option<(&str, usize)> {
        self.ranked.get(rank).map(|(id, degree)| (id.as_str(), *degree))
    }

    /// Protein at a rank in descending order
    pub fn protein_at(&self, rank: usize) -> Option<&str> {
        self.entry_at(rank).map(|(id, _)| id)
    }

    /// Degree recorded for a protein, if it is indexed
    pub fn degree_of(&self, protein: &str) -> Option<usize> {
        self.rank_of.get(protein).map(|&rank| self.ranked[rank].1)
    }
}
