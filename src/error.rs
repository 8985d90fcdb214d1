//! Error taxonomy for graph and cluster analysis

use thiserror::Error;

/// Errors raised by the analysis core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A protein referenced in a query is not part of the interaction graph
    #[error("unknown protein '{0}'")]
    UnknownProtein(String),

    /// A cluster member could not be found while inducing its subgraph
    #[error("cluster member '{0}' is missing from the interaction graph")]
    MissingProtein(String),

    /// A cluster lists the same protein more than once
    #[error("protein '{0}' appears more than once in the cluster")]
    DuplicateProtein(String),

    /// An edge record with an invalid or conflicting weight
    #[error("malformed edge {a} - {b}: {reason}")]
    MalformedEdge {
        a: String,
        b: String,
        reason: String,
    },

    /// A component labeling used with a subgraph it was not computed for
    #[error("labeling covers {labeled} positions but the cluster has {size}")]
    LabelingMismatch { labeled: usize, size: usize },

    /// A protein belongs to two clusters while disjoint clusters are required
    #[error("protein '{protein}' belongs to clusters {first} and {second}")]
    OverlappingClusters {
        protein: String,
        first: String,
        second: String,
    },
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
