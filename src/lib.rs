//! Connectivity analysis of protein interaction clusters: finds clusters that
//! fall apart into disconnected components and the outside proteins that
//! would bridge them back together.

pub mod config;
pub mod error;
pub mod data;
pub mod graph;
pub mod cluster;
pub mod storage;

pub use anyhow::{Result, anyhow};
pub use error::AnalysisError;
