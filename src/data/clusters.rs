//! Cluster membership file handling

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use itertools::Itertools;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::cluster::{Cluster, ClusterSet};

/// Cluster identifier as found in a JSON membership map
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(untagged)]
enum ClusterKey {
    Number(u64),
    Name(String),
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterKey::Number(n) => write!(f, "{}", n),
            ClusterKey::Name(name) => write!(f, "{}", name),
        }
    }
}

fn open(path: &str) -> Result<BufReader<File>> {
    if !Path::new(path).exists() {
        return Err(anyhow!("File not found: {}", path));
    }
    let file = File::open(path).with_context(|| format!("opening cluster file '{}'", path))?;
    Ok(BufReader::new(file))
}

/// Load clusters from a module file with one cluster per line:
/// `cluster_id score protein protein ...`, whitespace separated.
pub fn load_cluster_file(path: &str) -> Result<ClusterSet> {
    log::info!("Reading cluster file: {}", path);
    let clusters = parse_cluster_lines(open(path)?)
        .with_context(|| format!("parsing cluster file '{}'", path))?;
    log::info!("Loaded {} clusters", clusters.len());
    Ok(clusters)
}

/// Parse module lines from any buffered reader. The score column is
/// validated but not used.
pub fn parse_cluster_lines<R: BufRead>(reader: R) -> Result<ClusterSet> {
    let mut clusters = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (id, score) = match (fields.next(), fields.next()) {
            (Some(id), Some(score)) => (id, score),
            _ => return Err(anyhow!("line {}: expected a cluster id and a score", line_no + 1)),
        };
        score
            .parse::<f64>()
            .with_context(|| format!("line {}: invalid score '{}'", line_no + 1, score))?;

        clusters.push(Cluster::new(id, fields));
    }

    Ok(ClusterSet::new(clusters))
}

/// Load clusters from a JSON object mapping each protein to its cluster id
pub fn load_cluster_json(path: &str) -> Result<ClusterSet> {
    log::info!("Reading cluster dictionary: {}", path);
    let clusters = parse_cluster_json(open(path)?)
        .with_context(|| format!("parsing cluster dictionary '{}'", path))?;
    log::info!("Loaded {} clusters", clusters.len());
    Ok(clusters)
}

/// Parse a `{protein: cluster_id}` JSON object.
///
/// Clusters are ordered by id (numeric ids first, in numeric order).
/// Members keep the order in which they appear in the document.
pub fn parse_cluster_json<R: Read>(reader: R) -> Result<ClusterSet> {
    let membership: Map<String, Value> = serde_json::from_reader(reader)?;

    let clusters = membership
        .into_iter()
        .map(|(protein, key)| {
            let key = serde_json::from_value::<ClusterKey>(key)
                .with_context(|| format!("invalid cluster id for protein '{}'", protein))?;
            Ok((key, protein))
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .into_group_map()
        .into_iter()
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .map(|(key, proteins)| Cluster::new(key.to_string(), proteins))
        .collect();

    Ok(ClusterSet::new(clusters))
}
