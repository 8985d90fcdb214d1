//! Results persistence module

use anyhow::Result;
use serde::Serialize;
use serde_json::{json, to_string_pretty};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::cluster::ClusterReport;
use crate::config::Config;
use crate::graph::InteractionGraph;

/// A cluster whose analysis failed
#[derive(Debug, Clone, Serialize)]
pub struct ClusterFailure {
    pub cluster_id: String,
    pub error: String,
}

/// Save analysis results to the specified directory
pub fn save_results(
    reports: &[ClusterReport],
    failures: &[ClusterFailure],
    graph: &InteractionGraph,
    config: &Config,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} cluster reports to {}", reports.len(), output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(reports, failures, graph, config, output_dir)?;
    save_clusters(reports, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save summary information
fn save_summary(
    reports: &[ClusterReport],
    failures: &[ClusterFailure],
    graph: &InteractionGraph,
    config: &Config,
    output_dir: &str,
) -> Result<()> {
    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let fragmented = reports.iter().filter(|r| r.component_count > 1).count();
    let bridged = reports
        .iter()
        .filter(|r| r.bridges.iter().any(|b| b.connects_all))
        .count();
    let avg_degree = if graph.protein_count() == 0 {
        0.0
    } else {
        2.0 * graph.edge_count() as f64 / graph.protein_count() as f64
    };

    let summary = json!({
        "graph_stats": {
            "protein_count": graph.protein_count(),
            "edge_count": graph.edge_count(),
            "avg_degree": avg_degree,
        },
        "cluster_stats": {
            "analyzed": reports.len(),
            "failed": failures.len(),
            "empty": reports.iter().filter(|r| r.empty).count(),
            "connected": reports.iter().filter(|r| r.is_connected()).count(),
            "fragmented": fragmented,
            "fully_bridged": bridged,
            "skipped_proteins": reports.iter().map(|r| r.skipped_proteins.len()).sum::<usize>(),
        },
        "config": config,
        "failures": failures,
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Keep cluster ids usable as file names
fn file_stem(cluster_id: &str) -> String {
    cluster_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Save individual cluster information
fn save_clusters(reports: &[ClusterReport], output_dir: &str) -> Result<()> {
    let clusters_dir = Path::new(output_dir).join("clusters");
    fs::create_dir_all(&clusters_dir)?;

    // Ids that sanitize to the same stem get a numeric suffix
    let mut used_stems = HashSet::with_capacity(reports.len());
    for report in reports {
        let base = file_stem(&report.cluster_id);
        let mut stem = base.clone();
        let mut suffix = 2;
        while !used_stems.insert(stem.clone()) {
            stem = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        if stem != base {
            log::warn!(
                "Cluster id {} collides with another file name, writing cluster_{}.json",
                report.cluster_id,
                stem
            );
        }

        let path = clusters_dir.join(format!("cluster_{}.json", stem));
        let mut file = File::create(path)?;
        file.write_all(to_string_pretty(report)?.as_bytes())?;
    }

    // Create a JSON file with all clusters
    let all_clusters_path = Path::new(output_dir).join("all_clusters.json");
    let mut all_clusters_file = File::create(all_clusters_path)?;

    let clusters_json = json!({
        "clusters": reports.iter().map(|r| {
            json!({
                "id": r.cluster_id,
                "size": r.size,
                "component_count": r.component_count,
                "connected_candidates": r.connected_candidates.len(),
                "bridges": r.bridges.iter().map(|b| &b.protein).collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>()
    });

    all_clusters_file.write_all(to_string_pretty(&clusters_json)?.as_bytes())?;

    Ok(())
}
