use anyhow::{bail, Result};
use clap::Parser;

use ppi_cluster_analyzer::cluster::ClusterInspection;
use ppi_cluster_analyzer::config::{CandidateOrder, Config, UnknownProteinPolicy};
use ppi_cluster_analyzer::data;
use ppi_cluster_analyzer::graph::DegreeIndex;
use ppi_cluster_analyzer::storage::{self, ClusterFailure};

#[derive(Parser, Debug)]
#[clap(
    name = "ppi-cluster-analyzer",
    about = "Connectivity analysis of protein interaction network clusters"
)]
struct Cli {
    /// Path to the weighted edge list (`protein protein [weight]` per line)
    #[clap(long)]
    network: String,

    /// Path to a module file (`id score protein...` per line)
    #[clap(long, conflicts_with = "cluster_json", required_unless_present = "cluster_json")]
    clusters: Option<String>,

    /// Path to a JSON object mapping proteins to cluster ids
    #[clap(long)]
    cluster_json: Option<String>,

    /// Output directory for results
    #[clap(long, default_value = "cluster_results")]
    output_dir: String,

    /// Minimum number of edges a candidate needs into a cluster
    #[clap(long, default_value = "3")]
    min_connections: usize,

    /// Stop after this many connected candidates per cluster
    #[clap(long)]
    max_candidates: Option<usize>,

    /// Minimum number of components a bridge must touch
    #[clap(long, default_value = "2")]
    min_components: usize,

    /// Ignore candidates with a degree above this value
    #[clap(long)]
    max_candidate_degree: Option<usize>,

    /// Candidate scanning order by degree
    #[clap(long, value_enum, default_value = "descending")]
    candidate_order: CandidateOrder,

    /// What to do with proteins missing from the network
    #[clap(long, value_enum, default_value = "fail")]
    unknown_proteins: UnknownProteinPolicy,

    /// Reject cluster sets where a protein belongs to several clusters
    #[clap(long)]
    disjoint: bool,

    /// Abort the run on the first cluster that fails
    #[clap(long)]
    fail_fast: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = Config::new(
        args.unknown_proteins,
        args.candidate_order,
        args.min_connections,
        args.max_candidates,
        args.min_components,
    )
    .with_max_candidate_degree(args.max_candidate_degree)
    .with_disjoint_clusters(args.disjoint);

    log::info!("Starting cluster connectivity analysis");
    log::debug!("Configuration: {:?}", config);

    // 1. Load data
    let graph = data::edgelist::load_edge_list(&args.network)?;
    log::info!("Graph uses about {} bytes", graph.memory_usage());

    let clusters = match (&args.clusters, &args.cluster_json) {
        (Some(path), _) => data::clusters::load_cluster_file(path)?,
        (None, Some(path)) => data::clusters::load_cluster_json(path)?,
        (None, None) => bail!("either --clusters or --cluster-json is required"),
    };

    if config.require_disjoint_clusters {
        clusters.validate_disjoint()?;
    }

    // 2. Rank proteins by degree
    let degrees = DegreeIndex::new(&graph);
    if let Some((protein, degree)) = degrees.entry_at(0) {
        log::info!("Highest degree protein: {} ({})", protein, degree);
    }

    // 3. Inspect every cluster
    let inspection = ClusterInspection::new(&graph, &degrees, config.clone());
    let mut reports = Vec::with_capacity(clusters.len());
    let mut failures = Vec::new();

    for (cluster, result) in clusters.iter().zip(inspection.inspect_all(&clusters)) {
        match result {
            Ok(report) => {
                if report.component_count > 1 {
                    log::info!(
                        "Cluster {} has {} components and {} bridging proteins",
                        report.cluster_id,
                        report.component_count,
                        report.bridges.len()
                    );
                }
                reports.push(report);
            }
            Err(err) if args.fail_fast => {
                return Err(anyhow::Error::new(err).context(format!("cluster {}", cluster.id)));
            }
            Err(err) => {
                log::error!("Skipping cluster {}: {}", cluster.id, err);
                failures.push(ClusterFailure {
                    cluster_id: cluster.id.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    // 4. Save results
    storage::save_results(&reports, &failures, &graph, &config, &args.output_dir)?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
