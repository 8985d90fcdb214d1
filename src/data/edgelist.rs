//! Edge-list file handling for interaction graphs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::graph::{GraphBuilder, InteractionGraph};

/// Weight given to edge records without a weight column
const DEFAULT_WEIGHT: f64 = 1.0;

/// Load an interaction graph from a whitespace-separated edge list.
///
/// Each line holds `protein_a protein_b [weight]`. Blank lines and lines
/// starting with `#` are ignored.
pub fn load_edge_list(path: &str) -> Result<InteractionGraph> {
    log::info!("Reading edge list: {}", path);

    if !Path::new(path).exists() {
        return Err(anyhow!("File not found: {}", path));
    }

    let file = File::open(path).with_context(|| format!("opening edge list '{}'", path))?;
    let graph = parse_edge_list(BufReader::new(file))
        .with_context(|| format!("parsing edge list '{}'", path))?;

    log::info!(
        "Loaded graph with {} proteins and {} interactions",
        graph.protein_count(),
        graph.edge_count()
    );

    Ok(graph)
}

/// Parse an edge list from any buffered reader
pub fn parse_edge_list<R: BufRead>(reader: R) -> Result<InteractionGraph> {
    let mut builder = GraphBuilder::with_capacity(1024);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let (a, b, weight) = match fields.as_slice() {
            [a, b] => (*a, *b, DEFAULT_WEIGHT),
            [a, b, w] => {
                let weight: f64 = w
                    .parse()
                    .with_context(|| format!("line {}: invalid weight '{}'", line_no + 1, w))?;
                (*a, *b, weight)
            }
            _ => {
                return Err(anyhow!(
                    "line {}: expected 2 or 3 fields, found {}",
                    line_no + 1,
                    fields.len()
                ))
            }
        };

        builder
            .add_edge(a, b, weight)
            .with_context(|| format!("line {}", line_no + 1))?;
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_weighted_and_unweighted_lines() {
        let text = "# comment\nA\tB\t0.25\n\nB C\nC D 3\n";
        let graph = parse_edge_list(text.as_bytes()).unwrap();
        assert_eq!(graph.protein_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.weight("A", "B").unwrap(), 0.25);
        assert_eq!(graph.weight("C", "B").unwrap(), 1.0);
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(parse_edge_list("A B C D\n".as_bytes()).is_err());
        assert!(parse_edge_list("A\n".as_bytes()).is_err());
        assert!(parse_edge_list("A B heavy\n".as_bytes()).is_err());
    }

    #[test]
    fn malformed_edges_keep_their_type() {
        let err = parse_edge_list("A B 1.0\nB A 2.0\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::MalformedEdge { .. })
        ));
        assert!(parse_edge_list("A B 0\n".as_bytes()).is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "P1 P2 0.9").unwrap();
        writeln!(tmp, "P2 P3 0.4").unwrap();
        let graph = load_edge_list(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(graph.proteins(), &["P1", "P2", "P3"]);
        assert!(load_edge_list("/nonexistent/edges.txt").is_err());
    }
}
