//! Output artifacts: the paths file, both distance matrix CSVs, and the
//! index→identifier mapping.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::algorithms::{LinkPair, PathSet};
use crate::analyzer::Analysis;
use crate::matrix::DistanceMatrix;
use crate::network::Network;

fn output_path(dir: &Path, prefix: &str, network: &str, extension: &str) -> PathBuf {
    dir.join(format!("{prefix}_{network}.{extension}"))
}

/// Write the paths file: `"<source>,<target>"` keys mapping to each pair's
/// list of paths, keyed in pair enumeration order (link load order).
pub fn save_paths(
    dir: &Path,
    name: &str,
    network: &Network,
    paths: &PathSet,
) -> Result<PathBuf> {
    let mut keyed = serde_json::Map::with_capacity(paths.len());
    for source in network.links() {
        for target in network.links() {
            if source.id == target.id {
                continue;
            }
            let pair = LinkPair::new(&source.id, &target.id);
            if let Some(pair_paths) = paths.get(&pair) {
                keyed.insert(pair.to_string(), serde_json::to_value(pair_paths)?);
            }
        }
    }
    // Entries for links outside the network, if any, go after the ordered
    // block rather than getting dropped.
    for (pair, pair_paths) in paths {
        let key = pair.to_string();
        if !keyed.contains_key(&key) {
            keyed.insert(key, serde_json::to_value(pair_paths)?);
        }
    }

    let file = output_path(dir, "paths", name, "json");
    let content = serde_json::to_string_pretty(&keyed)?;
    fs::write(&file, content).with_context(|| format!("writing {}", file.display()))?;
    info!("paths saved to {}", file.display());
    Ok(file)
}

/// Read a paths file back into a `PathSet`.
pub fn load_paths(file: &Path) -> Result<PathSet> {
    let content =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let keyed: BTreeMap<String, Vec<Vec<String>>> = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", file.display()))?;
    keyed
        .into_iter()
        .map(|(key, pair_paths)| {
            let (source, target) = key
                .split_once(',')
                .with_context(|| format!("malformed pair key '{key}' in {}", file.display()))?;
            Ok((LinkPair::new(source, target), pair_paths))
        })
        .collect()
}

// Distances render with at least one decimal place, so whole values come
// out as "40.0" rather than "40".
fn csv_cell(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn matrix_csv<L: std::fmt::Display>(labels: &[L], matrix: &DistanceMatrix) -> String {
    let mut out = String::new();
    for label in labels {
        let _ = write!(out, ",{label}");
    }
    out.push('\n');
    for (row, label) in labels.iter().enumerate() {
        let _ = write!(out, "{label}");
        for col in 0..labels.len() {
            let _ = write!(out, ",{}", csv_cell(matrix.at(row, col)));
        }
        out.push('\n');
    }
    out
}

/// Write the identifier-indexed and integer-indexed matrix CSVs.
pub fn save_matrices(
    dir: &Path,
    network: &str,
    matrix: &DistanceMatrix,
) -> Result<(PathBuf, PathBuf)> {
    let id_file = output_path(dir, "distance_matrix_id", network, "csv");
    fs::write(&id_file, matrix_csv(matrix.labels(), matrix))
        .with_context(|| format!("writing {}", id_file.display()))?;
    info!("identifier-indexed distance matrix saved to {}", id_file.display());

    let indices: Vec<usize> = (0..matrix.len()).collect();
    let index_file = output_path(dir, "distance_matrix_index", network, "csv");
    fs::write(&index_file, matrix_csv(&indices, matrix))
        .with_context(|| format!("writing {}", index_file.display()))?;
    info!("index-indexed distance matrix saved to {}", index_file.display());

    Ok((id_file, index_file))
}

/// Write the index→identifier mapping as JSON with stringified indices,
/// keyed in index order.
pub fn save_index_mapping(dir: &Path, network: &str, matrix: &DistanceMatrix) -> Result<PathBuf> {
    let mut mapping = serde_json::Map::with_capacity(matrix.len());
    for (idx, id) in matrix.labels().iter().enumerate() {
        mapping.insert(idx.to_string(), serde_json::Value::String(id.clone()));
    }
    let file = output_path(dir, "index_to_id_mapping", network, "json");
    let content = serde_json::to_string_pretty(&mapping)?;
    fs::write(&file, content).with_context(|| format!("writing {}", file.display()))?;
    info!("index to identifier mapping saved to {}", file.display());
    Ok(file)
}

/// Write all four artifacts for one analysis run.
pub fn save_analysis(dir: &Path, name: &str, network: &Network, analysis: &Analysis) -> Result<()> {
    save_paths(dir, name, network, &analysis.paths)?;
    save_matrices(dir, name, &analysis.matrix)?;
    save_index_mapping(dir, name, &analysis.matrix)?;
    Ok(())
}
