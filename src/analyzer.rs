use std::path::Path;

use log::info;

use crate::algorithms::{enumerate_paths, shortest_distances, DistanceTable, PathSet};
use crate::error::Result;
use crate::matrix::DistanceMatrix;
use crate::network::{Graph, Network};

/// Everything one analysis run produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub paths: PathSet,
    pub distances: DistanceTable,
    pub matrix: DistanceMatrix,
}

/// Runs the full pipeline over one loaded network:
/// graph → all-pairs paths → shortest distances → matrices.
#[derive(Debug)]
pub struct NetworkAnalyzer {
    name: String,
    network: Network,
}

impl NetworkAnalyzer {
    pub fn new(name: impl Into<String>, network: Network) -> Self {
        Self {
            name: name.into(),
            network,
        }
    }

    /// Load a topology file; the network takes its name from the file stem
    /// and output artifacts are named after it.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let network = Network::load(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "network".to_string());
        Ok(Self::new(name, network))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn run(&self) -> Result<Analysis> {
        let graph = Graph::build(&self.network);
        info!(
            "network '{}': graph built over {} nodes, {} links",
            self.name,
            graph.node_count(),
            self.network.len()
        );

        let paths = enumerate_paths(&self.network, &graph)?;
        info!("network '{}': paths enumerated for {} link pairs", self.name, paths.len());

        let distances = shortest_distances(&self.network, &paths)?;
        info!(
            "network '{}': {} of {} pairs are connected",
            self.name,
            distances.len(),
            paths.len()
        );

        let matrix = DistanceMatrix::build(&self.network, &distances)?;
        Ok(Analysis {
            paths,
            distances,
            matrix,
        })
    }
}
