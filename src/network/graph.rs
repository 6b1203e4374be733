use std::collections::HashMap;

use crate::network::Network;
use crate::{LinkId, NodeId};

/// Bidirectional adjacency over node identifiers.
///
/// Every link contributes two directed entries: one under its start node and
/// one under its end node, each naming the link that realizes the hop. Edge
/// lists follow link load order. No weights are attached; lengths stay on
/// the links themselves.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<NodeId, Vec<(NodeId, LinkId)>>,
}

impl Graph {
    pub fn build(network: &Network) -> Self {
        let mut adjacency: HashMap<NodeId, Vec<(NodeId, LinkId)>> = HashMap::new();
        for link in network.links() {
            adjacency
                .entry(link.start_node.clone())
                .or_default()
                .push((link.end_node.clone(), link.id.clone()));
            adjacency
                .entry(link.end_node.clone())
                .or_default()
                .push((link.start_node.clone(), link.id.clone()));
        }
        Self { adjacency }
    }

    /// Directed hops leaving `node`, in link load order.
    pub fn neighbors(&self, node: &str) -> &[(NodeId, LinkId)] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}
