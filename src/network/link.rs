use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::{LinkId, NodeId};

/// A link in the network with its endpoints and physical length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub start_node: NodeId,
    pub end_node: NodeId,
    pub length: f64,
}

/// The loaded link collection.
///
/// Links keep their load order; adjacency lists and pair enumeration follow
/// it, which is what makes repeated runs produce identical output.
#[derive(Debug, Clone, Default)]
pub struct Network {
    links: Vec<Link>,
    by_id: HashMap<LinkId, usize>,
}

impl Network {
    /// Assemble a network from a link list, validating each link.
    pub fn new(links: Vec<Link>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(links.len());
        for (idx, link) in links.iter().enumerate() {
            if link.id.is_empty() {
                return Err(AnalysisError::malformed(&link.id, "empty link identifier"));
            }
            if link.start_node.is_empty() {
                return Err(AnalysisError::malformed(
                    &link.id,
                    "empty start node identifier",
                ));
            }
            if link.end_node.is_empty() {
                return Err(AnalysisError::malformed(
                    &link.id,
                    "empty end node identifier",
                ));
            }
            if link.length < 0.0 || !link.length.is_finite() {
                return Err(AnalysisError::malformed(
                    &link.id,
                    format!("length {} is not a finite non-negative value", link.length),
                ));
            }
            if by_id.insert(link.id.clone(), idx).is_some() {
                return Err(AnalysisError::malformed(&link.id, "duplicate link identifier"));
            }
        }
        Ok(Self { links, by_id })
    }

    /// Load a network from a JSON link list.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading topology file {}", path.display()))?;
        let links: Vec<Link> = serde_json::from_str(&content)
            .with_context(|| format!("parsing topology file {}", path.display()))?;
        let network = Self::new(links)?;
        info!(
            "loaded {} links from {}",
            network.len(),
            path.display()
        );
        Ok(network)
    }

    pub fn get(&self, id: &str) -> Option<&Link> {
        self.by_id.get(id).map(|&idx| &self.links[idx])
    }

    /// Lookup that fails fast on identifiers from outside the network.
    pub fn require(&self, id: &str) -> Result<&Link> {
        self.get(id)
            .ok_or_else(|| AnalysisError::MissingLinkReference(id.to_string()))
    }

    /// Links in load order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Link identifiers in load order.
    pub fn link_ids(&self) -> impl Iterator<Item = &LinkId> {
        self.links.iter().map(|link| &link.id)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: &str, start: &str, end: &str, length: f64) -> Link {
        Link {
            id: id.to_string(),
            start_node: start.to_string(),
            end_node: end.to_string(),
            length,
        }
    }

    #[test]
    fn preserves_load_order() {
        let network = Network::new(vec![
            link("P3", "n1", "n2", 1.0),
            link("P1", "n2", "n3", 2.0),
            link("P2", "n3", "n4", 3.0),
        ])
        .unwrap();
        let ids: Vec<&LinkId> = network.link_ids().collect();
        assert_eq!(ids, ["P3", "P1", "P2"]);
    }

    #[test]
    fn empty_network_is_valid() {
        let network = Network::new(vec![]).unwrap();
        assert!(network.is_empty());
    }

    #[test]
    fn rejects_empty_node_identifier() {
        let err = Network::new(vec![link("P1", "", "n2", 1.0)]).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedLink { .. }));
    }

    #[test]
    fn rejects_duplicate_identifier() {
        let err = Network::new(vec![
            link("P1", "n1", "n2", 1.0),
            link("P1", "n2", "n3", 2.0),
        ])
        .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedLink { .. }));
    }

    #[test]
    fn rejects_negative_length() {
        let err = Network::new(vec![link("P1", "n1", "n2", -5.0)]).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedLink { .. }));
    }

    #[test]
    fn require_fails_on_unknown_link() {
        let network = Network::new(vec![link("P1", "n1", "n2", 1.0)]).unwrap();
        assert_eq!(
            network.require("P9").unwrap_err(),
            AnalysisError::MissingLinkReference("P9".to_string())
        );
        assert_eq!(network.require("P1").unwrap().length, 1.0);
    }
}
