use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;

use log::debug;

use crate::error::Result;
use crate::network::{Graph, Network};
use crate::{LinkId, NodeId};

/// An ordered sequence of link identifiers. The first element is the source
/// link of the query, the last is the target; no identifier repeats.
pub type Path = Vec<LinkId>;

/// An ordered (source, target) link pair, the key for path sets and
/// distance tables.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkPair {
    pub source: LinkId,
    pub target: LinkId,
}

impl LinkPair {
    pub fn new(source: impl Into<LinkId>, target: impl Into<LinkId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for LinkPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.source, self.target)
    }
}

/// Discovered paths for every ordered pair of distinct links. Entries may be
/// empty; an empty entry means the pair is unreachable.
pub type PathSet = BTreeMap<LinkPair, Vec<Path>>;

/// Find every path from `source` to `target` under the single-pass
/// breadth-first policy.
///
/// The search is seeded from both endpoints of the source link and pops
/// strictly FIFO. One traversed set of directed node pairs spans the whole
/// query: once a branch walks `(current, neighbor)`, no other branch may,
/// which bounds the search on cyclic graphs but also means parallel routes
/// sharing a directed hop are not all discovered. Downstream output depends
/// on this exact policy.
pub fn find_paths(
    network: &Network,
    graph: &Graph,
    source: &str,
    target: &str,
) -> Result<Vec<Path>> {
    let source_link = network.require(source)?;
    network.require(target)?;

    let mut queue: VecDeque<(NodeId, Path)> = VecDeque::new();
    queue.push_back((source_link.start_node.clone(), vec![source_link.id.clone()]));
    queue.push_back((source_link.end_node.clone(), vec![source_link.id.clone()]));

    let mut traversed: HashSet<(NodeId, NodeId)> = HashSet::new();
    let mut paths = Vec::new();

    while let Some((current, path)) = queue.pop_front() {
        if path.last().map(String::as_str) == Some(target) {
            paths.push(path);
            continue;
        }

        for (neighbor, next_link) in graph.neighbors(&current) {
            if path.iter().any(|id| id == next_link) {
                continue;
            }
            let hop = (current.clone(), neighbor.clone());
            if traversed.contains(&hop) {
                continue;
            }
            let mut extended = path.clone();
            extended.push(next_link.clone());
            queue.push_back((neighbor.clone(), extended));
            traversed.insert(hop);
        }
    }

    Ok(paths)
}

/// Run the pair search for every ordered pair of distinct links, in load
/// order. Every pair gets an entry, possibly empty.
pub fn enumerate_paths(network: &Network, graph: &Graph) -> Result<PathSet> {
    let mut set = PathSet::new();
    for source in network.links() {
        for target in network.links() {
            if source.id == target.id {
                continue;
            }
            let paths = find_paths(network, graph, &source.id, &target.id)?;
            debug!(
                "pair {},{}: {} path(s)",
                source.id,
                target.id,
                paths.len()
            );
            set.insert(LinkPair::new(&source.id, &target.id), paths);
        }
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::network::Link;

    fn link(id: &str, start: &str, end: &str) -> Link {
        Link {
            id: id.to_string(),
            start_node: start.to_string(),
            end_node: end.to_string(),
            length: 1.0,
        }
    }

    fn net(links: Vec<Link>) -> (Network, Graph) {
        let network = Network::new(links).unwrap();
        let graph = Graph::build(&network);
        (network, graph)
    }

    #[test]
    fn chain_yields_single_path() {
        let (network, graph) = net(vec![
            link("A", "n1", "n2"),
            link("B", "n2", "n3"),
            link("C", "n3", "n4"),
        ]);
        let paths = find_paths(&network, &graph, "A", "C").unwrap();
        assert_eq!(paths, vec![vec!["A", "B", "C"]]);
    }

    #[test]
    fn search_is_seeded_from_both_source_endpoints() {
        // B sits in the middle; A and C hang off opposite ends.
        let (network, graph) = net(vec![
            link("A", "n1", "n2"),
            link("B", "n2", "n3"),
            link("C", "n3", "n4"),
        ]);
        assert_eq!(
            find_paths(&network, &graph, "B", "A").unwrap(),
            vec![vec!["B", "A"]]
        );
        assert_eq!(
            find_paths(&network, &graph, "B", "C").unwrap(),
            vec![vec!["B", "C"]]
        );
    }

    #[test]
    fn disconnected_pair_yields_no_paths() {
        let (network, graph) = net(vec![link("A", "n1", "n2"), link("B", "n8", "n9")]);
        assert!(find_paths(&network, &graph, "A", "B").unwrap().is_empty());
    }

    #[test]
    fn no_link_repeats_within_a_path() {
        // Triangle plus a tail: cyclic, so termination also matters here.
        let (network, graph) = net(vec![
            link("A", "n1", "n2"),
            link("B", "n2", "n3"),
            link("C", "n3", "n1"),
            link("D", "n3", "n4"),
        ]);
        for source in network.links() {
            for target in network.links() {
                if source.id == target.id {
                    continue;
                }
                for path in find_paths(&network, &graph, &source.id, &target.id).unwrap() {
                    let mut seen = HashSet::new();
                    assert!(
                        path.iter().all(|id| seen.insert(id.clone())),
                        "link reused in {:?}",
                        path
                    );
                    assert_eq!(path.first().unwrap(), &source.id);
                    assert_eq!(path.last().unwrap(), &target.id);
                }
            }
        }
    }

    #[test]
    fn directed_hop_is_consumed_once_per_query() {
        // Two parallel links between n2 and n3. The first expansion out of
        // n2 consumes the (n2, n3) hop, so only one of the parallel routes
        // survives the search.
        let (network, graph) = net(vec![
            link("A", "n1", "n2"),
            link("B", "n2", "n3"),
            link("C", "n2", "n3"),
            link("D", "n3", "n4"),
        ]);
        let paths = find_paths(&network, &graph, "A", "D").unwrap();
        assert_eq!(paths, vec![vec!["A", "B", "D"]]);
    }

    #[test]
    fn self_loop_link_is_traversable() {
        let (network, graph) = net(vec![link("A", "n1", "n1"), link("B", "n1", "n2")]);
        let paths = find_paths(&network, &graph, "A", "B").unwrap();
        assert!(paths.contains(&vec!["A".to_string(), "B".to_string()]));
    }

    #[test]
    fn unknown_source_fails_fast() {
        let (network, graph) = net(vec![link("A", "n1", "n2")]);
        assert_eq!(
            find_paths(&network, &graph, "Z", "A").unwrap_err(),
            AnalysisError::MissingLinkReference("Z".to_string())
        );
    }

    #[test]
    fn all_pairs_get_an_entry() {
        let (network, graph) = net(vec![
            link("A", "n1", "n2"),
            link("B", "n2", "n3"),
            link("C", "n8", "n9"),
        ]);
        let set = enumerate_paths(&network, &graph).unwrap();
        assert_eq!(set.len(), 6);
        assert!(set[&LinkPair::new("A", "C")].is_empty());
        assert!(!set[&LinkPair::new("A", "B")].is_empty());
    }

    #[test]
    fn enumeration_is_deterministic() {
        let links = vec![
            link("A", "n1", "n2"),
            link("B", "n2", "n3"),
            link("C", "n3", "n1"),
        ];
        let (network, graph) = net(links.clone());
        let first = enumerate_paths(&network, &graph).unwrap();
        let (network, graph) = net(links);
        let second = enumerate_paths(&network, &graph).unwrap();
        assert_eq!(first, second);
    }
}
