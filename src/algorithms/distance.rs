use std::collections::BTreeMap;

use crate::algorithms::paths::{LinkPair, PathSet};
use crate::error::Result;
use crate::network::Network;
use crate::LinkId;

/// Minimum along-path distance per ordered link pair. Pairs with no
/// discovered path have no entry.
pub type DistanceTable = BTreeMap<LinkPair, f64>;

/// Along-path distance of one path: the sum of all link lengths, minus half
/// of the first and half of the last. The endpoints of a path are the
/// midpoints of its bounding links, so only the interior links count in
/// full. A one-link path is exactly 0.
pub fn path_distance(network: &Network, path: &[LinkId]) -> Result<f64> {
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return Ok(0.0);
    };
    let mut total = 0.0;
    for id in path {
        total += network.require(id)?.length;
    }
    total -= network.require(first)?.length / 2.0;
    total -= network.require(last)?.length / 2.0;
    Ok(total)
}

/// Reduce each pair's path set to its minimum distance. Empty entries are
/// skipped; unreachability is data, not an error.
pub fn shortest_distances(network: &Network, paths: &PathSet) -> Result<DistanceTable> {
    let mut table = DistanceTable::new();
    for (pair, pair_paths) in paths {
        let mut best: Option<f64> = None;
        for path in pair_paths {
            let distance = path_distance(network, path)?;
            best = Some(best.map_or(distance, |b: f64| b.min(distance)));
        }
        if let Some(distance) = best {
            table.insert(pair.clone(), distance);
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::network::Link;
    use approx::assert_relative_eq;

    fn link(id: &str, start: &str, end: &str, length: f64) -> Link {
        Link {
            id: id.to_string(),
            start_node: start.to_string(),
            end_node: end.to_string(),
            length,
        }
    }

    fn chain() -> Network {
        Network::new(vec![
            link("A", "n1", "n2", 10.0),
            link("B", "n2", "n3", 20.0),
            link("C", "n3", "n4", 30.0),
        ])
        .unwrap()
    }

    fn ids(ids: &[&str]) -> Vec<LinkId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn midpoint_correction_on_a_chain() {
        // 10 + 20 + 30 minus half of each bounding link.
        let d = path_distance(&chain(), &ids(&["A", "B", "C"])).unwrap();
        assert_relative_eq!(d, 40.0);
    }

    #[test]
    fn single_link_path_is_zero() {
        assert_relative_eq!(path_distance(&chain(), &ids(&["B"])).unwrap(), 0.0);
    }

    #[test]
    fn empty_path_is_zero() {
        assert_relative_eq!(path_distance(&chain(), &[]).unwrap(), 0.0);
    }

    #[test]
    fn unknown_link_in_path_fails_fast() {
        assert_eq!(
            path_distance(&chain(), &ids(&["A", "Z"])).unwrap_err(),
            AnalysisError::MissingLinkReference("Z".to_string())
        );
    }

    #[test]
    fn shortest_distance_takes_the_minimum_path() {
        let network = chain();
        let mut paths = PathSet::new();
        paths.insert(
            LinkPair::new("A", "C"),
            vec![ids(&["A", "B", "C"]), ids(&["A", "C"])],
        );
        let table = shortest_distances(&network, &paths).unwrap();
        // The two-link route scores 10 + 30 - 5 - 15 = 20.
        assert_relative_eq!(table[&LinkPair::new("A", "C")], 20.0);
    }

    #[test]
    fn empty_entries_get_no_distance() {
        let network = chain();
        let mut paths = PathSet::new();
        paths.insert(LinkPair::new("A", "C"), vec![]);
        let table = shortest_distances(&network, &paths).unwrap();
        assert!(table.is_empty());
    }
}
