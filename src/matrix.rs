use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::algorithms::{DistanceTable, LinkPair};
use crate::error::{AnalysisError, Result};
use crate::network::Network;
use crate::LinkId;

/// A run of an identifier: either a maximal stretch of ASCII digits or the
/// text between such stretches. Runs alternate, text first (possibly empty
/// when the identifier starts with a digit), so positional comparison never
/// pits a digit run against a text run.
#[derive(Debug, PartialEq, Eq)]
enum Run<'a> {
    Text(&'a str),
    Digits(&'a str),
}

fn split_runs(s: &str) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_digits = false;
    if s.starts_with(|c: char| c.is_ascii_digit()) {
        runs.push(Run::Text(""));
        in_digits = true;
    }
    for (idx, c) in s.char_indices() {
        if c.is_ascii_digit() != in_digits {
            runs.push(if in_digits {
                Run::Digits(&s[start..idx])
            } else {
                Run::Text(&s[start..idx])
            });
            start = idx;
            in_digits = !in_digits;
        }
    }
    if start < s.len() {
        runs.push(if in_digits {
            Run::Digits(&s[start..])
        } else {
            Run::Text(&s[start..])
        });
    }
    runs
}

fn cmp_runs(a: &Run<'_>, b: &Run<'_>) -> Ordering {
    match (a, b) {
        (Run::Text(x), Run::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Run::Digits(x), Run::Digits(y)) => {
            // Numeric comparison without a width limit: strip leading zeros,
            // then longer means larger.
            let x = x.trim_start_matches('0');
            let y = y.trim_start_matches('0');
            x.len().cmp(&y.len()).then_with(|| x.cmp(y))
        }
        // Unreachable while both run lists alternate, kept deterministic.
        (Run::Digits(_), Run::Text(_)) => Ordering::Less,
        (Run::Text(_), Run::Digits(_)) => Ordering::Greater,
    }
}

/// Natural order over identifiers: digit runs compare numerically, other
/// runs case-insensitively, position by position. Determines both matrix
/// layouts and the index mapping.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_runs = split_runs(a);
    let b_runs = split_runs(b);
    for (ra, rb) in a_runs.iter().zip(&b_runs) {
        match cmp_runs(ra, rb) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a_runs.len().cmp(&b_runs.len())
}

/// Square symmetric matrix of minimum along-path distances, labeled by link
/// identifier in natural order. Pairs without a computed distance, and the
/// diagonal, stay at 0. The integer-indexed view is the same grid with
/// rows and columns numbered by label position.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    labels: Vec<LinkId>,
    values: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    pub fn build(network: &Network, distances: &DistanceTable) -> Result<Self> {
        let mut labels: Vec<LinkId> = network.link_ids().cloned().collect();
        labels.sort_by(|a, b| natural_cmp(a, b));
        let position: HashMap<&str, usize> = labels
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.as_str(), idx))
            .collect();

        for pair in distances.keys() {
            if !position.contains_key(pair.source.as_str()) {
                return Err(AnalysisError::MissingLinkReference(pair.source.clone()));
            }
            if !position.contains_key(pair.target.as_str()) {
                return Err(AnalysisError::MissingLinkReference(pair.target.clone()));
            }
        }

        // Fill in pair enumeration order (link load order). The single-pass
        // search can give the two directions of a pair different minima, and
        // both write the same two cells, so the later ordered pair is the
        // one the matrix keeps.
        let mut values = vec![vec![0.0; labels.len()]; labels.len()];
        for source in network.links() {
            for target in network.links() {
                if source.id == target.id {
                    continue;
                }
                let pair = LinkPair::new(&source.id, &target.id);
                if let Some(&distance) = distances.get(&pair) {
                    let row = position[source.id.as_str()];
                    let col = position[target.id.as_str()];
                    values[row][col] = distance;
                    values[col][row] = distance;
                }
            }
        }
        Ok(Self { labels, values })
    }

    /// Labels in natural order; the position of each label is its index in
    /// the integer-indexed view.
    pub fn labels(&self) -> &[LinkId] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let row = self.labels.iter().position(|id| id == a)?;
        let col = self.labels.iter().position(|id| id == b)?;
        Some(self.values[row][col])
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Stringified index → link identifier, for the mapping artifact.
    pub fn index_mapping(&self) -> BTreeMap<String, LinkId> {
        self.labels
            .iter()
            .enumerate()
            .map(|(idx, id)| (idx.to_string(), id.clone()))
            .collect()
    }
}
