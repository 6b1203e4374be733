use thiserror::Error;

use crate::LinkId;

/// Result type alias for the analysis core.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Failures the analysis core can produce.
///
/// Unreachable link pairs and empty networks are not failures; they show up
/// as empty path sets and empty matrices.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    /// A traversal or distance step named a link that is not part of the
    /// loaded network. Cannot happen when the graph and the lookups come
    /// from the same network, but must never be skipped silently.
    #[error("link '{0}' is referenced but not part of the loaded network")]
    MissingLinkReference(LinkId),

    /// A link failed validation when the network was assembled.
    #[error("malformed link '{link}': {reason}")]
    MalformedLink { link: LinkId, reason: String },
}

impl AnalysisError {
    pub fn malformed(link: impl Into<LinkId>, reason: impl Into<String>) -> Self {
        Self::MalformedLink {
            link: link.into(),
            reason: reason.into(),
        }
    }
}
