pub mod algorithms;
pub mod analyzer;
pub mod error;
pub mod matrix;
pub mod network;
pub mod persist;

/// Identifier of a link (an edge with a physical length) within a network.
pub type LinkId = String;
/// Identifier of a node connecting one or more links.
pub type NodeId = String;
