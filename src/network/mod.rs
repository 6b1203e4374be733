pub mod graph;
pub mod link;

pub use graph::Graph;
pub use link::{Link, Network};
