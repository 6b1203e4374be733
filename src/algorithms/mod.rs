pub mod distance;
pub mod paths;

pub use distance::{path_distance, shortest_distances, DistanceTable};
pub use paths::{enumerate_paths, find_paths, LinkPair, Path, PathSet};
