//! Collision detection and resolution
//!
//! Detection groups colliding bodies into clusters; resolution replaces each
//! cluster with one merged body that conserves mass and momentum.

pub mod detection;
pub mod resolution;


pub use detection::{Cluster, detect_clusters, direct_collisions};
pub use resolution::{Resolutions, merge_cluster, resolve_clusters};
