//! Collision resolution through momentum-conserving mergers
//!
//! A cluster collapses into one body that conserves:
//! - Total mass
//! - Total momentum
//!
//! The merged body sits at the centre of the rectangle enclosing the
//! members (not at their centre of mass), and takes the variant and the name
//! of the member with the largest momentum.

use crate::body::{Body, BodySnapshot};
use crate::collisions::Cluster;
use crate::world::World;
use ahash::RandomState;
use indexmap::IndexMap;

/// What each resolved cluster was replaced with
pub type Resolutions = IndexMap<Cluster, BodySnapshot, RandomState>;

/// Merge the members of a cluster into one detached body
///
/// Returns `None` for an empty cluster.
///
/// # Examples
///
/// ```
/// use galaxy::body::{BodyKind, BodySnapshot};
/// use galaxy::collisions::{Cluster, merge_cluster};
/// use galaxy::vector::Vector2D;
///
/// let cluster = Cluster::new([
///     BodySnapshot {
///         name: "slow".to_owned(),
///         kind: BodyKind::Planet,
///         mass: 1.0,
///         position: Vector2D::new(0.0, 0.0),
///         velocity: Vector2D::new(0.0, 1.0),
///     },
///     BodySnapshot {
///         name: "fast".to_owned(),
///         kind: BodyKind::Comet,
///         mass: 1.0,
///         position: Vector2D::new(1.0, 0.0),
///         velocity: Vector2D::new(0.0, 3.0),
///     },
/// ]);
///
/// let merged = merge_cluster(&cluster).unwrap();
///
/// // Mass and momentum are conserved
/// assert_eq!(merged.mass(), 2.0);
/// assert_eq!(merged.velocity(), &Vector2D::new(0.0, 2.0));
///
/// // The dominant member lends its name and variant
/// assert_eq!(merged.name(), "fast");
/// assert_eq!(merged.kind(), BodyKind::Comet);
/// ```
pub fn merge_cluster(cluster: &Cluster) -> Option<Body> {
    let bounds = cluster.bounding_rectangle()?;
    let dominant = cluster.dominant()?;

    let mass = cluster.total_mass();
    let velocity = &cluster.total_momentum() * (1.0 / mass);

    Some(Body::from_parts(
        dominant.name.clone(),
        dominant.kind,
        bounds.center(),
        velocity,
        mass,
    ))
}

/// Replace every cluster in `world` with its merged body
///
/// Members are removed by name and the merged body is attached to `world`.
/// Clusters are handled in the given order; when clusters overlap, a later
/// one removes whatever body currently carries a member's name.
pub fn resolve_clusters(world: &mut World, clusters: Vec<Cluster>) -> Resolutions {
    let mut resolutions = Resolutions::default();

    for cluster in clusters {
        let Some(merged) = merge_cluster(&cluster) else {
            continue;
        };

        for name in cluster.names() {
            world.remove(name);
        }

        log::debug!(
            "merged {:?} into `{}` (mass {:.3e})",
            cluster.names().collect::<Vec<_>>(),
            merged.name(),
            merged.mass()
        );

        let snapshot = merged.snapshot();
        world.adopt(merged);
        resolutions.insert(cluster, snapshot);
    }

    resolutions
}
