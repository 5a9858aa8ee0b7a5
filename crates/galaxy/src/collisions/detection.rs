//! Pairwise collision detection and clustering
//!
//! Every unordered pair is tested once with the earlier body as the tester.
//! Because only planets detect collisions (see [`Body::collides_with`]), the
//! direct edges are one-sided; clustering adds the reverse edges back.
//!
//! Clustering expands each body's direct partners by one hop only. A chain of
//! four or more bodies can therefore produce several overlapping clusters
//! instead of a single one. Replacing the expansion with a disjoint-set over
//! the direct edges would give the full closure.

use crate::body::{Body, BodySnapshot};
use crate::geometry::Rect;
use crate::vector::Vector2D;
use crate::world::World;
use ahash::RandomState;
use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

/// Bodies found colliding together in one step
///
/// Members are copies of the bodies' state at detection time, ordered by
/// name. Two clusters are equal when they hold the same names.
///
/// # Examples
///
/// ```
/// use galaxy::body::{BodyKind, BodySnapshot};
/// use galaxy::collisions::Cluster;
/// use galaxy::vector::Vector2D;
///
/// let member = |name: &str, mass: f64| BodySnapshot {
///     name: name.to_owned(),
///     kind: BodyKind::Planet,
///     mass,
///     position: Vector2D::zeros(),
///     velocity: Vector2D::new(1.0, 0.0),
/// };
///
/// let cluster = Cluster::new([member("b", 2.0), member("a", 1.0)]);
/// assert_eq!(cluster.names().collect::<Vec<_>>(), vec!["a", "b"]);
/// assert_eq!(cluster.total_mass(), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct Cluster {
    members: BTreeMap<String, BodySnapshot>,
}

impl Cluster {
    pub fn new<I>(members: I) -> Self
    where
        I: IntoIterator<Item = BodySnapshot>,
    {
        Self {
            members: members
                .into_iter()
                .map(|member| (member.name.clone(), member))
                .collect(),
        }
    }

    pub fn members(&self) -> impl Iterator<Item = &BodySnapshot> {
        self.members.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.members.values().map(|m| m.mass).sum()
    }

    pub fn total_momentum(&self) -> Vector2D {
        self.members.values().map(BodySnapshot::momentum).sum()
    }

    /// Rectangle enclosing every member's bounding box
    pub fn bounding_rectangle(&self) -> Option<Rect> {
        Rect::union_of(self.members.values().map(BodySnapshot::bounding_rectangle))
    }

    /// Member with the largest momentum magnitude; ties go to the first in name order
    pub fn dominant(&self) -> Option<&BodySnapshot> {
        self.members.values().fold(None, |dominant, member| match dominant {
            Some(current) if member.momentum().magnitude() <= current.momentum().magnitude() => {
                Some(current)
            }
            _ => Some(member),
        })
    }
}

impl PartialEq for Cluster {
    fn eq(&self, other: &Self) -> bool {
        self.members.keys().eq(other.members.keys())
    }
}

impl Eq for Cluster {}

impl Hash for Cluster {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.members.len().hash(state);
        self.members.keys().for_each(|name| name.hash(state));
    }
}

/// Direct collision edges: each tester mapped to the later bodies it hits
///
/// Pairs `(i, j)` with `i < j` in world order are tested exactly once, as
/// `bodies[i].collides_with(bodies[j])`. Bodies that hit nothing are absent.
pub fn direct_collisions(
    world: &World,
) -> IndexMap<&str, IndexSet<&str, RandomState>, RandomState> {
    let bodies: Vec<&Body> = world.bodies().collect();
    let n = bodies.len();
    let mut edges: IndexMap<&str, IndexSet<&str, RandomState>, RandomState> = IndexMap::default();

    for i in 0..n {
        for j in (i + 1)..n {
            if bodies[i].collides_with(bodies[j]) {
                edges
                    .entry(bodies[i].name())
                    .or_default()
                    .insert(bodies[j].name());
            }
        }
    }

    edges
}

/// Clusters of colliding bodies in the current state of `world`
///
/// For every body with direct partners the cluster holds the body, its
/// partners, the partners' own partners and every body that hit it.
/// Identical clusters are reported once, in order of first discovery.
pub fn detect_clusters(world: &World) -> Vec<Cluster> {
    let edges = direct_collisions(world);
    let mut clusters: IndexSet<Cluster, RandomState> = IndexSet::default();

    for (&tester, partners) in &edges {
        let mut names: BTreeSet<&str> = BTreeSet::new();
        names.insert(tester);
        names.extend(partners.iter().copied());

        for partner in partners {
            if let Some(second_hop) = edges.get(partner) {
                names.extend(second_hop.iter().copied());
            }
        }

        for (&other, other_partners) in &edges {
            if other != tester && other_partners.contains(tester) {
                names.insert(other);
            }
        }

        let members = names
            .into_iter()
            .filter_map(|name| world.body(name))
            .map(Body::snapshot);
        clusters.insert(Cluster::new(members));
    }

    clusters.into_iter().collect()
}
