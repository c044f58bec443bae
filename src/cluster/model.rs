use super::circle::Circle;
use super::point::{Bounds, Point, centroid_and_bounds};
use crate::tree::{Condition, TreeObservation};
use rustc_hash::FxHashSet;
use strum::{Display, IntoEnumIterator};

/// Cluster represents one outbreak zone found by a clustering run
///
/// Members are borrowed from the caller's observations. `bounds` and `center`
/// are derived from `members` at construction and cannot drift from them.
#[derive(Debug, Clone)]
pub struct Cluster<'a> {
    id: String,
    members: Vec<&'a TreeObservation>,
    bounds: Bounds,
    center: Point,
    circles: Vec<Circle<'a>>,
    bounding_circle: Option<Circle<'a>>,
}

/// How bad a zone looks, judged by its worst member condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Severity {
    /// At least one dead or withering tree
    Severe,
    /// Pest damage only
    Moderate,
    /// No concerning member at all
    ///
    /// Both clustering entry points only admit concerning trees, so this is
    /// the severity of a hand-built cluster with no members or only healthy
    /// ones.
    Low,
}

impl<'a> Cluster<'a> {
    /// Builds a cluster with sequential id `cluster-{seq}`
    ///
    /// Members are deduplicated by tree key, keeping the first occurrence.
    pub fn new(seq: usize, members: Vec<&'a TreeObservation>) -> Self {
        let members = dedup_members(members);
        let (center, bounds) = centroid_and_bounds(members.iter().map(|t| t.point()));
        Cluster {
            id: format!("cluster-{}", seq),
            members,
            bounds,
            center,
            circles: Vec::new(),
            bounding_circle: None,
        }
    }

    /// Attaches the circles a circle-union cluster was built from
    pub(crate) fn with_circles(
        mut self,
        circles: Vec<Circle<'a>>,
        bounding_circle: Option<Circle<'a>>,
    ) -> Self {
        self.circles = circles;
        self.bounding_circle = bounding_circle;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn members(&self) -> &[&'a TreeObservation] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Arithmetic mean of member coordinates
    pub fn center(&self) -> Point {
        self.center
    }

    /// Per-tree circles of a circle-union cluster; empty for density clusters
    pub fn circles(&self) -> &[Circle<'a>] {
        &self.circles
    }

    /// Single circle enclosing all circles, present when there is more than one
    pub fn bounding_circle(&self) -> Option<&Circle<'a>> {
        self.bounding_circle.as_ref()
    }

    pub fn member_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.members.iter().map(|t| t.point())
    }

    /// Number of members in each condition, in declaration order, zeros omitted
    pub fn condition_counts(&self) -> Vec<(Condition, usize)> {
        Condition::iter()
            .map(|c| (c, self.members.iter().filter(|t| t.condition == c).count()))
            .filter(|&(_, n)| n > 0)
            .collect()
    }

    pub fn severity(&self) -> Severity {
        let has = |c: Condition| self.members.iter().any(|t| t.condition == c);
        if has(Condition::Dead) || has(Condition::Withering) {
            Severity::Severe
        } else if has(Condition::PestDamage) {
            Severity::Moderate
        } else {
            Severity::Low
        }
    }
}

pub(crate) fn dedup_members(members: Vec<&TreeObservation>) -> Vec<&TreeObservation> {
    let mut seen: FxHashSet<(&str, i32)> = FxHashSet::default();
    let mut unique = Vec::with_capacity(members.len());
    for tree in members {
        if seen.insert(tree.key()) {
            unique.push(tree);
        }
    }
    unique
}
