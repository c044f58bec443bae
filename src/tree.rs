//! Tree observations as produced by the survey loader.

use crate::cluster::Point;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Observed state of a tree in a survey year
///
/// Parses from the Japanese survey labels as well as the English names.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum Condition {
    #[strum(to_string = "Healthy", serialize = "健全")]
    Healthy,
    #[strum(to_string = "NeedsObservation", serialize = "要観察")]
    NeedsObservation,
    #[strum(to_string = "PestDamage", serialize = "虫害")]
    PestDamage,
    #[strum(to_string = "Withering", serialize = "立ち枯れ")]
    Withering,
    #[strum(to_string = "Dead", serialize = "枯死")]
    Dead,
    #[strum(to_string = "BrokenBranch", serialize = "枝折れ")]
    BrokenBranch,
    #[strum(to_string = "Unknown", serialize = "不明")]
    Unknown,
}

impl Condition {
    /// Parses a survey label, falling back to [`Condition::Unknown`]
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or(Condition::Unknown)
    }

    /// Dead, withering and pest-damaged trees are the clustering population
    pub fn is_concerning(self) -> bool {
        matches!(
            self,
            Condition::Dead | Condition::Withering | Condition::PestDamage
        )
    }
}

/// One tree's state in one survey year
#[derive(Debug, Clone, PartialEq)]
pub struct TreeObservation {
    pub tree_id: String,
    pub year: i32,
    pub number: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub condition: Condition,
    pub species: String,
    pub location: String,
    pub circumference_cm: f64,
    pub height_m: f64,
    pub notes: String,
}

impl TreeObservation {
    /// Builds an observation with empty descriptive fields
    pub fn new(
        tree_id: impl Into<String>,
        year: i32,
        latitude: f64,
        longitude: f64,
        condition: Condition,
    ) -> Self {
        TreeObservation {
            tree_id: tree_id.into(),
            year,
            number: 0,
            latitude,
            longitude,
            condition,
            species: "Unknown".to_string(),
            location: String::new(),
            circumference_cm: 0.0,
            height_m: 0.0,
            notes: String::new(),
        }
    }

    /// Unique key of the observation: a tree appears once per year
    pub fn key(&self) -> (&str, i32) {
        (&self.tree_id, self.year)
    }

    pub fn point(&self) -> Point {
        Point::from_lat_lng(self.latitude, self.longitude)
    }

    pub fn is_concerning(&self) -> bool {
        self.condition.is_concerning()
    }
}

/// Observations that belong to the clustering population
pub fn concerning(trees: &[TreeObservation]) -> Vec<&TreeObservation> {
    trees.iter().filter(|t| t.is_concerning()).collect()
}

/// Observations recorded in `year`
pub fn for_year(trees: &[TreeObservation], year: i32) -> Vec<TreeObservation> {
    trees.iter().filter(|t| t.year == year).cloned().collect()
}

/// Distinct survey years in ascending order
pub fn years(trees: &[TreeObservation]) -> Vec<i32> {
    let mut years: Vec<i32> = trees.iter().map(|t| t.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Condition breakdown of one survey year
#[derive(Debug, Clone, PartialEq)]
pub struct YearStats {
    pub year: i32,
    pub total: usize,
    /// Count per condition in declaration order, zeros included
    pub counts: Vec<(Condition, usize)>,
}

impl YearStats {
    /// Tallies the observations recorded in `year`
    pub fn for_year(trees: &[TreeObservation], year: i32) -> Self {
        let in_year: Vec<&TreeObservation> = trees.iter().filter(|t| t.year == year).collect();
        let counts = Condition::iter()
            .map(|c| (c, in_year.iter().filter(|t| t.condition == c).count()))
            .collect();

        YearStats {
            year,
            total: in_year.len(),
            counts,
        }
    }

    pub fn count(&self, condition: Condition) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| *c == condition)
            .map_or(0, |&(_, n)| n)
    }

    /// Pest-damaged, withering and dead trees
    pub fn problem(&self) -> usize {
        self.counts
            .iter()
            .filter(|(c, _)| c.is_concerning())
            .map(|&(_, n)| n)
            .sum()
    }

    /// Percentage of healthy trees, 0 for a year without observations
    pub fn healthy_rate(&self) -> f64 {
        percent(self.count(Condition::Healthy), self.total)
    }

    /// Percentage of problem trees, 0 for a year without observations
    pub fn problem_rate(&self) -> f64 {
        percent(self.problem(), self.total)
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Per-year statistics for every survey year, oldest first
pub fn yearly_stats(trees: &[TreeObservation]) -> Vec<YearStats> {
    years(trees)
        .into_iter()
        .map(|year| YearStats::for_year(trees, year))
        .collect()
}
