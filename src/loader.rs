//! Reads survey CSV files into tree observations.
//!
//! Columns are located by header name, either the Japanese survey header or an
//! English alias. Rows whose coordinates do not parse are skipped.

use crate::error::LoadError;
use crate::tree::{Condition, TreeObservation};
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;

const YEAR: &[&str] = &["年度", "year"];
const NUMBER: &[&str] = &["番号", "number"];
const TREE_ID: &[&str] = &["樹木ID", "tree_id"];
const SPECIES: &[&str] = &["樹種名", "species"];
const LOCATION: &[&str] = &["立地", "location"];
const CIRCUMFERENCE: &[&str] = &["木の周囲_cm", "circumference_cm", "circumference"];
const HEIGHT: &[&str] = &["樹高_m", "height_m", "height"];
const CONDITION: &[&str] = &["状態", "condition"];
const NOTES: &[&str] = &["備考", "notes"];
const LATITUDE: &[&str] = &["緯度", "latitude"];
const LONGITUDE: &[&str] = &["経度", "longitude"];

/// Column positions resolved from a header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    year: Option<usize>,
    number: Option<usize>,
    tree_id: Option<usize>,
    species: Option<usize>,
    location: Option<usize>,
    circumference: Option<usize>,
    height: Option<usize>,
    condition: Option<usize>,
    notes: Option<usize>,
    latitude: usize,
    longitude: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();
        let find = |aliases: &[&str]| {
            names
                .iter()
                .position(|n| aliases.iter().any(|a| a.to_lowercase() == *n))
        };

        Ok(Columns {
            year: find(YEAR),
            number: find(NUMBER),
            tree_id: find(TREE_ID),
            species: find(SPECIES),
            location: find(LOCATION),
            circumference: find(CIRCUMFERENCE),
            height: find(HEIGHT),
            condition: find(CONDITION),
            notes: find(NOTES),
            latitude: find(LATITUDE).ok_or(LoadError::MissingColumn("latitude"))?,
            longitude: find(LONGITUDE).ok_or(LoadError::MissingColumn("longitude"))?,
        })
    }

    fn parse(&self, record: &StringRecord) -> Option<TreeObservation> {
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(str::trim);
        let text = |idx: Option<usize>| field(idx).unwrap_or("").to_string();
        let float = |idx: Option<usize>| {
            field(idx)
                .and_then(|s| s.parse::<f64>().ok())
                .unwrap_or(0.0)
        };

        let latitude = field(Some(self.latitude))?.parse::<f64>().ok()?;
        let longitude = field(Some(self.longitude))?.parse::<f64>().ok()?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }

        let species = match field(self.species) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => "Unknown".to_string(),
        };

        Some(TreeObservation {
            tree_id: text(self.tree_id),
            year: field(self.year).and_then(|s| s.parse().ok()).unwrap_or(0),
            number: field(self.number).and_then(|s| s.parse().ok()).unwrap_or(0),
            latitude,
            longitude,
            condition: Condition::from_label(field(self.condition).unwrap_or("")),
            species,
            location: text(self.location),
            circumference_cm: float(self.circumference),
            height_m: float(self.height),
            notes: text(self.notes),
        })
    }
}

/// Reads observations from any CSV source with a header row
pub fn read_trees_from<R: Read>(source: R) -> Result<Vec<TreeObservation>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let columns = Columns::resolve(reader.headers()?)?;

    let mut trees = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        let record = result?;
        match columns.parse(&record) {
            Some(tree) => trees.push(tree),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!("skipped {} rows without valid coordinates", skipped);
    }

    Ok(trees)
}

/// Reads observations from a CSV file
///
/// Fails with [`LoadError::Empty`] when no row has usable coordinates.
pub fn read_trees(path: &Path) -> Result<Vec<TreeObservation>, LoadError> {
    let file = std::fs::File::open(path)?;
    let trees = read_trees_from(file)?;
    if trees.is_empty() {
        return Err(LoadError::Empty);
    }

    log::info!("Read {} tree observations from {}", trees.len(), path.display());
    Ok(trees)
}
