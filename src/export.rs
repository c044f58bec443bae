//! Export of zones and trees.
//!
//! Three flavours: the zone table (CSV with a WKT outline column), a GeoJSON
//! FeatureCollection of trees and zone outlines, and a per-tree point table.

use crate::cluster::point::centroid_and_bounds;
use crate::cluster::{Cluster, Point};
use crate::error::LoadError;
use crate::geometry::cluster_polygon;
use crate::tree::{Condition, TreeObservation};
use clap::ValueEnum;
use csv::WriterBuilder;
use serde::{Serialize, Serializer};
use std::io::Write;
use strum::Display;

/// Output flavour of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, ValueEnum)]
#[strum(serialize_all = "kebab-case")]
pub enum Format {
    /// One row per zone with a WKT outline
    #[default]
    Zones,
    /// Trees and zone outlines as a GeoJSON FeatureCollection
    Geojson,
    /// One row per tree with its coordinates
    Points,
}

const HEADER: [&str; 12] = [
    "cluster_id",
    "tree_count",
    "year",
    "center_lat",
    "center_lng",
    "min_lat",
    "max_lat",
    "min_lng",
    "max_lng",
    "severity",
    "conditions",
    "wkt_geometry",
];

/// Closed WKT polygon in `lng lat` order; an empty ring gives `POLYGON EMPTY`
pub fn wkt_polygon(ring: &[Point]) -> String {
    let Some(first) = ring.first() else {
        return "POLYGON EMPTY".to_string();
    };

    let coords: Vec<String> = ring
        .iter()
        .chain(std::iter::once(first))
        .map(|p| format!("{} {}", p.lng(), p.lat()))
        .collect();
    format!("POLYGON(({}))", coords.join(","))
}

/// `Label:count` pairs joined with `;`
pub fn conditions_summary(cluster: &Cluster) -> String {
    cluster
        .condition_counts()
        .iter()
        .map(|(c, n)| format!("{}:{}", c, n))
        .collect::<Vec<_>>()
        .join(";")
}

/// Writes one row per cluster, preceded by a header row
pub fn write_clusters<W: Write>(
    out: W,
    clusters: &[Cluster],
    year: i32,
) -> Result<(), LoadError> {
    let mut writer = WriterBuilder::new().from_writer(out);
    writer.write_record(HEADER)?;

    for cluster in clusters {
        let bounds = cluster.bounds();
        let center = cluster.center();
        writer.write_record([
            cluster.id().to_string(),
            cluster.len().to_string(),
            year.to_string(),
            center.lat().to_string(),
            center.lng().to_string(),
            bounds.min_lat.to_string(),
            bounds.max_lat.to_string(),
            bounds.min_lng.to_string(),
            bounds.max_lng.to_string(),
            cluster.severity().to_string(),
            conditions_summary(cluster),
            wkt_polygon(&cluster_polygon(cluster)),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

const POINTS_HEADER: [&str; 11] = [
    "tree_id",
    "number",
    "year",
    "species",
    "location",
    "circumference",
    "height",
    "condition",
    "notes",
    "longitude",
    "latitude",
];

/// Writes one row per tree
///
/// The header uses names the survey loader accepts, so the table can be read
/// back in.
pub fn write_tree_points<W: Write>(out: W, trees: &[TreeObservation]) -> Result<(), LoadError> {
    let mut writer = WriterBuilder::new().from_writer(out);
    writer.write_record(POINTS_HEADER)?;

    for tree in trees {
        writer.write_record([
            tree.tree_id.clone(),
            tree.number.to_string(),
            tree.year.to_string(),
            tree.species.clone(),
            tree.location.clone(),
            tree.circumference_cm.to_string(),
            tree.height_m.to_string(),
            tree.condition.to_string(),
            tree.notes.clone(),
            tree.longitude.to_string(),
            tree.latitude.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

const CRS84: &str = "urn:ogc:def:crs:OGC:1.3:CRS84";

#[derive(Serialize)]
struct FeatureCollection<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: String,
    crs: Crs,
    features: Vec<Feature<'a>>,
    metadata: Metadata,
}

#[derive(Serialize)]
struct Crs {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: CrsName,
}

#[derive(Serialize)]
struct CrsName {
    name: &'static str,
}

#[derive(Serialize)]
struct Feature<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: Properties<'a>,
    geometry: Geometry,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Properties<'a> {
    Tree(TreeProperties<'a>),
    Zone(ZoneProperties<'a>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TreeProperties<'a> {
    tree_id: &'a str,
    number: u32,
    year: i32,
    species: &'a str,
    location: &'a str,
    circumference: f64,
    height: f64,
    condition: &'static str,
    notes: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ZoneProperties<'a> {
    cluster_id: &'a str,
    tree_count: usize,
    year: i32,
    center_lat: f64,
    center_lng: f64,
    severity: String,
    #[serde(serialize_with = "condition_map")]
    conditions: Vec<(Condition, usize)>,
}

/// Coordinates are `[lng, lat]`; polygon rings are closed
#[derive(Serialize)]
#[serde(tag = "type", content = "coordinates")]
enum Geometry {
    Point([f64; 2]),
    Polygon(Vec<Vec<[f64; 2]>>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    year: i32,
    total_trees: usize,
    total_clusters: usize,
    clustered_trees: usize,
    bounds: Option<Extent>,
    description: &'static str,
}

#[derive(Serialize)]
struct Extent {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

// Counts as a JSON object keyed by condition name, in declaration order
fn condition_map<S: Serializer>(counts: &[(Condition, usize)], s: S) -> Result<S::Ok, S::Error> {
    s.collect_map(counts.iter().map(|&(c, n)| (<&str>::from(c), n)))
}

fn tree_feature(tree: &TreeObservation) -> Feature<'_> {
    Feature {
        kind: "Feature",
        properties: Properties::Tree(TreeProperties {
            tree_id: &tree.tree_id,
            number: tree.number,
            year: tree.year,
            species: &tree.species,
            location: &tree.location,
            circumference: tree.circumference_cm,
            height: tree.height_m,
            condition: tree.condition.into(),
            notes: &tree.notes,
        }),
        geometry: Geometry::Point(tree.point().0),
    }
}

fn zone_feature<'a>(cluster: &'a Cluster, year: i32) -> Feature<'a> {
    let center = cluster.center();
    let ring = cluster_polygon(cluster);
    let closed = ring.iter().chain(ring.first()).map(|p| p.0).collect();

    Feature {
        kind: "Feature",
        properties: Properties::Zone(ZoneProperties {
            cluster_id: cluster.id(),
            tree_count: cluster.len(),
            year,
            center_lat: center.lat(),
            center_lng: center.lng(),
            severity: cluster.severity().to_string(),
            conditions: cluster.condition_counts(),
        }),
        geometry: Geometry::Polygon(vec![closed]),
    }
}

fn feature_collection<'a>(
    trees: &'a [TreeObservation],
    clusters: &'a [Cluster],
    year: i32,
) -> FeatureCollection<'a> {
    let bounds = (!trees.is_empty()).then(|| {
        let (_, b) = centroid_and_bounds(trees.iter().map(|t| t.point()));
        Extent {
            north: b.max_lat,
            south: b.min_lat,
            east: b.max_lng,
            west: b.min_lng,
        }
    });

    let features = trees
        .iter()
        .map(tree_feature)
        .chain(clusters.iter().map(|c| zone_feature(c, year)))
        .collect();

    FeatureCollection {
        kind: "FeatureCollection",
        name: format!("tree_blight_zones_{}", year),
        crs: Crs {
            kind: "name",
            properties: CrsName { name: CRS84 },
        },
        features,
        metadata: Metadata {
            year,
            total_trees: trees.len(),
            total_clusters: clusters.len(),
            clustered_trees: clusters.iter().map(|c| c.len()).sum(),
            bounds,
            description: "Tree blight survey with outbreak zones",
        },
    }
}

/// Writes trees as Point features followed by zones as Polygon features
///
/// Zone outlines are the [`cluster_polygon`] rings, closed, in `[lng, lat]`
/// order.
pub fn write_geojson<W: Write>(
    out: W,
    trees: &[TreeObservation],
    clusters: &[Cluster],
    year: i32,
) -> Result<(), LoadError> {
    serde_json::to_writer_pretty(out, &feature_collection(trees, clusters, year))?;
    Ok(())
}
