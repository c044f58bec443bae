//! Outbreak-zone clustering tool
//!
//! Reads tree survey observations from a CSV file, clusters the concerning
//! trees of one year into outbreak zones, logs a short summary and writes the
//! zones as CSV with a WKT outline per zone, as GeoJSON, or as a per-tree
//! point table.

use blight_zones::cluster::params::{DEFAULT_OVERLAP_THRESHOLD, DEFAULT_RADIUS_METERS};
use blight_zones::export::Format;
use blight_zones::tree::{self, Condition, TreeObservation, YearStats};
use blight_zones::{Algorithm, Cluster, ClusterParams, cluster_trees, export, loader};
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::error::Error;
use std::path::PathBuf;


#[derive(Parser, Debug)]
#[command(name = "blight_zones")]
#[command(about = "Outbreak-zone clustering for tree blight surveys", long_about = None)]
struct Args {
    /// Input CSV file with one row per tree and survey year
    #[arg(short, long, default_value = "trees.csv")]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Zones)]
    format: Format,

    /// Survey year to cluster (default: latest year in the data)
    #[arg(short, long)]
    year: Option<i32>,

    /// Clustering algorithm
    #[arg(short, long, value_enum, default_value_t = Algorithm::CircleUnion)]
    algorithm: Algorithm,

    /// Cluster radius in meters (1-200)
    #[arg(short, long, default_value_t = DEFAULT_RADIUS_METERS)]
    radius: f64,

    /// Fraction of the smaller disc that must overlap to merge (circle-union only)
    #[arg(long, default_value_t = DEFAULT_OVERLAP_THRESHOLD)]
    overlap: f64,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Error starting logger: {}", e);
    }

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let params = ClusterParams::new(args.algorithm, args.radius, args.overlap).validate()?;
    log::debug!("{:?}", params);

    let trees = loader::read_trees(&args.input)?;
    log_yearly_stats(&trees);

    let year = select_year(&trees, args.year).ok_or("no survey year found in the data")?;
    let year_trees = tree::for_year(&trees, year);
    if year_trees.is_empty() {
        log::warn!("No observations recorded in {}", year);
    }

    let clusters = cluster_trees(&year_trees, &params);
    log_summary(&year_trees, &clusters, year, &params);

    // Build the whole output first so a failed run never leaves a partial file
    let mut table = Vec::new();
    match args.format {
        Format::Zones => export::write_clusters(&mut table, &clusters, year)?,
        Format::Geojson => export::write_geojson(&mut table, &year_trees, &clusters, year)?,
        Format::Points => export::write_tree_points(&mut table, &year_trees)?,
    }

    match &args.output {
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&table)?;
            stdout.flush()?;
        }
        Some(path) => {
            std::fs::write(path, &table)?;
            log::info!("{} output written to {}", args.format, path.display());
        }
    }

    Ok(())
}

/// Picks the requested year, or the latest year present
fn select_year(trees: &[TreeObservation], requested: Option<i32>) -> Option<i32> {
    requested.or_else(|| tree::years(trees).last().copied())
}

/// Count of observations in each condition, zeros omitted
fn condition_totals(stats: &YearStats) -> impl Iterator<Item = &(Condition, usize)> {
    stats.counts.iter().filter(|&&(_, n)| n > 0)
}

fn log_yearly_stats(trees: &[TreeObservation]) {
    for stats in tree::yearly_stats(trees) {
        log::info!(
            "{}: {:>6} trees, {:>6} problem, healthy {:>5.1}%, problem {:>5.1}%",
            stats.year,
            stats.total,
            stats.problem(),
            stats.healthy_rate(),
            stats.problem_rate()
        );
    }
}

fn log_summary(trees: &[TreeObservation], clusters: &[Cluster], year: i32, params: &ClusterParams) {
    let concerning = trees.iter().filter(|t| t.is_concerning()).count();
    let clustered: usize = clusters.iter().map(|c| c.len()).sum();

    log::info!(
        "{}: {} trees, {} concerning, {} zones ({}, radius {:.0} m)",
        year,
        trees.len(),
        concerning,
        clusters.len(),
        params.algorithm,
        params.radius_meters
    );
    for (condition, count) in condition_totals(&YearStats::for_year(trees, year)) {
        log::info!("    {:>16} - {:>6}", condition, count);
    }
    log::info!("    {:>16} - {:>6}", "in zones", clustered);

    for cluster in clusters {
        let center = cluster.center();
        log::debug!(
            "{} {:>4} trees {:>8} at {:.6}, {:.6}",
            cluster.id(),
            cluster.len(),
            cluster.severity(),
            center.lat(),
            center.lng()
        );
    }
}
