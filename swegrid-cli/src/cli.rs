//! Définition et implémentation des commandes CLI
//!
//! - `to-grid` / `to-wgs84` / `parse` : conversion d'un point
//! - `projections` : catalogue des projections
//! - `reproject` : fichiers GeoJSON entre deux systèmes

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Subcommand, ValueEnum};
use swegrid::{GeodeticCoordinate, GridCoordinate, Projection, Wgs84Format, Wgs84Position};
use tracing::{info, warn};

use swegrid_cli::export::geojson::reproject_file;
use swegrid_cli::{Config, ConversionReport, ConversionStatus, CoordinateSystem, FileReport, GridReprojector};

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a WGS84 latitude/longitude to grid coordinates
    ToGrid {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Target projection (défaut : RT90 et SWEREF99 configurées)
        #[arg(short, long)]
        projection: Option<String>,
    },

    /// Convert grid coordinates back to WGS84
    ToWgs84 {
        /// Northing (X) in metres
        #[arg(long)]
        northing: f64,

        /// Easting (Y) in metres
        #[arg(long)]
        easting: f64,

        /// Source projection (e.g. rt90_2.5_gon_v, sweref_99_tm)
        #[arg(short, long)]
        projection: String,

        /// Output notation
        #[arg(long, value_enum, default_value_t = FormatArg::Dms)]
        format: FormatArg,
    },

    /// Parse a textual WGS84 position (e.g. "N 59º 19' 50.16\" E 18º 3' 34.56\"") and convert it
    Parse {
        /// Position text, latitude first
        text: String,

        /// Notation of the text (défaut : essai dms, dm puis degrees)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Target projection (défaut : RT90 et SWEREF99 configurées)
        #[arg(short, long)]
        projection: Option<String>,
    },

    /// List the supported projections
    Projections,

    /// Reproject GeoJSON files between WGS84, RT90 and SWEREF99
    Reproject {
        /// Input file, directory or glob pattern (e.g. './data/*.geojson')
        #[arg(short, long)]
        input: String,

        /// Output directory for GeoJSON files
        #[arg(short, long)]
        output: PathBuf,

        /// Source system: wgs84, a projection id or EPSG code
        #[arg(long)]
        from: String,

        /// Target system: wgs84, a projection id or EPSG code
        #[arg(long)]
        to: String,

        /// Number of threads used for feature reprojection
        #[arg(long, alias = "threads")]
        jobs: Option<usize>,

        /// Coordinate precision (decimal places). Default: 7 for WGS84 (~1cm), 3 for grids (1mm)
        #[arg(long)]
        precision: Option<u8>,

        /// Write the conversion report as JSON to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

/// Notation d'une position WGS84
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Degrés décimaux
    Degrees,
    /// Degrés et minutes décimales
    Dm,
    /// Degrés, minutes et secondes
    Dms,
}

impl From<FormatArg> for Wgs84Format {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Degrees => Wgs84Format::Degrees,
            FormatArg::Dm => Wgs84Format::DegreesMinutes,
            FormatArg::Dms => Wgs84Format::DegreesMinutesSeconds,
        }
    }
}

/// Projections cibles : celle demandée, sinon les défauts configurés
fn target_projections(config: &Config, projection: Option<&str>) -> Result<Vec<Projection>> {
    match projection {
        Some(id) => Ok(vec![id.parse()?]),
        None => Ok(vec![
            config.rt90_projection()?.into(),
            config.sweref99_projection()?.into(),
        ]),
    }
}

fn print_grids(config: &Config, projections: &[Projection], coordinate: GeodeticCoordinate) {
    for &projection in projections {
        let decimals = config.precision_for(CoordinateSystem::Grid(projection)) as usize;
        let grid = swegrid::project(projection, coordinate);
        println!(
            "{:<22} N {:.*}  E {:.*}",
            projection.id(),
            decimals,
            grid.northing,
            decimals,
            grid.easting
        );
    }
}

/// Exécute la commande to-grid
pub fn cmd_to_grid(config: &Config, lat: f64, lon: f64, projection: Option<&str>) -> Result<()> {
    let projections = target_projections(config, projection)?;
    info!(lat, lon, "Conversion WGS84 → grille");
    print_grids(config, &projections, GeodeticCoordinate::new(lat, lon));
    Ok(())
}

/// Exécute la commande to-wgs84
pub fn cmd_to_wgs84(northing: f64, easting: f64, projection: &str, format: Wgs84Format) -> Result<()> {
    let projection: Projection = projection.parse()?;
    info!(northing, easting, projection = %projection, "Conversion grille → WGS84");

    let position = Wgs84Position::from(swegrid::unproject(projection, GridCoordinate::new(northing, easting)));
    println!(
        "{} {}",
        position.latitude_to_string(format),
        position.longitude_to_string(format)
    );
    Ok(())
}

/// Lit une position ; sans format explicite, essaie DMS, DM puis degrés
fn parse_position(text: &str, format: Option<Wgs84Format>) -> Result<Wgs84Position> {
    if let Some(format) = format {
        return Ok(Wgs84Position::parse(text, format)?);
    }
    [
        Wgs84Format::DegreesMinutesSeconds,
        Wgs84Format::DegreesMinutes,
        Wgs84Format::Degrees,
    ]
    .into_iter()
    .find_map(|format| Wgs84Position::parse(text, format).ok())
    .ok_or_else(|| anyhow!("Cannot parse position: {}", text))
}

/// Exécute la commande parse
pub fn cmd_parse(
    config: &Config,
    text: &str,
    format: Option<Wgs84Format>,
    projection: Option<&str>,
) -> Result<()> {
    let position = parse_position(text, format)?;
    let projections = target_projections(config, projection)?;

    let decimals = config.precision_for(CoordinateSystem::Wgs84) as usize;
    println!(
        "{:<22} {:.*}, {:.*}",
        "wgs84",
        decimals,
        position.latitude,
        decimals,
        position.longitude
    );
    print_grids(config, &projections, position.coordinate());
    Ok(())
}

/// Exécute la commande projections
pub fn cmd_projections() {
    println!(
        "{:<22} {:<29} {:>6} {:>14} {:>14} {:<12}",
        "id", "name", "EPSG", "central", "scale", "ellipsoid"
    );
    for projection in Projection::all() {
        let params = projection.parameters();
        println!(
            "{:<22} {:<29} {:>6} {:>14.9} {:>14.11} {:<12}",
            projection.id(),
            projection.name(),
            projection.epsg(),
            params.central_meridian,
            params.scale_factor,
            params.ellipsoid.name()
        );
    }
}

/// Exécute la commande reproject
#[allow(clippy::too_many_arguments)]
pub fn cmd_reproject(
    config: &Config,
    input: &str,
    output: &Path,
    from: &str,
    to: &str,
    jobs: Option<usize>,
    precision: Option<u8>,
    report_path: Option<&Path>,
) -> Result<()> {
    let source: CoordinateSystem = from.parse()?;
    let target: CoordinateSystem = to.parse()?;
    let precision = precision.unwrap_or_else(|| config.precision_for(target));
    let reprojector = GridReprojector::new(source, target).with_precision(precision)?;

    let files = collect_inputs(input)?;
    if files.is_empty() {
        bail!("No GeoJSON files found for {}", input);
    }

    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    let jobs = jobs
        .or(config.jobs)
        .unwrap_or_else(rayon::current_num_threads)
        .max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to build thread pool")?;

    println!("=== Reproject {} → {} ===", source, target);
    println!("Input: {}", input);
    println!("Files: {}", files.len());
    println!("Output: {}", output.display());
    println!("Jobs: {}", jobs);
    println!("Coordinate precision: {} decimals", precision);

    info!(files = files.len(), jobs, precision, "Starting reprojection");

    let start = Instant::now();
    let mut report = ConversionReport::new(source.to_string(), target.to_string());
    for path in &files {
        let file_report = pool.install(|| reproject_one(path, output, &reprojector));
        report.files.push(file_report);
    }
    report.duration_ms = start.elapsed().as_millis() as u64;

    report.print_summary();

    if let Some(path) = report_path {
        report.write_json(path)?;
        info!(path = %path.display(), "Report written");
    }

    if report.status() == ConversionStatus::Failed {
        bail!("No file could be reprojected");
    }

    Ok(())
}

/// Reprojette un fichier vers le dossier de sortie ; les erreurs vont dans le rapport
fn reproject_one(path: &Path, output_dir: &Path, reprojector: &GridReprojector) -> FileReport {
    let mut file_report = FileReport::new(path.display().to_string());
    let start = Instant::now();

    let result = match path.file_name() {
        Some(name) => {
            let output_path = output_dir.join(name);
            if same_file(path, &output_path) {
                Err(anyhow!("Refusing to overwrite the input file {}", path.display()))
            } else {
                reproject_file(path, &output_path, reprojector, &mut file_report)
            }
        }
        None => Err(anyhow!("Not a file: {}", path.display())),
    };

    if let Err(e) = result {
        warn!("Failed to reproject {}: {:#}", path.display(), e);
        file_report.failure = Some(format!("{:#}", e));
    }

    file_report.set_duration(start.elapsed());
    file_report
}

fn same_file(a: &Path, b: &Path) -> bool {
    matches!((a.canonicalize(), b.canonicalize()), (Ok(a), Ok(b)) if a == b)
}

/// Développe l'entrée : fichier, dossier (`*.geojson`) ou motif glob
fn collect_inputs(input: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(input);
    let pattern = if path.is_dir() {
        path.join("*.geojson").to_string_lossy().into_owned()
    } else {
        input.to_string()
    };

    let mut files = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("Invalid input pattern: {}", input))? {
        let file = entry.context("Failed to read input entry")?;
        if file.is_file() {
            files.push(file);
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swegrid::{Rt90Projection, Sweref99Projection};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("swegrid-cli-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_target_projections() {
        let config = Config::default();
        assert_eq!(
            target_projections(&config, None).unwrap(),
            vec![
                Projection::Rt90(Rt90Projection::Gon2_5V),
                Projection::Sweref99(Sweref99Projection::Tm)
            ]
        );
        assert_eq!(
            target_projections(&config, Some("sweref_99_1200")).unwrap(),
            vec![Projection::Sweref99(Sweref99Projection::Zone12_00)]
        );
        assert!(target_projections(&config, Some("lambert93")).is_err());
    }

    #[test]
    fn test_parse_position_guesses_format() {
        let dm = parse_position("N 62º 10.560' E 015º 54.180'", None).unwrap();
        assert!((dm.latitude - 62.176).abs() < 1e-9);
        assert!((dm.longitude - 15.903).abs() < 1e-9);

        let dms = parse_position("N 62º 10' 33.60\" E 015º 54' 10.80\"", None).unwrap();
        assert!((dms.latitude - 62.176).abs() < 1e-9);

        let degrees = parse_position("N 59.3306 E 18.0596", None).unwrap();
        assert_eq!(degrees.latitude, 59.3306);

        assert!(parse_position("N 62º 10.560' E 015º 54.180'", Some(Wgs84Format::Degrees)).is_err());
        assert!(parse_position("Stockholm", None).is_err());
    }

    #[test]
    fn test_collect_inputs() {
        let dir = temp_dir("inputs");
        std::fs::write(dir.join("a.geojson"), "{}").unwrap();
        std::fs::write(dir.join("b.geojson"), "{}").unwrap();
        std::fs::write(dir.join("notes.txt"), "").unwrap();

        let from_dir = collect_inputs(dir.to_str().unwrap()).unwrap();
        assert_eq!(from_dir.len(), 2);

        let pattern = dir.join("a.*");
        let from_glob = collect_inputs(pattern.to_str().unwrap()).unwrap();
        assert_eq!(from_glob, vec![dir.join("a.geojson")]);

        assert!(collect_inputs(dir.join("missing.geojson").to_str().unwrap())
            .unwrap()
            .is_empty());

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_reproject_one_reports_failures() {
        let dir = temp_dir("reproject-one");
        let input = dir.join("broken.geojson");
        std::fs::write(&input, "not json").unwrap();

        let reprojector = GridReprojector::new(
            CoordinateSystem::Wgs84,
            CoordinateSystem::Grid(Projection::Sweref99(Sweref99Projection::Tm)),
        );
        let out_dir = dir.join("out");
        std::fs::create_dir_all(&out_dir).unwrap();

        let report = reproject_one(&input, &out_dir, &reprojector);
        assert!(report.failure.is_some());

        // Même dossier en entrée et en sortie : pas d'écrasement
        std::fs::write(&input, r#"{"type": "Point", "coordinates": [18.0, 59.0]}"#).unwrap();
        let report = reproject_one(&input, &dir, &reprojector);
        assert!(report.failure.unwrap().contains("overwrite"));

        let report = reproject_one(&input, &out_dir, &reprojector);
        assert!(report.failure.is_none());
        assert_eq!(report.converted, 1);
        assert!(out_dir.join("broken.geojson").exists());

        std::fs::remove_dir_all(dir).ok();
    }
}
