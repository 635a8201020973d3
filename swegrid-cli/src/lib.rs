//! # swegrid-cli
//!
//! Outil en ligne de commande autour de `swegrid` : conversions ponctuelles
//! WGS84 ⇄ RT90/SWEREF99 et reprojection de fichiers GeoJSON.
//!
//! ## Usage CLI
//!
//! ```bash
//! # Point WGS84 vers RT90 2.5 gon V
//! swegrid to-grid --lat 59.3306 --lon 18.0596 --projection rt90_2.5_gon_v
//!
//! # Grille vers WGS84 en degrés/minutes/secondes
//! swegrid to-wgs84 --northing 6583052 --easting 1627548 --projection rt90_2.5_gon_v
//!
//! # Reprojection d'un dossier GeoJSON vers SWEREF 99 TM
//! swegrid reproject --input './data/*.geojson' --output ./sweref/ --from wgs84 --to sweref_99_tm
//! ```

pub mod config;
pub mod export;
pub mod reproject;
pub mod report;

pub use config::Config;
pub use reproject::{CoordinateSystem, GridReprojector};
pub use report::{ConversionReport, ConversionStatus, FileReport};
