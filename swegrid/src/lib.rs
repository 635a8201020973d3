//! # swegrid
//!
//! Conversions entre WGS84 et les grilles nationales suédoises RT90 et
//! SWEREF99 (projection de Gauss-Krüger).
//!
//! ## Usage
//!
//! ```
//! use swegrid::{forward, inverse};
//!
//! // Stockholm Centralstation
//! let grid = forward("rt90_2.5_gon_v", 59.3306, 18.0596)?;
//! assert_eq!(grid.northing.round(), 6581036.0);
//! assert_eq!(grid.easting.round(), 1628315.0);
//!
//! let geo = inverse("sweref_99_tm", 6652797.165, 658185.201)?;
//! assert!((geo.latitude - 59.98201).abs() < 1e-4);
//! # Ok::<(), swegrid::GeodesyError>(())
//! ```
//!
//! Les positions typées ([`Wgs84Position`], [`Rt90Position`],
//! [`Sweref99Position`]) offrent la même conversion ainsi que la lecture et
//! l'écriture en degrés/minutes/secondes.

mod error;
pub mod extent;
pub mod gauss_kruger;
pub mod position;
pub mod projection;
mod types;

pub use error::{DomainWarning, GeodesyError};
pub use position::{Rt90Position, Sweref99Position, Wgs84Format, Wgs84Position};
pub use projection::{lookup, Grid, Projection, ProjectionParameters, Rt90Projection, Sweref99Projection};
pub use types::{round_to, GeodeticCoordinate, GridCoordinate};

use tracing::warn;

/// Projette un point WGS84 dans la grille `projection`
///
/// Un point hors de l'emprise suédoise est converti quand même ; un
/// avertissement est journalisé car la précision n'est plus garantie.
pub fn project(projection: Projection, coordinate: GeodeticCoordinate) -> GridCoordinate {
    if let Err(warning) = extent::check_geodetic(&coordinate) {
        warn!(projection = projection.id(), %warning, "Point outside the supported extent");
    }
    gauss_kruger::forward(&projection.parameters(), coordinate.latitude, coordinate.longitude)
}

/// Ramène un point de la grille `projection` en WGS84
pub fn unproject(projection: Projection, grid: GridCoordinate) -> GeodeticCoordinate {
    let geodetic = gauss_kruger::inverse(&projection.parameters(), grid.northing, grid.easting);
    if let Err(warning) = extent::check_geodetic(&geodetic) {
        warn!(
            projection = projection.id(),
            northing = grid.northing,
            easting = grid.easting,
            %warning,
            "Point outside the supported extent"
        );
    }
    geodetic
}

/// Convertit une latitude/longitude WGS84 (degrés) vers la grille `projection_id`
///
/// # Errors
///
/// Retourne `GeodesyError::UnknownProjection` si l'identifiant est inconnu.
pub fn forward(projection_id: &str, latitude: f64, longitude: f64) -> Result<GridCoordinate, GeodesyError> {
    let projection: Projection = projection_id.parse()?;
    Ok(project(projection, GeodeticCoordinate::new(latitude, longitude)))
}

/// Convertit des coordonnées de la grille `projection_id` vers WGS84 (degrés)
///
/// # Errors
///
/// Retourne `GeodesyError::UnknownProjection` si l'identifiant est inconnu.
pub fn inverse(projection_id: &str, northing: f64, easting: f64) -> Result<GeodeticCoordinate, GeodesyError> {
    let projection: Projection = projection_id.parse()?;
    Ok(unproject(projection, GridCoordinate::new(northing, easting)))
}
