//! Emprise de validité des conversions
//!
//! Les séries tronquées tiennent la précision annoncée sur la Suède
//! continentale (≈ 55°–69° N, 11°–24° E). Au-delà, le résultat reste
//! calculé mais n'est plus garanti : on le signale sans échouer.

use crate::{DomainWarning, GeodeticCoordinate};

pub const MIN_LATITUDE: f64 = 54.0;
pub const MAX_LATITUDE: f64 = 70.0;
pub const MIN_LONGITUDE: f64 = 10.0;
pub const MAX_LONGITUDE: f64 = 25.0;

/// Vérifie qu'un point géodésique est dans l'emprise supportée
pub fn check_geodetic(coord: &GeodeticCoordinate) -> Result<(), DomainWarning> {
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&coord.latitude) {
        return Err(DomainWarning::Latitude(coord.latitude));
    }
    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&coord.longitude) {
        return Err(DomainWarning::Longitude(coord.longitude));
    }
    Ok(())
}
