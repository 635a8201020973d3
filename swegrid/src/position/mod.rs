//! Positions typées par système de coordonnées
//!
//! Chaque position porte sa projection ; la conversion passe par la table
//! de paramètres puis par le moteur Gauss-Krüger, sans état partagé.

pub mod dms;

use std::fmt;

use tracing::debug;

use crate::projection::{Rt90Projection, Sweref99Projection};
use crate::{GeodesyError, GeodeticCoordinate, GridCoordinate};

pub use dms::{Axis, Wgs84Format};

/// Position WGS84 en degrés décimaux
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wgs84Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Wgs84Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Lit une position complète, ex: `N 62º 10.560' E 015º 54.180'`
    pub fn parse(text: &str, format: Wgs84Format) -> Result<Self, GeodesyError> {
        let (latitude, longitude) = dms::parse_position(text, format)?;
        Ok(Self::new(latitude, longitude))
    }

    /// Remplace la latitude par la valeur lue dans `text`
    pub fn set_latitude_from_str(&mut self, text: &str, format: Wgs84Format) -> Result<(), GeodesyError> {
        self.latitude = dms::parse_axis(text, Axis::Latitude, format)?;
        Ok(())
    }

    /// Remplace la longitude par la valeur lue dans `text`
    pub fn set_longitude_from_str(&mut self, text: &str, format: Wgs84Format) -> Result<(), GeodesyError> {
        self.longitude = dms::parse_axis(text, Axis::Longitude, format)?;
        Ok(())
    }

    pub fn latitude_to_string(&self, format: Wgs84Format) -> String {
        dms::format_axis(self.latitude, Axis::Latitude, format)
    }

    pub fn longitude_to_string(&self, format: Wgs84Format) -> String {
        dms::format_axis(self.longitude, Axis::Longitude, format)
    }

    pub fn coordinate(&self) -> GeodeticCoordinate {
        GeodeticCoordinate::new(self.latitude, self.longitude)
    }

    /// Convertit vers une grille RT90
    pub fn to_rt90(&self, projection: Rt90Projection) -> Rt90Position {
        Rt90Position::from_wgs84(self, projection)
    }

    /// Convertit vers une grille SWEREF99
    pub fn to_sweref99(&self, projection: Sweref99Projection) -> Sweref99Position {
        Sweref99Position::from_wgs84(self, projection)
    }
}

impl From<GeodeticCoordinate> for Wgs84Position {
    fn from(coord: GeodeticCoordinate) -> Self {
        Self::new(coord.latitude, coord.longitude)
    }
}

impl fmt::Display for Wgs84Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.latitude_to_string(Wgs84Format::DegreesMinutesSeconds),
            self.longitude_to_string(Wgs84Format::DegreesMinutesSeconds)
        )
    }
}

/// Position dans une grille RT90 (X = northing, Y = easting)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rt90Position {
    pub northing: f64,
    pub easting: f64,
    pub projection: Rt90Projection,
}

impl Rt90Position {
    /// Position en RT90 2.5 gon V (projection par défaut)
    pub fn new(northing: f64, easting: f64) -> Self {
        Self::with_projection(northing, easting, Rt90Projection::default())
    }

    pub fn with_projection(northing: f64, easting: f64, projection: Rt90Projection) -> Self {
        Self {
            northing,
            easting,
            projection,
        }
    }

    pub fn from_wgs84(position: &Wgs84Position, projection: Rt90Projection) -> Self {
        let grid = crate::project(projection.into(), position.coordinate());
        debug!(projection = %projection, northing = grid.northing, easting = grid.easting, "WGS84 → RT90");
        Self::with_projection(grid.northing, grid.easting, projection)
    }

    pub fn to_wgs84(&self) -> Wgs84Position {
        crate::unproject(self.projection.into(), self.coordinate()).into()
    }

    pub fn coordinate(&self) -> GridCoordinate {
        GridCoordinate::new(self.northing, self.easting)
    }
}

impl fmt::Display for Rt90Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X: {} Y: {} Projection: {}",
            self.northing, self.easting, self.projection
        )
    }
}

/// Position dans une grille SWEREF99 (N = northing, E = easting)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweref99Position {
    pub northing: f64,
    pub easting: f64,
    pub projection: Sweref99Projection,
}

impl Sweref99Position {
    /// Position en SWEREF 99 TM (projection par défaut)
    pub fn new(northing: f64, easting: f64) -> Self {
        Self::with_projection(northing, easting, Sweref99Projection::default())
    }

    pub fn with_projection(northing: f64, easting: f64, projection: Sweref99Projection) -> Self {
        Self {
            northing,
            easting,
            projection,
        }
    }

    pub fn from_wgs84(position: &Wgs84Position, projection: Sweref99Projection) -> Self {
        let grid = crate::project(projection.into(), position.coordinate());
        debug!(projection = %projection, northing = grid.northing, easting = grid.easting, "WGS84 → SWEREF99");
        Self::with_projection(grid.northing, grid.easting, projection)
    }

    pub fn to_wgs84(&self) -> Wgs84Position {
        crate::unproject(self.projection.into(), self.coordinate()).into()
    }

    pub fn coordinate(&self) -> GridCoordinate {
        GridCoordinate::new(self.northing, self.easting)
    }
}

impl fmt::Display for Sweref99Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "N: {} E: {} Projection: {}",
            self.northing, self.easting, self.projection
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::round_to;

    #[test]
    fn test_rt90_default_projection() {
        let pos = Rt90Position::new(6583052.0, 1627548.0);
        assert_eq!(pos.projection, Rt90Projection::Gon2_5V);
        assert_eq!(
            pos.to_string(),
            "X: 6583052 Y: 1627548 Projection: rt90_2.5_gon_v"
        );
    }

    #[test]
    fn test_rt90_to_wgs84() {
        // Valeurs Hitta.se
        let wgs = Rt90Position::new(6583052.0, 1627548.0).to_wgs84();
        assert_eq!(round_to(wgs.latitude, 4), 59.3489);
        assert_eq!(round_to(wgs.longitude, 4), 18.0473);
    }

    #[test]
    fn test_rt90_to_wgs84_dms_text() {
        // Lantmäteriet : N 59º 20' 56.09287" E 18º 2' 50.34806"
        let wgs = Rt90Position::new(6583052.0, 1627548.0).to_wgs84();
        assert_eq!(
            wgs.latitude_to_string(Wgs84Format::DegreesMinutesSeconds),
            "N 59º 20' 56.09287\""
        );
        assert_eq!(
            wgs.longitude_to_string(Wgs84Format::DegreesMinutesSeconds),
            "E 18º 2' 50.34806\""
        );
    }

    #[test]
    fn test_sweref99_to_wgs84_dms_text() {
        let wgs = Sweref99Position::new(6652797.165, 658185.201).to_wgs84();
        assert_eq!(
            wgs.latitude_to_string(Wgs84Format::DegreesMinutesSeconds),
            "N 59º 58' 55.23001\""
        );
        assert_eq!(
            wgs.longitude_to_string(Wgs84Format::DegreesMinutesSeconds),
            "E 17º 50' 6.11997\""
        );
        assert_eq!(wgs.to_string(), "N 59º 58' 55.23001\" E 17º 50' 6.11997\"");
    }

    #[test]
    fn test_coordinates() {
        let rt90 = Rt90Position::new(6583052.0, 1627548.0);
        assert_eq!(rt90.coordinate(), GridCoordinate::new(6583052.0, 1627548.0));
        let sweref = Sweref99Position::new(6652797.165, 658185.201);
        assert_eq!(sweref.coordinate().easting, 658185.201);
        let wgs = Wgs84Position::new(59.3293, 18.0686);
        assert_eq!(wgs.coordinate(), GeodeticCoordinate::new(59.3293, 18.0686));
        assert_eq!(Wgs84Position::from(wgs.coordinate()), wgs);
    }

    #[test]
    fn test_wgs84_to_rt90_from_dms() {
        let wgs = Wgs84Position::parse(
            "N 59º 58' 55.23\" E 017º 50' 06.12\"",
            Wgs84Format::DegreesMinutesSeconds,
        )
        .unwrap();
        let rt90 = wgs.to_rt90(Rt90Projection::default());
        assert_eq!(round_to(rt90.northing, 3), 6653174.343);
        assert_eq!(round_to(rt90.easting, 3), 1613318.742);
    }

    #[test]
    fn test_wgs84_to_sweref99_with_setters() {
        let mut wgs = Wgs84Position::new(0.0, 0.0);
        wgs.set_latitude_from_str("N 59º 58' 55.23\"", Wgs84Format::DegreesMinutesSeconds)
            .unwrap();
        wgs.set_longitude_from_str("E 017º 50' 06.12\"", Wgs84Format::DegreesMinutesSeconds)
            .unwrap();

        let sweref = wgs.to_sweref99(Sweref99Projection::Tm);
        assert_eq!(round_to(sweref.northing, 3), 6652797.165);
        assert_eq!(round_to(sweref.easting, 3), 658185.201);
    }

    #[test]
    fn test_sweref99_to_wgs84() {
        let wgs = Sweref99Position::new(6652797.165, 658185.201).to_wgs84();
        let lat = 59.0 + 58.0 / 60.0 + 55.23 / 3600.0;
        let lon = 17.0 + 50.0 / 60.0 + 6.12 / 3600.0;
        assert!((wgs.latitude - lat).abs() < 1e-7, "lat={}", wgs.latitude);
        assert!((wgs.longitude - lon).abs() < 1e-7, "lon={}", wgs.longitude);
    }

    #[test]
    fn test_to_and_from_rt90() {
        let wgs = Wgs84Position::new(59.3293, 18.0686);
        let back = wgs.to_rt90(Rt90Projection::default()).to_wgs84();
        assert_eq!(round_to(back.latitude, 4), 59.3293);
        assert_eq!(round_to(back.longitude, 4), 18.0686);
    }

    #[test]
    fn test_to_rt90_rounded() {
        let rt90 = Wgs84Position::new(59.3293, 18.0686).to_rt90(Rt90Projection::default());
        assert_eq!(rt90.northing.round(), 6580909.0);
        assert_eq!(rt90.easting.round(), 1628833.0);
    }

    #[test]
    fn test_wgs84_display() {
        let wgs = Wgs84Position::new(59.5, 18.25);
        assert_eq!(wgs.to_string(), "N 59º 30' 0\" E 18º 15' 0\"");
    }
}
