//! Types de données pour le crate swegrid

/// Point en coordonnées géodésiques (degrés décimaux)
///
/// Aucune validation : une latitude hors [-90, 90] ou une longitude hors
/// [-180, 180] donne un résultat numérique sans signification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticCoordinate {
    /// Latitude en degrés
    pub latitude: f64,
    /// Longitude en degrés
    pub longitude: f64,
}

impl GeodeticCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Arrondit les deux composantes à `decimals` décimales
    pub fn rounded(self, decimals: u8) -> Self {
        Self {
            latitude: round_to(self.latitude, decimals),
            longitude: round_to(self.longitude, decimals),
        }
    }
}

/// Point en coordonnées planes (mètres) dans une projection donnée
///
/// Deux `GridCoordinate` ne sont comparables que si elles viennent de la
/// même projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCoordinate {
    /// Northing (axe X suédois) en mètres
    pub northing: f64,
    /// Easting (axe Y suédois) en mètres
    pub easting: f64,
}

impl GridCoordinate {
    pub fn new(northing: f64, easting: f64) -> Self {
        Self { northing, easting }
    }

    /// Arrondit les deux composantes à `decimals` décimales (3 = millimètre)
    pub fn rounded(self, decimals: u8) -> Self {
        Self {
            northing: round_to(self.northing, decimals),
            easting: round_to(self.easting, decimals),
        }
    }
}

/// Arrondi décimal (demi vers l'extérieur)
pub fn round_to(value: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
