//! Reprojection de géométries entre WGS84, RT90 et SWEREF99
//!
//! Ordre des axes (GeoJSON) :
//! - WGS84 : `[longitude, latitude]`
//! - grilles : `[easting, northing]`
//!
//! Seuls les deux premiers axes sont transformés ; une altitude éventuelle
//! est recopiée telle quelle par l'export GeoJSON.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use geo::Coord;
use swegrid::{extent, gauss_kruger, round_to, GeodeticCoordinate, Projection, ProjectionParameters};

/// Système de coordonnées source ou cible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    Wgs84,
    Grid(Projection),
}

impl CoordinateSystem {
    /// Code EPSG (4326 pour WGS84)
    pub fn epsg(&self) -> u32 {
        match self {
            Self::Wgs84 => 4326,
            Self::Grid(projection) => projection.epsg(),
        }
    }

    /// Précision par défaut : 7 décimales en degrés (~1 cm), 3 en mètres (1 mm)
    pub fn default_precision(&self) -> u8 {
        match self {
            Self::Wgs84 => 7,
            Self::Grid(_) => 3,
        }
    }
}

impl FromStr for CoordinateSystem {
    type Err = anyhow::Error;

    /// Accepte `wgs84`, un identifiant de projection ou un code `EPSG:xxxx`,
    /// sans tenir compte de la casse
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        if lower == "wgs84" {
            return Ok(Self::Wgs84);
        }

        let code = lower.strip_prefix("epsg:").unwrap_or(&lower);
        if let Ok(epsg) = code.parse::<u32>() {
            if epsg == 4326 {
                return Ok(Self::Wgs84);
            }
            // Les variantes Bessel partagent le code EPSG mais attendent le datum RT90
            return Projection::all()
                .find(|p| p.epsg() == epsg && !matches!(p, Projection::Rt90(r) if r.is_bessel()))
                .map(Self::Grid)
                .with_context(|| format!("EPSG:{} non supporté", epsg));
        }

        let projection: Projection = lower
            .parse()
            .with_context(|| format!("Système de coordonnées inconnu: {}", s))?;
        Ok(Self::Grid(projection))
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wgs84 => f.write_str("wgs84"),
            Self::Grid(projection) => write!(f, "{}", projection),
        }
    }
}

/// Reprojection entre deux systèmes, sans état mutable (partageable entre threads)
#[derive(Debug, Clone, Copy)]
pub struct GridReprojector {
    source: CoordinateSystem,
    target: CoordinateSystem,
    source_params: Option<ProjectionParameters>,
    target_params: Option<ProjectionParameters>,
    precision: u8,
}

impl GridReprojector {
    /// Crée un nouveau reprojector ; la précision par défaut dépend de la cible
    pub fn new(source: CoordinateSystem, target: CoordinateSystem) -> Self {
        let params = |system: CoordinateSystem| match system {
            CoordinateSystem::Wgs84 => None,
            CoordinateSystem::Grid(projection) => Some(projection.parameters()),
        };

        Self {
            source,
            target,
            source_params: params(source),
            target_params: params(target),
            precision: target.default_precision(),
        }
    }

    /// Nombre de décimales des coordonnées produites
    pub fn with_precision(mut self, precision: u8) -> Result<Self> {
        if precision > 15 {
            bail!("Précision trop grande: {} (max 15)", precision);
        }
        self.precision = precision;
        Ok(self)
    }

    pub fn source(&self) -> CoordinateSystem {
        self.source
    }

    pub fn target(&self) -> CoordinateSystem {
        self.target
    }

    pub fn is_identity(&self) -> bool {
        self.source == self.target
    }

    /// Coordonnée source → géodésique
    fn to_geodetic(&self, c: Coord) -> GeodeticCoordinate {
        match &self.source_params {
            None => GeodeticCoordinate::new(c.y, c.x),
            Some(params) => gauss_kruger::inverse(params, c.y, c.x),
        }
    }

    /// Géodésique → coordonnée cible
    fn from_geodetic(&self, geo: GeodeticCoordinate) -> Coord {
        match &self.target_params {
            None => Coord {
                x: geo.longitude,
                y: geo.latitude,
            },
            Some(params) => {
                let grid = gauss_kruger::forward(params, geo.latitude, geo.longitude);
                Coord {
                    x: grid.easting,
                    y: grid.northing,
                }
            }
        }
    }

    /// Transforme un point (x, y) de la source vers la cible
    pub fn transform_coord(&self, c: Coord) -> Coord {
        let out = if self.is_identity() {
            c
        } else {
            self.from_geodetic(self.to_geodetic(c))
        };
        Coord {
            x: round_to(out.x, self.precision),
            y: round_to(out.y, self.precision),
        }
    }

    /// Sommet source hors de l'emprise suédoise (précision non garantie)
    pub fn is_out_of_extent(&self, c: Coord) -> bool {
        extent::check_geodetic(&self.to_geodetic(c)).is_err()
    }
}
