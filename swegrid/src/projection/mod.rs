//! Catalogue des projections RT90 et SWEREF99
//!
//! L'ensemble des projections supportées est fermé : une énumération par
//! famille de grille, regroupées dans [`Projection`]. Les identifiants texte
//! (`rt90_2.5_gon_v`, `sweref_99_tm`, ...) ne servent qu'en entrée/sortie.

mod ellipsoid;
mod params;

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::GeodesyError;

pub use ellipsoid::{Ellipsoid, KrugerSeries, BESSEL_1841, GRS80};
pub use params::ProjectionParameters;

/// Famille de grille
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grid {
    Rt90,
    Sweref99,
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grid::Rt90 => f.write_str("RT90"),
            Grid::Sweref99 => f.write_str("SWEREF99"),
        }
    }
}

/// Variantes RT90 (zones de 2.5 gon, V = väst, O = öst)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rt90Projection {
    Gon7_5V,
    Gon5_0V,
    #[default]
    Gon2_5V,
    Gon0_0V,
    Gon2_5O,
    Gon5_0O,
    BesselGon7_5V,
    BesselGon5_0V,
    BesselGon2_5V,
    BesselGon0_0V,
    BesselGon2_5O,
    BesselGon5_0O,
}

/// Mapping des variantes RT90 : (variante, identifiant, alias, EPSG)
const RT90_PROJECTIONS: &[(Rt90Projection, &str, &str, u32)] = &[
    (Rt90Projection::Gon7_5V, "rt90_7.5_gon_v", "rt90_7_5_gon_v", 3019),
    (Rt90Projection::Gon5_0V, "rt90_5.0_gon_v", "rt90_5_0_gon_v", 3020),
    (Rt90Projection::Gon2_5V, "rt90_2.5_gon_v", "rt90_2_5_gon_v", 3021),
    (Rt90Projection::Gon0_0V, "rt90_0.0_gon_v", "rt90_0_0_gon_v", 3022),
    (Rt90Projection::Gon2_5O, "rt90_2.5_gon_o", "rt90_2_5_gon_o", 3023),
    (Rt90Projection::Gon5_0O, "rt90_5.0_gon_o", "rt90_5_0_gon_o", 3024),
    (Rt90Projection::BesselGon7_5V, "bessel_rt90_7.5_gon_v", "bessel_rt90_7_5_gon_v", 3019),
    (Rt90Projection::BesselGon5_0V, "bessel_rt90_5.0_gon_v", "bessel_rt90_5_0_gon_v", 3020),
    (Rt90Projection::BesselGon2_5V, "bessel_rt90_2.5_gon_v", "bessel_rt90_2_5_gon_v", 3021),
    (Rt90Projection::BesselGon0_0V, "bessel_rt90_0.0_gon_v", "bessel_rt90_0_0_gon_v", 3022),
    (Rt90Projection::BesselGon2_5O, "bessel_rt90_2.5_gon_o", "bessel_rt90_2_5_gon_o", 3023),
    (Rt90Projection::BesselGon5_0O, "bessel_rt90_5.0_gon_o", "bessel_rt90_5_0_gon_o", 3024),
];

impl Rt90Projection {
    /// Les six zones RT90 directes depuis WGS84
    pub const ALL: [Rt90Projection; 6] = [
        Self::Gon7_5V,
        Self::Gon5_0V,
        Self::Gon2_5V,
        Self::Gon0_0V,
        Self::Gon2_5O,
        Self::Gon5_0O,
    ];

    /// Les mêmes zones sur Bessel 1841 (entrée dans le datum RT90)
    pub const BESSEL: [Rt90Projection; 6] = [
        Self::BesselGon7_5V,
        Self::BesselGon5_0V,
        Self::BesselGon2_5V,
        Self::BesselGon0_0V,
        Self::BesselGon2_5O,
        Self::BesselGon5_0O,
    ];

    fn entry(self) -> &'static (Rt90Projection, &'static str, &'static str, u32) {
        // La table suit l'ordre de déclaration des variantes
        &RT90_PROJECTIONS[self as usize]
    }

    /// Identifiant canonique (ex: `rt90_2.5_gon_v`)
    pub fn id(self) -> &'static str {
        self.entry().1
    }

    /// Code EPSG de la grille RT90 correspondante
    pub fn epsg(self) -> u32 {
        self.entry().3
    }

    /// Nom lisible (ex: `RT90 2.5 gon V`)
    pub fn name(self) -> &'static str {
        match self {
            Self::Gon7_5V => "RT90 7.5 gon V",
            Self::Gon5_0V => "RT90 5 gon V",
            Self::Gon2_5V => "RT90 2.5 gon V",
            Self::Gon0_0V => "RT90 0 gon",
            Self::Gon2_5O => "RT90 2.5 gon O",
            Self::Gon5_0O => "RT90 5 gon O",
            Self::BesselGon7_5V => "RT90 7.5 gon V (Bessel 1841)",
            Self::BesselGon5_0V => "RT90 5 gon V (Bessel 1841)",
            Self::BesselGon2_5V => "RT90 2.5 gon V (Bessel 1841)",
            Self::BesselGon0_0V => "RT90 0 gon (Bessel 1841)",
            Self::BesselGon2_5O => "RT90 2.5 gon O (Bessel 1841)",
            Self::BesselGon5_0O => "RT90 5 gon O (Bessel 1841)",
        }
    }

    pub fn is_bessel(self) -> bool {
        Self::BESSEL.contains(&self)
    }
}

/// Zones SWEREF99 (TM national + 12 zones locales)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sweref99Projection {
    #[default]
    Tm,
    Zone12_00,
    Zone13_30,
    Zone15_00,
    Zone16_30,
    Zone18_00,
    Zone14_15,
    Zone15_45,
    Zone17_15,
    Zone18_45,
    Zone20_15,
    Zone21_45,
    Zone23_15,
}

/// Mapping des zones SWEREF99 : (zone, identifiant, alias, EPSG)
const SWEREF99_PROJECTIONS: &[(Sweref99Projection, &str, &str, u32)] = &[
    (Sweref99Projection::Tm, "sweref_99_tm", "sweref_99_tm", 3006),
    (Sweref99Projection::Zone12_00, "sweref_99_1200", "sweref_99_12_00", 3007),
    (Sweref99Projection::Zone13_30, "sweref_99_1330", "sweref_99_13_30", 3008),
    (Sweref99Projection::Zone15_00, "sweref_99_1500", "sweref_99_15_00", 3009),
    (Sweref99Projection::Zone16_30, "sweref_99_1630", "sweref_99_16_30", 3010),
    (Sweref99Projection::Zone18_00, "sweref_99_1800", "sweref_99_18_00", 3011),
    (Sweref99Projection::Zone14_15, "sweref_99_1415", "sweref_99_14_15", 3012),
    (Sweref99Projection::Zone15_45, "sweref_99_1545", "sweref_99_15_45", 3013),
    (Sweref99Projection::Zone17_15, "sweref_99_1715", "sweref_99_17_15", 3014),
    (Sweref99Projection::Zone18_45, "sweref_99_1845", "sweref_99_18_45", 3015),
    (Sweref99Projection::Zone20_15, "sweref_99_2015", "sweref_99_20_15", 3016),
    (Sweref99Projection::Zone21_45, "sweref_99_2145", "sweref_99_21_45", 3017),
    (Sweref99Projection::Zone23_15, "sweref_99_2315", "sweref_99_23_15", 3018),
];

impl Sweref99Projection {
    pub const ALL: [Sweref99Projection; 13] = [
        Self::Tm,
        Self::Zone12_00,
        Self::Zone13_30,
        Self::Zone15_00,
        Self::Zone16_30,
        Self::Zone18_00,
        Self::Zone14_15,
        Self::Zone15_45,
        Self::Zone17_15,
        Self::Zone18_45,
        Self::Zone20_15,
        Self::Zone21_45,
        Self::Zone23_15,
    ];

    fn entry(self) -> &'static (Sweref99Projection, &'static str, &'static str, u32) {
        &SWEREF99_PROJECTIONS[self as usize]
    }

    /// Identifiant canonique (ex: `sweref_99_1200`)
    pub fn id(self) -> &'static str {
        self.entry().1
    }

    pub fn epsg(self) -> u32 {
        self.entry().3
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Tm => "SWEREF 99 TM",
            Self::Zone12_00 => "SWEREF 99 12 00",
            Self::Zone13_30 => "SWEREF 99 13 30",
            Self::Zone15_00 => "SWEREF 99 15 00",
            Self::Zone16_30 => "SWEREF 99 16 30",
            Self::Zone18_00 => "SWEREF 99 18 00",
            Self::Zone14_15 => "SWEREF 99 14 15",
            Self::Zone15_45 => "SWEREF 99 15 45",
            Self::Zone17_15 => "SWEREF 99 17 15",
            Self::Zone18_45 => "SWEREF 99 18 45",
            Self::Zone20_15 => "SWEREF 99 20 15",
            Self::Zone21_45 => "SWEREF 99 21 45",
            Self::Zone23_15 => "SWEREF 99 23 15",
        }
    }
}

/// Projection supportée (ensemble fermé)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    Rt90(Rt90Projection),
    Sweref99(Sweref99Projection),
}

impl Projection {
    /// Toutes les projections, RT90 (directes puis Bessel) puis SWEREF99
    pub fn all() -> impl Iterator<Item = Projection> {
        Rt90Projection::ALL
            .into_iter()
            .chain(Rt90Projection::BESSEL)
            .map(Projection::Rt90)
            .chain(Sweref99Projection::ALL.into_iter().map(Projection::Sweref99))
    }

    pub fn grid(self) -> Grid {
        match self {
            Projection::Rt90(_) => Grid::Rt90,
            Projection::Sweref99(_) => Grid::Sweref99,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Projection::Rt90(p) => p.id(),
            Projection::Sweref99(p) => p.id(),
        }
    }

    pub fn epsg(self) -> u32 {
        match self {
            Projection::Rt90(p) => p.epsg(),
            Projection::Sweref99(p) => p.epsg(),
        }
    }

    /// Nom lisible (ex: `SWEREF 99 TM`)
    pub fn name(self) -> &'static str {
        match self {
            Projection::Rt90(p) => p.name(),
            Projection::Sweref99(p) => p.name(),
        }
    }

    pub fn parameters(self) -> ProjectionParameters {
        match self {
            Projection::Rt90(p) => p.parameters(),
            Projection::Sweref99(p) => p.parameters(),
        }
    }
}

impl From<Rt90Projection> for Projection {
    fn from(p: Rt90Projection) -> Self {
        Projection::Rt90(p)
    }
}

impl From<Sweref99Projection> for Projection {
    fn from(p: Sweref99Projection) -> Self {
        Projection::Sweref99(p)
    }
}

impl FromStr for Projection {
    type Err = GeodesyError;

    /// Correspondance exacte sur l'identifiant canonique ou son alias
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for &(projection, id, alias, _) in RT90_PROJECTIONS {
            if s == id || s == alias {
                return Ok(Projection::Rt90(projection));
            }
        }
        for &(projection, id, alias, _) in SWEREF99_PROJECTIONS {
            if s == id || s == alias {
                return Ok(Projection::Sweref99(projection));
            }
        }
        Err(GeodesyError::UnknownProjection(s.to_string()))
    }
}

impl FromStr for Rt90Projection {
    type Err = GeodesyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Projection>()? {
            Projection::Rt90(p) => Ok(p),
            Projection::Sweref99(_) => Err(GeodesyError::UnknownProjection(format!(
                "{} is not an RT90 projection",
                s
            ))),
        }
    }
}

impl FromStr for Sweref99Projection {
    type Err = GeodesyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Projection>()? {
            Projection::Sweref99(p) => Ok(p),
            Projection::Rt90(_) => Err(GeodesyError::UnknownProjection(format!(
                "{} is not a SWEREF99 projection",
                s
            ))),
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl fmt::Display for Rt90Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl fmt::Display for Sweref99Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Recherche les paramètres d'une projection par identifiant exact
///
/// Un identifiant inconnu est une erreur explicite : pas de repli
/// silencieux sur une projection par défaut.
pub fn lookup(projection_id: &str) -> Result<ProjectionParameters, GeodesyError> {
    let projection: Projection = projection_id.parse()?;
    debug!(projection = projection_id, epsg = projection.epsg(), "Projection lookup");
    Ok(projection.parameters())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_size() {
        assert_eq!(Projection::all().count(), 25);
        assert_eq!(
            Projection::all().filter(|p| p.grid() == Grid::Sweref99).count(),
            13
        );
    }

    #[test]
    fn test_parse_canonical_and_alias() {
        assert_eq!(
            "rt90_2.5_gon_v".parse::<Projection>().unwrap(),
            Projection::Rt90(Rt90Projection::Gon2_5V)
        );
        assert_eq!(
            "rt90_2_5_gon_v".parse::<Projection>().unwrap(),
            Projection::Rt90(Rt90Projection::Gon2_5V)
        );
        assert_eq!(
            "sweref_99_12_00".parse::<Projection>().unwrap(),
            Projection::Sweref99(Sweref99Projection::Zone12_00)
        );
    }

    #[test]
    fn test_unknown_projection() {
        let err = "rt90_3.0_gon_v".parse::<Projection>().unwrap_err();
        assert_eq!(err, GeodesyError::UnknownProjection("rt90_3.0_gon_v".to_string()));
        assert!(lookup("").is_err());
        // Pas de correspondance approximative
        assert!(lookup("RT90_2.5_GON_V").is_err());
        assert!(lookup(" sweref_99_tm").is_err());
    }

    #[test]
    fn test_family_mismatch() {
        assert!("sweref_99_tm".parse::<Rt90Projection>().is_err());
        assert!("rt90_0.0_gon_v".parse::<Sweref99Projection>().is_err());
        assert_eq!(
            "rt90_0.0_gon_v".parse::<Rt90Projection>().unwrap(),
            Rt90Projection::Gon0_0V
        );
    }

    #[test]
    fn test_display_roundtrip() {
        for projection in Projection::all() {
            let parsed: Projection = projection.to_string().parse().unwrap();
            assert_eq!(parsed, projection);
        }
    }

    #[test]
    fn test_tables_follow_declaration_order() {
        for projection in Rt90Projection::ALL.into_iter().chain(Rt90Projection::BESSEL) {
            assert_eq!(projection.entry().0, projection);
        }
        for projection in Sweref99Projection::ALL {
            assert_eq!(projection.entry().0, projection);
        }
    }

    #[test]
    fn test_epsg() {
        assert_eq!(Projection::Rt90(Rt90Projection::Gon2_5V).epsg(), 3021);
        assert_eq!(Projection::Sweref99(Sweref99Projection::Tm).epsg(), 3006);
        assert_eq!(Sweref99Projection::Zone23_15.epsg(), 3018);
    }

    #[test]
    fn test_names() {
        assert_eq!(Projection::Rt90(Rt90Projection::Gon2_5V).name(), "RT90 2.5 gon V");
        assert_eq!(Projection::Sweref99(Sweref99Projection::Zone12_00).name(), "SWEREF 99 12 00");
        let names: std::collections::HashSet<_> = Projection::all().map(Projection::name).collect();
        assert_eq!(names.len(), 25);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Rt90Projection::default(), Rt90Projection::Gon2_5V);
        assert_eq!(Sweref99Projection::default(), Sweref99Projection::Tm);
    }

    #[test]
    fn test_table_completeness() {
        for projection in Projection::all() {
            let params = projection.parameters();
            assert!(params.scale_factor > 0.0, "{}", projection);
            assert!(
                (-180.0..=180.0).contains(&params.central_meridian),
                "{}",
                projection
            );
        }
    }

    #[test]
    fn test_lookup_idempotent() {
        for projection in Projection::all() {
            let a = lookup(projection.id()).unwrap();
            let b = lookup(projection.id()).unwrap();
            assert_eq!(a.central_meridian.to_bits(), b.central_meridian.to_bits());
            assert_eq!(a.scale_factor.to_bits(), b.scale_factor.to_bits());
            assert_eq!(a.false_northing.to_bits(), b.false_northing.to_bits());
            assert_eq!(a.false_easting.to_bits(), b.false_easting.to_bits());
            assert!(std::ptr::eq(a.ellipsoid, b.ellipsoid));
        }
    }
}
