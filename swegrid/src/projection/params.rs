//! Table des paramètres de projection (ellipsoïde + constantes)
//!
//! Les variantes `rt90_*` travaillent directement depuis WGS84 : elles
//! utilisent GRS80 avec les constantes ajustées publiées par Lantmäteriet,
//! qui absorbent le changement de datum vers RT90. Les variantes
//! `bessel_rt90_*` sont la projection RT90 « native » sur Bessel 1841 et
//! attendent une latitude/longitude exprimée dans le datum RT90.

use super::ellipsoid::{Ellipsoid, BESSEL_1841, GRS80};
use super::{Rt90Projection, Sweref99Projection};

/// Paramètres d'une projection Gauss-Krüger
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParameters {
    pub ellipsoid: &'static Ellipsoid,
    /// Méridien central en degrés
    pub central_meridian: f64,
    /// Facteur d'échelle sur le méridien central
    pub scale_factor: f64,
    /// False northing en mètres
    pub false_northing: f64,
    /// False easting en mètres
    pub false_easting: f64,
}

impl ProjectionParameters {
    /// Paramètres RT90 direct depuis WGS84 (GRS80, constantes ajustées)
    fn rt90(
        central_meridian: f64,
        scale_factor: f64,
        false_northing: f64,
        false_easting: f64,
    ) -> Self {
        Self {
            ellipsoid: &GRS80,
            central_meridian,
            scale_factor,
            false_northing,
            false_easting,
        }
    }

    /// Paramètres RT90 natifs (Bessel 1841)
    fn bessel_rt90(central_meridian: f64) -> Self {
        Self {
            ellipsoid: &BESSEL_1841,
            central_meridian,
            scale_factor: 1.0,
            false_northing: 0.0,
            false_easting: 1500000.0,
        }
    }

    /// Zones locales SWEREF99 (échelle 1, false easting 150 km)
    fn sweref99_local(central_meridian: f64) -> Self {
        Self {
            ellipsoid: &GRS80,
            central_meridian,
            scale_factor: 1.0,
            false_northing: 0.0,
            false_easting: 150000.0,
        }
    }
}

impl Rt90Projection {
    /// Paramètres associés à la variante
    pub fn parameters(self) -> ProjectionParameters {
        use Rt90Projection::*;

        match self {
            Gon7_5V => ProjectionParameters::rt90(
                11.0 + 18.375 / 60.0,
                1.000006000000,
                -667.282,
                1500025.141,
            ),
            Gon5_0V => ProjectionParameters::rt90(
                13.0 + 33.376 / 60.0,
                1.000005800000,
                -667.130,
                1500044.695,
            ),
            Gon2_5V => ProjectionParameters::rt90(
                15.0 + 48.0 / 60.0 + 22.624306 / 3600.0,
                1.00000561024,
                -667.711,
                1500064.274,
            ),
            Gon0_0V => ProjectionParameters::rt90(
                18.0 + 3.378 / 60.0,
                1.000005400000,
                -668.844,
                1500083.521,
            ),
            Gon2_5O => ProjectionParameters::rt90(
                20.0 + 18.379 / 60.0,
                1.000005200000,
                -670.706,
                1500102.765,
            ),
            Gon5_0O => ProjectionParameters::rt90(
                22.0 + 33.380 / 60.0,
                1.000004900000,
                -672.557,
                1500121.846,
            ),
            BesselGon7_5V => ProjectionParameters::bessel_rt90(11.0 + 18.0 / 60.0 + 29.8 / 3600.0),
            BesselGon5_0V => ProjectionParameters::bessel_rt90(13.0 + 33.0 / 60.0 + 29.8 / 3600.0),
            BesselGon2_5V => ProjectionParameters::bessel_rt90(15.0 + 48.0 / 60.0 + 29.8 / 3600.0),
            BesselGon0_0V => ProjectionParameters::bessel_rt90(18.0 + 3.0 / 60.0 + 29.8 / 3600.0),
            BesselGon2_5O => ProjectionParameters::bessel_rt90(20.0 + 18.0 / 60.0 + 29.8 / 3600.0),
            BesselGon5_0O => ProjectionParameters::bessel_rt90(22.0 + 33.0 / 60.0 + 29.8 / 3600.0),
        }
    }
}

impl Sweref99Projection {
    /// Paramètres associés à la zone
    pub fn parameters(self) -> ProjectionParameters {
        use Sweref99Projection::*;

        match self {
            Tm => ProjectionParameters {
                ellipsoid: &GRS80,
                central_meridian: 15.0,
                scale_factor: 0.9996,
                false_northing: 0.0,
                false_easting: 500000.0,
            },
            Zone12_00 => ProjectionParameters::sweref99_local(12.0),
            Zone13_30 => ProjectionParameters::sweref99_local(13.5),
            Zone15_00 => ProjectionParameters::sweref99_local(15.0),
            Zone16_30 => ProjectionParameters::sweref99_local(16.5),
            Zone18_00 => ProjectionParameters::sweref99_local(18.0),
            Zone14_15 => ProjectionParameters::sweref99_local(14.25),
            Zone15_45 => ProjectionParameters::sweref99_local(15.75),
            Zone17_15 => ProjectionParameters::sweref99_local(17.25),
            Zone18_45 => ProjectionParameters::sweref99_local(18.75),
            Zone20_15 => ProjectionParameters::sweref99_local(20.25),
            Zone21_45 => ProjectionParameters::sweref99_local(21.75),
            Zone23_15 => ProjectionParameters::sweref99_local(23.25),
        }
    }
}
