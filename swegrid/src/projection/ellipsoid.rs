//! Définitions des ellipsoïdes et des coefficients de Krüger associés

use std::fmt;
use std::sync::OnceLock;

/// Ellipsoïde Bessel 1841 (datum RT90)
pub static BESSEL_1841: Ellipsoid = Ellipsoid::new("Bessel 1841", 6377397.155, 1.0 / 299.1528128);

/// Ellipsoïde GRS80 (SWEREF99, et RT90 via les constantes ajustées)
/// Note: Quasi identique à WGS84, différence < 0.1mm
pub static GRS80: Ellipsoid = Ellipsoid::new("GRS80", 6378137.0, 1.0 / 298.257222101);

/// Ellipsoïde de référence
///
/// Les coefficients de série ne dépendent que de `a` et `f` : ils sont
/// calculés au premier usage puis partagés (lecture seule) entre threads.
pub struct Ellipsoid {
    name: &'static str,
    /// Demi-grand axe (rayon équatorial) en mètres
    a: f64,
    /// Aplatissement
    f: f64,
    series: OnceLock<KrugerSeries>,
}

impl Ellipsoid {
    pub const fn new(name: &'static str, a: f64, f: f64) -> Self {
        Self {
            name,
            a,
            f,
            series: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Demi-grand axe en mètres
    pub fn semi_major_axis(&self) -> f64 {
        self.a
    }

    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// Première excentricité au carré
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// Troisième aplatissement n = f / (2 - f)
    pub fn n(&self) -> f64 {
        self.f / (2.0 - self.f)
    }

    /// Coefficients de Krüger (mémoïsés)
    pub fn series(&self) -> &KrugerSeries {
        self.series.get_or_init(|| KrugerSeries::compute(self))
    }
}

impl fmt::Debug for Ellipsoid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ellipsoid")
            .field("name", &self.name)
            .field("a", &self.a)
            .field("f", &self.f)
            .finish()
    }
}

impl PartialEq for Ellipsoid {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.f == other.f
    }
}

/// Coefficients des séries de Gauss-Krüger, tronquées à l'ordre 4 en n (e⁸)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KrugerSeries {
    /// Rayon rectifiant â = a/(1+n) (1 + n²/4 + n⁴/64)
    pub a_roof: f64,
    /// Latitude géodésique → latitude conforme (A, B, C, D)
    pub conformal: [f64; 4],
    /// Latitude conforme → latitude géodésique (A*, B*, C*, D*)
    pub geodetic: [f64; 4],
    /// Série directe β₁..β₄
    pub forward: [f64; 4],
    /// Série inverse δ₁..δ₄
    pub inverse: [f64; 4],
}

impl KrugerSeries {
    fn compute(ellipsoid: &Ellipsoid) -> Self {
        let e2 = ellipsoid.e2();
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let e8 = e6 * e2;

        let n = ellipsoid.n();
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;

        let a_roof = ellipsoid.semi_major_axis() / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0);

        let conformal = [
            e2,
            (5.0 * e4 - e6) / 6.0,
            (104.0 * e6 - 45.0 * e8) / 120.0,
            1237.0 * e8 / 1260.0,
        ];

        let geodetic = [
            e2 + e4 + e6 + e8,
            -(7.0 * e4 + 17.0 * e6 + 30.0 * e8) / 6.0,
            (224.0 * e6 + 889.0 * e8) / 120.0,
            -(4279.0 * e8) / 1260.0,
        ];

        let forward = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0,
            49561.0 * n4 / 161280.0,
        ];

        let inverse = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0,
            n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0,
            17.0 * n3 / 480.0 - 37.0 * n4 / 840.0,
            4397.0 * n4 / 161280.0,
        ];

        Self {
            a_roof,
            conformal,
            geodetic,
            forward,
            inverse,
        }
    }
}
