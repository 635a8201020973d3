//! Projection de Gauss-Krüger (Mercator transverse conforme)
//!
//! Formules de Lantmäteriet (séries de Krüger tronquées à l'ordre 4), forme
//! fermée dans les deux sens : pas d'itération pour la latitude du point
//! pied. Précision aller-retour meilleure que 20 cm sur la Suède.
//!
//! Fonctions pures : tout passe par les paramètres explicites.

use crate::projection::ProjectionParameters;
use crate::{GeodeticCoordinate, GridCoordinate};

/// Convertit des coordonnées géodésiques (degrés) en coordonnées planes
pub fn forward(params: &ProjectionParameters, latitude: f64, longitude: f64) -> GridCoordinate {
    let series = params.ellipsoid.series();
    let [a, b, c, d] = series.conformal;
    let [beta1, beta2, beta3, beta4] = series.forward;

    let phi = latitude.to_radians();
    let lambda = longitude.to_radians();
    let lambda_zero = params.central_meridian.to_radians();

    // Latitude conforme
    let sin_phi = phi.sin();
    let sin2 = sin_phi * sin_phi;
    let phi_star = phi - sin_phi * phi.cos() * (a + b * sin2 + c * sin2.powi(2) + d * sin2.powi(3));

    let delta_lambda = lambda - lambda_zero;
    let xi_prim = (phi_star.tan() / delta_lambda.cos()).atan();
    let eta_prim = (phi_star.cos() * delta_lambda.sin()).atanh();

    let k_a = params.scale_factor * series.a_roof;

    let northing = k_a
        * (xi_prim
            + beta1 * (2.0 * xi_prim).sin() * (2.0 * eta_prim).cosh()
            + beta2 * (4.0 * xi_prim).sin() * (4.0 * eta_prim).cosh()
            + beta3 * (6.0 * xi_prim).sin() * (6.0 * eta_prim).cosh()
            + beta4 * (8.0 * xi_prim).sin() * (8.0 * eta_prim).cosh())
        + params.false_northing;

    let easting = k_a
        * (eta_prim
            + beta1 * (2.0 * xi_prim).cos() * (2.0 * eta_prim).sinh()
            + beta2 * (4.0 * xi_prim).cos() * (4.0 * eta_prim).sinh()
            + beta3 * (6.0 * xi_prim).cos() * (6.0 * eta_prim).sinh()
            + beta4 * (8.0 * xi_prim).cos() * (8.0 * eta_prim).sinh())
        + params.false_easting;

    GridCoordinate::new(northing, easting)
}

/// Convertit des coordonnées planes en coordonnées géodésiques (degrés)
pub fn inverse(params: &ProjectionParameters, northing: f64, easting: f64) -> GeodeticCoordinate {
    let series = params.ellipsoid.series();
    let [a_star, b_star, c_star, d_star] = series.geodetic;
    let [delta1, delta2, delta3, delta4] = series.inverse;

    let lambda_zero = params.central_meridian.to_radians();

    // Coordonnées réduites
    let k_a = params.scale_factor * series.a_roof;
    let xi = (northing - params.false_northing) / k_a;
    let eta = (easting - params.false_easting) / k_a;

    let xi_prim = xi
        - delta1 * (2.0 * xi).sin() * (2.0 * eta).cosh()
        - delta2 * (4.0 * xi).sin() * (4.0 * eta).cosh()
        - delta3 * (6.0 * xi).sin() * (6.0 * eta).cosh()
        - delta4 * (8.0 * xi).sin() * (8.0 * eta).cosh();

    let eta_prim = eta
        - delta1 * (2.0 * xi).cos() * (2.0 * eta).sinh()
        - delta2 * (4.0 * xi).cos() * (4.0 * eta).sinh()
        - delta3 * (6.0 * xi).cos() * (6.0 * eta).sinh()
        - delta4 * (8.0 * xi).cos() * (8.0 * eta).sinh();

    // Latitude conforme du point pied
    let phi_star = (xi_prim.sin() / eta_prim.cosh()).asin();
    let delta_lambda = (eta_prim.sinh() / xi_prim.cos()).atan();

    let sin_phi_star = phi_star.sin();
    let sin2 = sin_phi_star * sin_phi_star;
    let phi = phi_star
        + sin_phi_star
            * phi_star.cos()
            * (a_star + b_star * sin2 + c_star * sin2.powi(2) + d_star * sin2.powi(3));

    let lambda = lambda_zero + delta_lambda;

    GeodeticCoordinate::new(phi.to_degrees(), lambda.to_degrees())
}
