//! Types d'erreurs pour le crate swegrid

use thiserror::Error;

/// Erreurs pouvant survenir lors d'une conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeodesyError {
    /// Identifiant de projection absent de la table
    #[error("Unknown projection: {0}")]
    UnknownProjection(String),

    /// Texte de coordonnée illisible (degrés/minutes/secondes)
    #[error("Invalid coordinate {input:?}: {reason}")]
    InvalidCoordinate { input: String, reason: String },
}

impl GeodesyError {
    /// Crée une erreur de coordonnée invalide avec contexte
    pub fn invalid_coordinate(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Avertissement non fatal : la conversion reste calculée mais la précision
/// annoncée (≈ 20 cm) n'est plus garantie hors de l'emprise suédoise.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainWarning {
    #[error("latitude {0}° is outside the supported extent ({min}°..{max}°)", min = crate::extent::MIN_LATITUDE, max = crate::extent::MAX_LATITUDE)]
    Latitude(f64),

    #[error("longitude {0}° is outside the supported extent ({min}°..{max}°)", min = crate::extent::MIN_LONGITUDE, max = crate::extent::MAX_LONGITUDE)]
    Longitude(f64),
}
