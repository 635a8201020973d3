//! Configuration de l'outil
//!
//! Ordre de priorité : arguments CLI > variables d'environnement (`.env`
//! compris) > fichier JSON pointé par `SWEGRID_CONFIG` > valeurs par défaut.

use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::{Context, Result};
use swegrid::{Rt90Projection, Sweref99Projection};

use crate::reproject::CoordinateSystem;

/// Configuration principale
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Projection RT90 utilisée quand aucune n'est précisée
    #[serde(default = "default_rt90")]
    pub default_rt90: String,

    /// Projection SWEREF99 utilisée quand aucune n'est précisée
    #[serde(default = "default_sweref99")]
    pub default_sweref99: String,

    /// Décimales des coordonnées WGS84 produites
    #[serde(default)]
    pub wgs84_precision: Option<u8>,

    /// Décimales des coordonnées de grille produites
    #[serde(default)]
    pub grid_precision: Option<u8>,

    /// Nombre de threads pour la reprojection
    #[serde(default)]
    pub jobs: Option<usize>,
}

fn default_rt90() -> String {
    Rt90Projection::default().id().to_string()
}

fn default_sweref99() -> String {
    Sweref99Projection::default().id().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_rt90: default_rt90(),
            default_sweref99: default_sweref99(),
            wgs84_precision: None,
            grid_precision: None,
            jobs: None,
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Charge la configuration depuis l'environnement
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var("SWEGRID_CONFIG") {
            Ok(path) => Self::load(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applique les variables `SWEGRID_RT90`, `SWEGRID_SWEREF99`, `SWEGRID_JOBS`
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(rt90) = var("SWEGRID_RT90") {
            self.default_rt90 = rt90;
        }
        if let Some(sweref) = var("SWEGRID_SWEREF99") {
            self.default_sweref99 = sweref;
        }
        if let Some(jobs) = var("SWEGRID_JOBS") {
            let jobs = jobs
                .parse()
                .with_context(|| format!("Invalid SWEGRID_JOBS: {}", jobs))?;
            self.jobs = Some(jobs);
        }
        Ok(())
    }

    /// Vérifie que les projections par défaut existent
    pub fn validate(&self) -> Result<()> {
        self.rt90_projection()?;
        self.sweref99_projection()?;
        Ok(())
    }

    pub fn rt90_projection(&self) -> Result<Rt90Projection> {
        self.default_rt90
            .parse()
            .with_context(|| format!("Invalid default_rt90: {}", self.default_rt90))
    }

    pub fn sweref99_projection(&self) -> Result<Sweref99Projection> {
        self.default_sweref99
            .parse()
            .with_context(|| format!("Invalid default_sweref99: {}", self.default_sweref99))
    }

    /// Précision de sortie pour un système cible
    pub fn precision_for(&self, target: CoordinateSystem) -> u8 {
        let configured = match target {
            CoordinateSystem::Wgs84 => self.wgs84_precision,
            CoordinateSystem::Grid(_) => self.grid_precision,
        };
        configured.unwrap_or_else(|| target.default_precision())
    }
}
