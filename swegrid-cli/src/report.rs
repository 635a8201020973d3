//! Rapport de conversion
//!
//! Collecte, fichier par fichier, les features converties, ignorées et les
//! sommets hors emprise, sans interrompre le traitement pour une erreur
//! isolée.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

/// Statut global de la conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConversionStatus {
    /// Tout a été converti
    Success,
    /// Conversion faite avec des features ignorées ou des fichiers en échec
    PartialSuccess,
    /// Aucun fichier n'a pu être converti
    Failed,
}

/// Rapport d'un fichier
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileReport {
    pub file: String,
    /// Nombre total de features lues
    pub features: usize,
    pub converted: usize,
    /// Features sans géométrie ou dont la géométrie est illisible
    pub skipped: usize,
    /// Sommets hors de l'emprise suédoise (précision non garantie)
    pub out_of_extent: usize,
    pub errors: Vec<String>,
    /// Erreur fatale pour ce fichier (lecture, écriture, CRS incohérent)
    pub failure: Option<String>,
    pub duration_ms: u64,
}

impl FileReport {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_ms = duration.as_millis() as u64;
    }
}

/// Rapport complet d'une commande `reproject`
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub source: String,
    pub target: String,
    pub files: Vec<FileReport>,
    pub duration_ms: u64,
}

impl ConversionReport {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            files: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn status(&self) -> ConversionStatus {
        let failed = self.files.iter().filter(|f| f.failure.is_some()).count();
        if !self.files.is_empty() && failed == self.files.len() {
            return ConversionStatus::Failed;
        }
        let degraded = self
            .files
            .iter()
            .any(|f| f.failure.is_some() || !f.errors.is_empty());
        if degraded {
            ConversionStatus::PartialSuccess
        } else {
            ConversionStatus::Success
        }
    }

    pub fn total_converted(&self) -> usize {
        self.files.iter().map(|f| f.converted).sum()
    }

    pub fn total_out_of_extent(&self) -> usize {
        self.files.iter().map(|f| f.out_of_extent).sum()
    }

    /// Affiche un résumé lisible
    pub fn print_summary(&self) {
        println!();
        println!("=== Reprojection {} → {} ===", self.source, self.target);
        for file in &self.files {
            match &file.failure {
                Some(reason) => println!("  ✗ {}: {}", file.file, reason),
                None => println!(
                    "  ✓ {}: {}/{} features ({} skipped, {} vertices out of extent) in {} ms",
                    file.file,
                    file.converted,
                    file.features,
                    file.skipped,
                    file.out_of_extent,
                    file.duration_ms
                ),
            }
            for error in &file.errors {
                println!("      - {}", error);
            }
        }
        println!(
            "Status: {:?}, {} features converted in {} ms",
            self.status(),
            self.total_converted(),
            self.duration_ms
        );
        if self.total_out_of_extent() > 0 {
            println!(
                "Warning: {} vertices lie outside Sweden, accuracy is not guaranteed there",
                self.total_out_of_extent()
            );
        }
    }

    /// Écrit le rapport en JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))
    }
}
