//! Modules d'export (GeoJSON)

pub mod geojson;
