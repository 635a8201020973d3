//! Reprojection de fichiers GeoJSON (FeatureCollection)

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use geo::Coord;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::reproject::GridReprojector;
use crate::report::FileReport;

/// Résultat de la reprojection d'une feature
enum FeatureOutcome {
    Converted { feature: Feature, out_of_extent: usize },
    /// Feature sans géométrie, recopiée telle quelle
    Skipped(Feature),
    Failed { feature: Feature, error: String },
}

/// Lit un fichier GeoJSON ; une géométrie ou une feature seule est
/// enveloppée dans une FeatureCollection
pub fn read_feature_collection(path: &Path) -> Result<FeatureCollection> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let geojson = GeoJson::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse GeoJSON: {}", path.display()))?;

    Ok(match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        GeoJson::Feature(feature) => FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        },
        GeoJson::Geometry(geometry) => FeatureCollection {
            bbox: None,
            features: vec![Feature {
                bbox: None,
                geometry: Some(geometry),
                id: None,
                properties: None,
                foreign_members: None,
            }],
            foreign_members: None,
        },
    })
}

/// Reprojette toutes les features (en parallèle) et renseigne le rapport
pub fn reproject_collection(
    collection: FeatureCollection,
    reprojector: &GridReprojector,
    report: &mut FileReport,
) -> FeatureCollection {
    let FeatureCollection {
        features,
        foreign_members,
        ..
    } = collection;

    report.features = features.len();

    let outcomes: Vec<FeatureOutcome> = features
        .into_par_iter()
        .map(|feature| reproject_feature(feature, reprojector))
        .collect();

    let mut converted = Vec::with_capacity(outcomes.len());
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            FeatureOutcome::Converted {
                feature,
                out_of_extent,
            } => {
                report.converted += 1;
                report.out_of_extent += out_of_extent;
                converted.push(feature);
            }
            FeatureOutcome::Skipped(feature) => {
                report.skipped += 1;
                converted.push(feature);
            }
            FeatureOutcome::Failed { feature, error } => {
                warn!(feature = index, error = %error, "Feature skipped");
                report.errors.push(format!("feature {}: {}", index, error));
                report.skipped += 1;
                converted.push(feature);
            }
        }
    }

    FeatureCollection {
        bbox: None,
        features: converted,
        foreign_members: with_named_crs(foreign_members, reprojector.target().epsg()),
    }
}

fn reproject_feature(mut feature: Feature, reprojector: &GridReprojector) -> FeatureOutcome {
    let Some(geometry) = feature.geometry.take() else {
        return FeatureOutcome::Skipped(feature);
    };

    let mut mapper = PositionMapper::new(reprojector);
    match mapper.value(&geometry.value) {
        Ok(value) => {
            feature.bbox = None;
            feature.geometry = Some(Geometry {
                bbox: None,
                value,
                foreign_members: geometry.foreign_members,
            });
            FeatureOutcome::Converted {
                feature,
                out_of_extent: mapper.out_of_extent,
            }
        }
        Err(error) => {
            feature.geometry = Some(geometry);
            FeatureOutcome::Failed { feature, error }
        }
    }
}

/// Reprojette les positions d'une géométrie GeoJSON
///
/// Les ordonnées au-delà de la deuxième (altitude, mesure) sont recopiées
/// sans transformation.
struct PositionMapper<'a> {
    reprojector: &'a GridReprojector,
    out_of_extent: usize,
}

impl<'a> PositionMapper<'a> {
    fn new(reprojector: &'a GridReprojector) -> Self {
        Self {
            reprojector,
            out_of_extent: 0,
        }
    }

    fn position(&mut self, position: &[f64]) -> Result<Vec<f64>, String> {
        let [x, y, extra @ ..] = position else {
            return Err(format!("invalid position with {} ordinate(s)", position.len()));
        };

        let source = Coord { x: *x, y: *y };
        if self.reprojector.is_out_of_extent(source) {
            self.out_of_extent += 1;
        }
        let target = self.reprojector.transform_coord(source);

        let mut out = Vec::with_capacity(position.len());
        out.push(target.x);
        out.push(target.y);
        out.extend_from_slice(extra);
        Ok(out)
    }

    fn positions(&mut self, positions: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, String> {
        positions.iter().map(|p| self.position(p)).collect()
    }

    fn rings(&mut self, rings: &[Vec<Vec<f64>>]) -> Result<Vec<Vec<Vec<f64>>>, String> {
        rings.iter().map(|r| self.positions(r)).collect()
    }

    fn value(&mut self, value: &Value) -> Result<Value, String> {
        Ok(match value {
            Value::Point(p) => Value::Point(self.position(p)?),
            Value::MultiPoint(ps) => Value::MultiPoint(self.positions(ps)?),
            Value::LineString(ps) => Value::LineString(self.positions(ps)?),
            Value::MultiLineString(lines) => Value::MultiLineString(self.rings(lines)?),
            Value::Polygon(rings) => Value::Polygon(self.rings(rings)?),
            Value::MultiPolygon(polygons) => Value::MultiPolygon(
                polygons
                    .iter()
                    .map(|rings| self.rings(rings))
                    .collect::<Result<_, _>>()?,
            ),
            Value::GeometryCollection(geometries) => Value::GeometryCollection(
                geometries
                    .iter()
                    .map(|g| {
                        Ok(Geometry {
                            bbox: None,
                            value: self.value(&g.value)?,
                            foreign_members: g.foreign_members.clone(),
                        })
                    })
                    .collect::<Result<_, String>>()?,
            ),
        })
    }
}

/// Remplace le membre `crs` par un CRS nommé `urn:ogc:def:crs:EPSG::<code>`
fn with_named_crs(foreign_members: Option<JsonObject>, epsg: u32) -> Option<JsonObject> {
    let mut members = foreign_members.unwrap_or_default();
    members.insert(
        "crs".to_string(),
        serde_json::json!({
            "type": "name",
            "properties": { "name": format!("urn:ogc:def:crs:EPSG::{}", epsg) }
        }),
    );
    Some(members)
}

/// Lit le code EPSG du membre `crs` s'il est présent
///
/// `urn:ogc:def:crs:OGC:1.3:CRS84` (et `CRS84` seul) désigne WGS84, soit 4326.
pub fn declared_epsg(collection: &FeatureCollection) -> Option<u32> {
    let name = collection
        .foreign_members
        .as_ref()?
        .get("crs")?
        .get("properties")?
        .get("name")?
        .as_str()?;
    let code = name.rsplit(':').next()?;
    if code.eq_ignore_ascii_case("crs84") {
        return Some(4326);
    }
    code.parse().ok()
}

/// Écrit une FeatureCollection dans un fichier
pub fn write_feature_collection(collection: &FeatureCollection, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, collection)?;
    writer.flush()?;
    debug!(path = %output_path.display(), features = collection.features.len(), "GeoJSON written");
    Ok(())
}

/// Reprojette un fichier GeoJSON vers `output_path`
pub fn reproject_file(
    input_path: &Path,
    output_path: &Path,
    reprojector: &GridReprojector,
    report: &mut FileReport,
) -> Result<()> {
    let collection = read_feature_collection(input_path)?;

    if let Some(epsg) = declared_epsg(&collection) {
        let expected = reprojector.source().epsg();
        if epsg != expected {
            bail!(
                "{} declares EPSG:{} but the source system is {} (EPSG:{})",
                input_path.display(),
                epsg,
                reprojector.source(),
                expected
            );
        }
    }

    let reprojected = reproject_collection(collection, reprojector, report);
    write_feature_collection(&reprojected, output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reproject::CoordinateSystem;
    use swegrid::{Projection, Rt90Projection, Sweref99Projection};

    fn sample_collection() -> FeatureCollection {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": "centralen",
                 "geometry": {"type": "Point", "coordinates": [18.0596, 59.3306]},
                 "properties": {"name": "Stockholm Centralstation"}},
                {"type": "Feature",
                 "geometry": {"type": "LineString", "coordinates": [[18.0596, 59.3306], [18.0719, 59.3275]]},
                 "properties": {}},
                {"type": "Feature", "geometry": null, "properties": {"name": "empty"}}
            ]
        }"#;
        match json.parse::<GeoJson>().unwrap() {
            GeoJson::FeatureCollection(fc) => fc,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_reproject_collection() {
        let reprojector = GridReprojector::new(
            CoordinateSystem::Wgs84,
            CoordinateSystem::Grid(Projection::Rt90(Rt90Projection::Gon2_5V)),
        );
        let mut report = FileReport::new("sample.geojson");
        let out = reproject_collection(sample_collection(), &reprojector, &mut report);

        assert_eq!(report.features, 3);
        assert_eq!(report.converted, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.out_of_extent, 0);
        assert_eq!(declared_epsg(&out), Some(3021));

        let point = out.features[0].geometry.as_ref().unwrap();
        match &point.value {
            Value::Point(coords) => {
                assert_eq!(coords[0].round(), 1628315.0);
                assert_eq!(coords[1].round(), 6581036.0);
            }
            other => panic!("unexpected {:?}", other),
        }
        // Propriétés et identifiant conservés
        assert_eq!(
            out.features[0].property("name").and_then(|v| v.as_str()),
            Some("Stockholm Centralstation")
        );
        assert!(out.features[0].id.is_some());
        assert!(out.features[2].geometry.is_none());
    }

    #[test]
    fn test_reproject_file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("swegrid-geojson-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("input.geojson");
        let sweref = dir.join("sweref.geojson");
        let back = dir.join("back.geojson");

        write_feature_collection(&sample_collection(), &input).unwrap();

        let tm = CoordinateSystem::Grid(Projection::Sweref99(Sweref99Projection::Tm));
        let mut report = FileReport::new("input.geojson");
        reproject_file(&input, &sweref, &GridReprojector::new(CoordinateSystem::Wgs84, tm), &mut report)
            .unwrap();

        // Le fichier déclare maintenant EPSG:3006 : une source WGS84 est refusée
        let mut report = FileReport::new("sweref.geojson");
        assert!(reproject_file(
            &sweref,
            &back,
            &GridReprojector::new(CoordinateSystem::Wgs84, tm),
            &mut report
        )
        .is_err());

        let mut report = FileReport::new("sweref.geojson");
        reproject_file(&sweref, &back, &GridReprojector::new(tm, CoordinateSystem::Wgs84), &mut report)
            .unwrap();

        let out = read_feature_collection(&back).unwrap();
        assert_eq!(declared_epsg(&out), Some(4326));
        match &out.features[0].geometry.as_ref().unwrap().value {
            Value::Point(coords) => {
                assert!((coords[0] - 18.0596).abs() < 1e-6);
                assert!((coords[1] - 59.3306).abs() < 1e-6);
            }
            other => panic!("unexpected {:?}", other),
        }
        let crs = out.foreign_members.as_ref().and_then(|m| m.get("crs")).unwrap();
        assert_eq!(crs["type"], "name");

        std::fs::remove_dir_all(dir).ok();
    }

    fn reproject_json(json: &str, reprojector: &GridReprojector) -> (FeatureCollection, FileReport) {
        let collection = match json.parse::<GeoJson>().unwrap() {
            GeoJson::FeatureCollection(fc) => fc,
            other => panic!("unexpected {:?}", other),
        };
        let mut report = FileReport::new("in-memory");
        let out = reproject_collection(collection, reprojector, &mut report);
        (out, report)
    }

    #[test]
    fn test_altitude_is_kept() {
        let tm = CoordinateSystem::Grid(Projection::Sweref99(Sweref99Projection::Tm));
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {},
                 "geometry": {"type": "Point", "coordinates": [18.0596, 59.3306, 42.5]}},
                {"type": "Feature", "properties": {},
                 "geometry": {"type": "LineString", "coordinates": [[18.0596, 59.3306, 12.0], [18.0719, 59.3275, 13.25, 7.0]]}}
            ]
        }"#;

        let (out, report) = reproject_json(json, &GridReprojector::new(CoordinateSystem::Wgs84, tm));
        assert_eq!(report.converted, 2);
        assert!(report.errors.is_empty());

        match &out.features[0].geometry.as_ref().unwrap().value {
            Value::Point(p) => {
                assert_eq!(p.len(), 3);
                assert_eq!(p[0], 674053.442);
                assert_eq!(p[1], 6580864.11);
                assert_eq!(p[2], 42.5);
            }
            other => panic!("unexpected {:?}", other),
        }
        match &out.features[1].geometry.as_ref().unwrap().value {
            Value::LineString(line) => {
                assert_eq!(line[0][2], 12.0);
                assert_eq!(&line[1][2..], &[13.25, 7.0]);
                assert!(line[1][0] > 600000.0 && line[1][1] > 6500000.0);
            }
            other => panic!("unexpected {:?}", other),
        }

        // Retour vers WGS84 : l'altitude suit toujours
        let (back, _) = reproject_json(
            &serde_json::to_string(&out).unwrap(),
            &GridReprojector::new(tm, CoordinateSystem::Wgs84),
        );
        match &back.features[0].geometry.as_ref().unwrap().value {
            Value::Point(p) => {
                assert!((p[0] - 18.0596).abs() < 1e-6);
                assert_eq!(p[2], 42.5);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_invalid_position_is_reported() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {},
                 "geometry": {"type": "GeometryCollection", "geometries": [
                    {"type": "Point", "coordinates": [18.0596, 59.3306]},
                    {"type": "MultiPolygon", "coordinates": [[[[18.0, 59.0], [18.1, 59.0], [18.1, 59.1], [18.0, 59.0]]]]}
                 ]}}
            ]
        }"#;
        let mut collection = match json.parse::<GeoJson>().unwrap() {
            GeoJson::FeatureCollection(fc) => fc,
            other => panic!("unexpected {:?}", other),
        };
        collection.features.insert(
            0,
            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![18.0596]))),
                id: None,
                properties: None,
                foreign_members: None,
            },
        );

        let rt90 = CoordinateSystem::Grid(Projection::Rt90(Rt90Projection::Gon2_5V));
        let mut report = FileReport::new("in-memory");
        let out = reproject_collection(
            collection,
            &GridReprojector::new(CoordinateSystem::Wgs84, rt90),
            &mut report,
        );

        assert_eq!(report.converted, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("feature 0"));
        // Géométrie invalide recopiée telle quelle
        match &out.features[0].geometry.as_ref().unwrap().value {
            Value::Point(p) => assert_eq!(p, &vec![18.0596]),
            other => panic!("unexpected {:?}", other),
        }
        match &out.features[1].geometry.as_ref().unwrap().value {
            Value::GeometryCollection(geometries) => {
                match &geometries[0].value {
                    Value::Point(p) => assert_eq!(p[0].round(), 1628315.0),
                    other => panic!("unexpected {:?}", other),
                }
                assert!(matches!(geometries[1].value, Value::MultiPolygon(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_declared_crs84() {
        let with_crs = |name: &str| {
            let json = format!(
                r#"{{"type": "FeatureCollection", "features": [],
                    "crs": {{"type": "name", "properties": {{"name": "{}"}}}}}}"#,
                name
            );
            match json.parse::<GeoJson>().unwrap() {
                GeoJson::FeatureCollection(fc) => fc,
                other => panic!("unexpected {:?}", other),
            }
        };
        assert_eq!(declared_epsg(&with_crs("urn:ogc:def:crs:OGC:1.3:CRS84")), Some(4326));
        assert_eq!(declared_epsg(&with_crs("urn:ogc:def:crs:EPSG::3006")), Some(3006));
        assert_eq!(declared_epsg(&with_crs("EPSG:3021")), Some(3021));
        assert_eq!(declared_epsg(&with_crs("urn:ogc:def:crs:OGC:1.3:CRS27")), None);
    }

    #[test]
    fn test_crs84_file_rejected_for_grid_source() {
        let dir = std::env::temp_dir().join(format!("swegrid-crs84-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("crs84.geojson");
        std::fs::write(
            &input,
            r#"{"type": "FeatureCollection",
                "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:OGC:1.3:CRS84"}},
                "features": [{"type": "Feature", "properties": {},
                              "geometry": {"type": "Point", "coordinates": [18.0596, 59.3306]}}]}"#,
        )
        .unwrap();

        let tm = CoordinateSystem::Grid(Projection::Sweref99(Sweref99Projection::Tm));
        let mut report = FileReport::new("crs84.geojson");
        let err = reproject_file(&input, &dir.join("out.geojson"), &GridReprojector::new(tm, CoordinateSystem::Wgs84), &mut report)
            .unwrap_err();
        assert!(err.to_string().contains("EPSG:4326"));

        let mut report = FileReport::new("crs84.geojson");
        reproject_file(&input, &dir.join("out.geojson"), &GridReprojector::new(CoordinateSystem::Wgs84, tm), &mut report)
            .unwrap();
        assert_eq!(report.converted, 1);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_single_geometry_is_wrapped() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("swegrid-geometry-{}.geojson", std::process::id()));
        std::fs::write(&path, r#"{"type": "Point", "coordinates": [18.0, 59.0]}"#).unwrap();

        let fc = read_feature_collection(&path).unwrap();
        assert_eq!(fc.features.len(), 1);
        assert!(fc.features[0].geometry.is_some());

        std::fs::remove_file(path).ok();
    }
}
