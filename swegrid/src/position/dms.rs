//! Notation degrés / minutes / secondes
//!
//! Formats reconnus (exemples) :
//! - `Degrees` : `N 59.3489`
//! - `DegreesMinutes` : `N 62º 10.56'`
//! - `DegreesMinutesSeconds` : `N 59º 20' 56.09287"`
//!
//! En lecture, `º` et `°` sont acceptés, ainsi que les zéros de tête
//! (`E 015º 54.180'`).

use std::sync::OnceLock;

use regex::Regex;

use crate::GeodesyError;

/// Format texte d'une coordonnée WGS84
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wgs84Format {
    Degrees,
    DegreesMinutes,
    #[default]
    DegreesMinutesSeconds,
}

/// Axe d'une coordonnée géodésique
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn hemisphere(self, value: f64) -> char {
        match (self, value < 0.0) {
            (Axis::Latitude, false) => 'N',
            (Axis::Latitude, true) => 'S',
            (Axis::Longitude, false) => 'E',
            (Axis::Longitude, true) => 'W',
        }
    }
}

/// Décimales conservées pour les minutes et secondes
const SUBUNIT_DECIMALS: u8 = 5;
/// Décimales conservées pour les degrés décimaux
const DEGREE_DECIMALS: u8 = 7;

/// Formate une valeur en degrés décimaux selon `format`
pub fn format_axis(value: f64, axis: Axis, format: Wgs84Format) -> String {
    let hemisphere = axis.hemisphere(value);
    let abs = value.abs();

    match format {
        Wgs84Format::Degrees => {
            format!("{} {}", hemisphere, trim_decimals(abs, DEGREE_DECIMALS))
        }
        Wgs84Format::DegreesMinutes => {
            let mut degrees = abs.floor();
            let mut minutes = crate::types::round_to((abs - degrees) * 60.0, SUBUNIT_DECIMALS);
            if minutes >= 60.0 {
                degrees += 1.0;
                minutes = 0.0;
            }
            format!(
                "{} {:.0}º {}'",
                hemisphere,
                degrees,
                trim_decimals(minutes, SUBUNIT_DECIMALS)
            )
        }
        Wgs84Format::DegreesMinutesSeconds => {
            let mut degrees = abs.floor();
            let mut minutes = ((abs - degrees) * 60.0).floor();
            let mut seconds =
                crate::types::round_to((abs - degrees - minutes / 60.0) * 3600.0, SUBUNIT_DECIMALS);
            if seconds >= 60.0 {
                seconds = 0.0;
                minutes += 1.0;
            }
            if minutes >= 60.0 {
                minutes = 0.0;
                degrees += 1.0;
            }
            format!(
                "{} {:.0}º {:.0}' {}\"",
                hemisphere,
                degrees,
                minutes,
                trim_decimals(seconds, SUBUNIT_DECIMALS)
            )
        }
    }
}

/// Écrit `value` avec au plus `decimals` décimales, sans zéros finaux
fn trim_decimals(value: f64, decimals: u8) -> String {
    let s = format!("{:.*}", decimals as usize, value);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn axis_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"^\s*(?P<hemi>[NSEW])?\s*(?P<deg>-?\d+(?:\.\d+)?)\s*[º°]?\s*(?:(?P<min>\d+(?:\.\d+)?)\s*'\s*)?(?:(?P<sec>\d+(?:\.\d+)?)\s*"\s*)?$"#,
        )
        .expect("axis pattern is a valid regex")
    })
}

fn position_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^\s*(?P<lat>[NS][^NSEW]*?)\s*,?\s+(?P<lon>[EW][^NSEW]*)$"#)
            .expect("position pattern is a valid regex")
    })
}

/// Lit une valeur d'axe écrite selon `format`
pub fn parse_axis(text: &str, axis: Axis, format: Wgs84Format) -> Result<f64, GeodesyError> {
    let caps = axis_regex()
        .captures(text)
        .ok_or_else(|| GeodesyError::invalid_coordinate(text, "unrecognised notation"))?;

    let number = |name: &str| -> Result<Option<f64>, GeodesyError> {
        caps.name(name)
            .map(|m| {
                fast_float::parse::<f64, _>(m.as_str())
                    .map_err(|_| GeodesyError::invalid_coordinate(text, format!("bad number {:?}", m.as_str())))
            })
            .transpose()
    };

    let degrees = number("deg")?.unwrap_or_default();
    let minutes = number("min")?;
    let seconds = number("sec")?;

    let magnitude = match (format, minutes, seconds) {
        (Wgs84Format::Degrees, None, None) => degrees.abs(),
        (Wgs84Format::DegreesMinutes, Some(m), None) => {
            check_subunit(text, m, "minutes")?;
            degrees.abs() + m / 60.0
        }
        (Wgs84Format::DegreesMinutesSeconds, Some(m), Some(s)) => {
            check_subunit(text, m, "minutes")?;
            check_subunit(text, s, "seconds")?;
            degrees.abs() + m / 60.0 + s / 3600.0
        }
        _ => {
            return Err(GeodesyError::invalid_coordinate(
                text,
                format!("does not match the {:?} format", format),
            ))
        }
    };

    let negative_number = degrees.is_sign_negative();
    let sign = match caps.name("hemi").map(|m| m.as_str()) {
        Some(_) if negative_number => {
            return Err(GeodesyError::invalid_coordinate(
                text,
                "signed value with a hemisphere letter",
            ))
        }
        Some("N") | Some("E") => 1.0,
        Some("S") | Some("W") => -1.0,
        _ if negative_number => -1.0,
        _ => 1.0,
    };

    if let Some(hemi) = caps.name("hemi").map(|m| m.as_str()) {
        let expected = match axis {
            Axis::Latitude => hemi == "N" || hemi == "S",
            Axis::Longitude => hemi == "E" || hemi == "W",
        };
        if !expected {
            return Err(GeodesyError::invalid_coordinate(
                text,
                format!("hemisphere {} does not belong to the {:?} axis", hemi, axis),
            ));
        }
    }

    Ok(sign * magnitude)
}

fn check_subunit(text: &str, value: f64, what: &str) -> Result<(), GeodesyError> {
    if value >= 60.0 {
        return Err(GeodesyError::invalid_coordinate(
            text,
            format!("{} must be below 60", what),
        ));
    }
    Ok(())
}

/// Lit une position complète `"<latitude> <longitude>"`
///
/// Retourne (latitude, longitude) en degrés décimaux.
pub fn parse_position(text: &str, format: Wgs84Format) -> Result<(f64, f64), GeodesyError> {
    let caps = position_regex().captures(text).ok_or_else(|| {
        GeodesyError::invalid_coordinate(text, "expected a latitude (N/S) followed by a longitude (E/W)")
    })?;

    let latitude = parse_axis(&caps["lat"], Axis::Latitude, format)?;
    let longitude = parse_axis(&caps["lon"], Axis::Longitude, format)?;
    Ok((latitude, longitude))
}
