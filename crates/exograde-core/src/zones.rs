//! Zone recovery from legend editing forms.
//!
//! The editor posts one `zone_<n>_x` / `zone_<n>_y` / `zone_<n>_legend`
//! triplet per zone, where `n` is whatever number the editor gave the zone
//! when it was drawn. Zones get deleted and re-added, so the numbers have
//! gaps and need not start at zero. A zone drawn since the page loaded
//! arrives in the fixed `new_zone_*` fields instead.
//!
//! Resolution scans every key for the `zone_<n>_x` shape and collects the
//! indices it finds. Nothing here counts upward from an origin.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answers::SubmittedFields;
use crate::model::{next_free_id, Zone};

pub const NEW_ZONE_X: &str = "new_zone_x";
pub const NEW_ZONE_Y: &str = "new_zone_y";
pub const NEW_ZONE_LEGEND: &str = "new_zone_legend";

/// Which field of a zone triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneField {
    X,
    Y,
    Legend,
}

impl fmt::Display for ZoneField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneField::X => write!(f, "x"),
            ZoneField::Y => write!(f, "y"),
            ZoneField::Legend => write!(f, "legend"),
        }
    }
}

/// Which zone a warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneRef {
    Indexed(u32),
    New,
}

impl fmt::Display for ZoneRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneRef::Indexed(n) => write!(f, "zone_{n}"),
            ZoneRef::New => write!(f, "new_zone"),
        }
    }
}

/// A zone that was skipped. Never fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "problem", rename_all = "snake_case")]
pub enum ZoneParseWarning {
    MissingField { zone: ZoneRef, field: ZoneField },
    BadCoordinate { zone: ZoneRef, field: ZoneField, value: String },
    EmptyLegend { zone: ZoneRef },
    /// The number in a `zone_<n>_x` key does not fit a zone id.
    IndexOutOfRange { index: String },
    /// The largest zone id is already `u32::MAX`.
    NoFreeId { zone: ZoneRef },
}

impl fmt::Display for ZoneParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneParseWarning::MissingField { zone, field } => {
                write!(f, "{zone}: missing `{field}`, zone skipped")
            }
            ZoneParseWarning::BadCoordinate { zone, field, value } => {
                write!(f, "{zone}: `{field}` is not a number ({value:?}), zone skipped")
            }
            ZoneParseWarning::EmptyLegend { zone } => {
                write!(f, "{zone}: empty legend, zone skipped")
            }
            ZoneParseWarning::IndexOutOfRange { index } => {
                write!(f, "zone_{index}: index out of range, zone skipped")
            }
            ZoneParseWarning::NoFreeId { zone } => {
                write!(f, "{zone}: no id left above the largest zone id, zone skipped")
            }
        }
    }
}

/// Zones recovered from a submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneResolution {
    /// Sorted by id.
    pub zones: Vec<Zone>,
    pub warnings: Vec<ZoneParseWarning>,
}

/// Digits `n` of a `zone_<n>_x` key.
fn zone_x_digits(key: &str) -> Option<&str> {
    let digits = key.strip_prefix("zone_")?.strip_suffix("_x")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits)
}

/// Every zone index present in the submission, ascending. Indices too
/// large for a zone id are left out.
pub fn zone_indices(fields: &SubmittedFields) -> BTreeSet<u32> {
    fields
        .keys()
        .filter_map(zone_x_digits)
        .filter_map(|digits| digits.parse().ok())
        .collect()
}

/// Recover every complete zone from `fields`.
pub fn resolve(fields: &SubmittedFields) -> ZoneResolution {
    let mut resolution = ZoneResolution::default();

    for digits in fields.keys().filter_map(zone_x_digits) {
        if digits.parse::<u32>().is_err() {
            let warning = ZoneParseWarning::IndexOutOfRange {
                index: digits.to_string(),
            };
            tracing::warn!("{warning}");
            resolution.warnings.push(warning);
        }
    }

    for index in zone_indices(fields) {
        let zone = ZoneRef::Indexed(index);
        let triplet = (
            fields.get(&format!("zone_{index}_x")),
            fields.get(&format!("zone_{index}_y")),
            fields.get(&format!("zone_{index}_legend")),
        );
        match read_zone(zone, triplet) {
            Ok((x, y, legend)) => resolution.zones.push(Zone {
                id: index,
                x,
                y,
                legend,
            }),
            Err(warning) => {
                tracing::warn!("{warning}");
                resolution.warnings.push(warning);
            }
        }
    }

    let new_triplet = (
        fields.get(NEW_ZONE_X),
        fields.get(NEW_ZONE_Y),
        fields.get(NEW_ZONE_LEGEND),
    );
    let untouched = is_blank(new_triplet.0) && is_blank(new_triplet.1) && is_blank(new_triplet.2);
    if !untouched {
        match read_zone(ZoneRef::New, new_triplet) {
            Ok((x, y, legend)) => match next_free_id(resolution.zones.iter().map(|z| z.id)) {
                Some(id) => {
                    tracing::debug!("new zone `{legend}` assigned id {id}");
                    resolution.zones.push(Zone { id, x, y, legend });
                }
                None => {
                    let warning = ZoneParseWarning::NoFreeId { zone: ZoneRef::New };
                    tracing::warn!("{warning}");
                    resolution.warnings.push(warning);
                }
            },
            Err(warning) => {
                tracing::warn!("{warning}");
                resolution.warnings.push(warning);
            }
        }
    }

    tracing::debug!(
        "resolved {} zone(s), skipped {}",
        resolution.zones.len(),
        resolution.warnings.len()
    );
    resolution
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn read_zone(
    zone: ZoneRef,
    (x, y, legend): (Option<&str>, Option<&str>, Option<&str>),
) -> Result<(f64, f64, String), ZoneParseWarning> {
    let x = coordinate(zone, ZoneField::X, x)?;
    let y = coordinate(zone, ZoneField::Y, y)?;
    let legend = legend.ok_or(ZoneParseWarning::MissingField {
        zone,
        field: ZoneField::Legend,
    })?;
    let legend = legend.trim();
    if legend.is_empty() {
        return Err(ZoneParseWarning::EmptyLegend { zone });
    }
    Ok((x, y, legend.to_string()))
}

fn coordinate(zone: ZoneRef, field: ZoneField, raw: Option<&str>) -> Result<f64, ZoneParseWarning> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Err(ZoneParseWarning::MissingField { zone, field }),
        Some(raw) => raw,
    };
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ZoneParseWarning::BadCoordinate {
            zone,
            field,
            value: raw.to_string(),
        })
}
