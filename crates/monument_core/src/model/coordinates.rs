//! Coordinate representations attached to every monument.
//!
//! All values are the surveyed text as delivered by the source dataset.
//! Nothing here parses or converts between systems.

use serde::{Deserialize, Serialize};

/// Row identity inside one coordinate store.
pub type CoordinateId = i64;

/// Gauss conform projection (central meridian `lo`, `x`, `y`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gauss {
    pub gauss_lo: String,
    pub gauss_x: String,
    pub gauss_y: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wgs84 {
    pub wgs84_lat: String,
    pub wgs84_lon: String,
}

/// UTM zone central meridian plus northing/easting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utm {
    pub utm_cm: String,
    pub utm_north: String,
    pub utm_east: String,
}

/// Datum shift values recorded alongside the other systems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub delta_lat: String,
    pub delta_lon: String,
    pub delta_x: String,
    pub delta_y: String,
    pub delta_e: String,
    pub delta_n: String,
}

/// A persisted coordinate row. Serializes flat, e.g.
/// `{"id": 3, "wgs84_lat": "...", "wgs84_lon": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoordinateRecord<T> {
    pub id: CoordinateId,
    #[serde(flatten)]
    pub point: T,
}

/// The four coordinate rows created together with a monument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateSet {
    pub gauss: Gauss,
    pub wgs84: Wgs84,
    pub utm: Utm,
    pub delta: Delta,
}
