//! Monument registry records.
//!
//! # Invariants
//! - `Monument` is only constructed from a full join of the monument row and
//!   its four coordinate rows, so a partially hydrated value cannot exist.
//! - Foreign key ids are derived from the embedded records, never stored twice.

use crate::model::condition::Condition;
use crate::model::coordinates::{
    CoordinateId, CoordinateRecord, CoordinateSet, Delta, Gauss, Utm, Wgs84,
};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

pub type MonumentId = i64;

/// Fully hydrated monument as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monument {
    pub id: MonumentId,
    /// Survey number. Not unique across the registry.
    pub monument_name: String,
    pub topo: String,
    pub condition: Condition,
    /// Image URI shown by clients.
    pub monument_image: String,
    pub gauss: CoordinateRecord<Gauss>,
    pub wgs84: CoordinateRecord<Wgs84>,
    pub utm: CoordinateRecord<Utm>,
    pub delta: CoordinateRecord<Delta>,
}

impl Monument {
    pub fn gauss_id(&self) -> CoordinateId {
        self.gauss.id
    }

    pub fn wgs84_id(&self) -> CoordinateId {
        self.wgs84.id
    }

    pub fn utm_id(&self) -> CoordinateId {
        self.utm.id
    }

    pub fn delta_id(&self) -> CoordinateId {
        self.delta.id
    }
}

impl Serialize for Monument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Monument", 13)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("monument_name", &self.monument_name)?;
        state.serialize_field("topo", &self.topo)?;
        state.serialize_field("condition", &self.condition)?;
        state.serialize_field("monument_image", &self.monument_image)?;
        state.serialize_field("gauss_id", &self.gauss_id())?;
        state.serialize_field("wgs84_id", &self.wgs84_id())?;
        state.serialize_field("utm_id", &self.utm_id())?;
        state.serialize_field("delta_id", &self.delta_id())?;
        state.serialize_field("gausspoints", &self.gauss)?;
        state.serialize_field("wgs84points", &self.wgs84)?;
        state.serialize_field("utmpoints", &self.utm)?;
        state.serialize_field("deltapoints", &self.delta)?;
        state.end()
    }
}

/// Input for registering a monument together with its coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMonument {
    pub monument_name: String,
    pub topo: String,
    pub condition: Condition,
    pub monument_image: String,
    pub coordinates: CoordinateSet,
}

#[cfg(test)]
mod tests {
    use super::Monument;
    use crate::model::condition::Condition;
    use crate::model::coordinates::{CoordinateRecord, Delta, Gauss, Utm, Wgs84};

    fn sample() -> Monument {
        Monument {
            id: 7,
            monument_name: "GAUSS-PT-14".to_string(),
            topo: "2628".to_string(),
            condition: Condition::Good,
            monument_image: "https://example.org/m.jpg".to_string(),
            gauss: CoordinateRecord {
                id: 11,
                point: Gauss {
                    gauss_lo: "29".to_string(),
                    gauss_x: "2881234.5".to_string(),
                    gauss_y: "-31234.2".to_string(),
                },
            },
            wgs84: CoordinateRecord {
                id: 12,
                point: Wgs84 {
                    wgs84_lat: "-26.04".to_string(),
                    wgs84_lon: "28.31".to_string(),
                },
            },
            utm: CoordinateRecord {
                id: 13,
                point: Utm {
                    utm_cm: "27".to_string(),
                    utm_north: "7119000".to_string(),
                    utm_east: "631000".to_string(),
                },
            },
            delta: CoordinateRecord {
                id: 14,
                point: Delta {
                    delta_lat: "0.1".to_string(),
                    delta_lon: "0.2".to_string(),
                    delta_x: "1".to_string(),
                    delta_y: "2".to_string(),
                    delta_e: "3".to_string(),
                    delta_n: "4".to_string(),
                },
            },
        }
    }

    #[test]
    fn json_projection_carries_ids_and_nested_records() {
        let value = serde_json::to_value(sample()).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["condition"], "GOOD");
        assert_eq!(value["gauss_id"], 11);
        assert_eq!(value["delta_id"], 14);
        assert_eq!(value["gausspoints"]["id"], 11);
        assert_eq!(value["gausspoints"]["gauss_lo"], "29");
        assert_eq!(value["wgs84points"]["wgs84_lat"], "-26.04");
        assert_eq!(value["utmpoints"]["utm_east"], "631000");
        assert_eq!(value["deltapoints"]["delta_n"], "4");
    }
}
