//! One-time registry population from a survey dataset.
//!
//! # Responsibility
//! - Decode survey rows exported from the national monument listing.
//! - Register each row as a monument with its four coordinate records.
//!
//! # Invariants
//! - Coordinate values are stored as the dataset's text; numeric cells are
//!   kept as their JSON number text.
//! - Each row is registered atomically; a failing row leaves no orphaned
//!   coordinate records behind.
//! - Seeded conditions are always canonical.

use crate::model::condition::Condition;
use crate::model::coordinates::{CoordinateSet, Delta, Gauss, Utm, Wgs84};
use crate::model::monument::{MonumentId, NewMonument};
use crate::repo::monument_repo::MonumentRepository;
use crate::service::monument_service::MonumentService;
use crate::service::ServiceError;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Stock photographs assigned to seeded monuments.
pub const MONUMENT_IMAGES: &[&str] = &[
    "https://th.bing.com/th/id/OIP.kRTSB1eMfyt_kT-yrLLnCgHaJ4?w=675&h=900&rs=1&pid=ImgDetMain",
    "https://th.bing.com/th/id/OIP.IA8Uu-qkntysI3BLoSPYtQAAAA?w=320&h=240&rs=1&pid=ImgDetMain",
    "https://th.bing.com/th/id/R.a6b88261342c63fee812ac7b39a1c2b9?rik=pJb7bkWdtn2I4g&riu=http%3a%2f%2fphotos1.blogger.com%2fblogger%2f4606%2f983%2f1024%2fPA290003.jpg&ehk=hO5MuiFIS6Yam1oh993MrmeS%2faFcvMbHROjBAhl2DS8%3d&risl=&pid=ImgRaw&r=0",
    "https://th.bing.com/th/id/R.cd15bb4544dfebe21828bc5ab8e395c8?rik=Wx3gGMDGXQ%2fzPQ&riu=http%3a%2f%2fwww.alexkershaw.com.au%2fimages%2ffullsize%2fGeodetic07_big.jpg&ehk=0H9J5TCuO7o%2bZ%2ba5P7lw%2bnVosP6kjswRLM%2bp6M2jUFM%3d&risl=&pid=ImgRaw&r=0",
    "https://thumbs.dreamstime.com/b/survey-mark-found-ground-detail-marker-also-called-monument-geodetic-74245078.jpg",
    "https://s0.geograph.org.uk/geophotos/03/55/05/3550547_407fea12.jpg",
];

pub type SeedResult<T> = Result<T, SeedError>;

#[derive(Debug)]
pub enum SeedError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Service(ServiceError),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read seed file `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid seed data: {err}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Service(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<ServiceError> for SeedError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

/// One row of the survey dataset, keyed by the export's column names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SurveyRow {
    #[serde(deserialize_with = "cell_text")]
    pub monunum: String,
    #[serde(deserialize_with = "cell_text")]
    pub topo: String,
    #[serde(deserialize_with = "cell_text")]
    pub gauss_lo: String,
    #[serde(deserialize_with = "cell_text")]
    pub gauss_x: String,
    #[serde(deserialize_with = "cell_text")]
    pub gauss_y: String,
    #[serde(deserialize_with = "cell_text")]
    pub lat_wgs84: String,
    #[serde(deserialize_with = "cell_text")]
    pub lon_wgs84: String,
    #[serde(deserialize_with = "cell_text")]
    pub utm_cm: String,
    #[serde(rename = "UTM_N", deserialize_with = "cell_text")]
    pub utm_north: String,
    #[serde(rename = "UTM_E", deserialize_with = "cell_text")]
    pub utm_east: String,
    #[serde(deserialize_with = "cell_text")]
    pub delta_lat: String,
    #[serde(deserialize_with = "cell_text")]
    pub delta_lon: String,
    #[serde(deserialize_with = "cell_text")]
    pub delta_x: String,
    #[serde(deserialize_with = "cell_text")]
    pub delta_y: String,
    #[serde(deserialize_with = "cell_text")]
    pub delta_e: String,
    #[serde(deserialize_with = "cell_text")]
    pub delta_n: String,
}

impl SurveyRow {
    /// Builds the registration input for this row.
    pub fn to_new_monument(&self, condition: Condition, image: &str) -> NewMonument {
        NewMonument {
            monument_name: self.monunum.clone(),
            topo: self.topo.clone(),
            condition,
            monument_image: image.to_string(),
            coordinates: CoordinateSet {
                gauss: Gauss {
                    gauss_lo: self.gauss_lo.clone(),
                    gauss_x: self.gauss_x.clone(),
                    gauss_y: self.gauss_y.clone(),
                },
                wgs84: Wgs84 {
                    wgs84_lat: self.lat_wgs84.clone(),
                    wgs84_lon: self.lon_wgs84.clone(),
                },
                utm: Utm {
                    utm_cm: self.utm_cm.clone(),
                    utm_north: self.utm_north.clone(),
                    utm_east: self.utm_east.clone(),
                },
                delta: Delta {
                    delta_lat: self.delta_lat.clone(),
                    delta_lon: self.delta_lon.clone(),
                    delta_x: self.delta_x.clone(),
                    delta_y: self.delta_y.clone(),
                    delta_e: self.delta_e.clone(),
                    delta_n: self.delta_n.clone(),
                },
            },
        }
    }
}

/// Decodes a JSON array of survey rows.
pub fn parse_survey_rows(json: &str) -> SeedResult<Vec<SurveyRow>> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and decodes a survey dataset file.
pub fn load_survey_rows(path: impl AsRef<Path>) -> SeedResult<Vec<SurveyRow>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_survey_rows(&json)
}

/// Registers every row, drawing a canonical condition and a stock image for each.
///
/// Returns the ids of the created monuments in dataset order.
pub fn seed_monuments<R, G>(
    service: &mut MonumentService<R>,
    rows: &[SurveyRow],
    rng: &mut G,
) -> SeedResult<Vec<MonumentId>>
where
    R: MonumentRepository,
    G: Rng,
{
    let mut created = Vec::with_capacity(rows.len());
    for row in rows {
        let condition = Condition::CANONICAL[rng.gen_range(0..Condition::CANONICAL.len())].clone();
        let image = MONUMENT_IMAGES.choose(rng).copied().unwrap_or_default();

        let monument = service.register_monument(&row.to_new_monument(condition, image))?;
        debug!(
            "event=seed_row module=seed status=ok monument_id={}",
            monument.id
        );
        created.push(monument.id);
    }

    info!("event=seed module=seed status=ok created={}", created.len());
    Ok(created)
}

fn cell_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected text or number cell, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_survey_rows;

    const ROW: &str = r#"[{
        "MONUNUM": "TSM 1234", "TOPO": 2628,
        "GAUSS_LO": 29, "GAUSS_X": "2881234.51", "GAUSS_Y": -31234.2,
        "LAT_WGS84": "-26.0412", "LON_WGS84": "28.3125",
        "UTM_CM": 27, "UTM_N": "7119000.1", "UTM_E": "631000.4",
        "DELTA_LAT": "0.1", "DELTA_LON": "0.2", "DELTA_X": 1.5,
        "DELTA_Y": "2", "DELTA_E": null, "DELTA_N": "4"
    }]"#;

    #[test]
    fn numeric_and_null_cells_become_text() {
        let rows = parse_survey_rows(ROW).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.monunum, "TSM 1234");
        assert_eq!(row.topo, "2628");
        assert_eq!(row.gauss_y, "-31234.2");
        assert_eq!(row.utm_north, "7119000.1");
        assert_eq!(row.delta_x, "1.5");
        assert_eq!(row.delta_e, "");
    }

    #[test]
    fn missing_column_is_rejected() {
        let err = parse_survey_rows(r#"[{"MONUNUM": "X"}]"#).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn nested_values_are_rejected() {
        let json = ROW.replace("\"DELTA_N\": \"4\"", "\"DELTA_N\": [4]");
        assert!(parse_survey_rows(&json).is_err());
    }
}
