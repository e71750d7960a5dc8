//! Storage for the four coordinate representations.
//!
//! Each representation lives in its own table and is written once, when
//! its monument is registered. There is no update path.

use crate::model::coordinates::{CoordinateId, CoordinateRecord, Delta, Gauss, Utm, Wgs84};
use crate::repo::RepoResult;
use rusqlite::{params_from_iter, Connection, Row};

/// Binds a coordinate model to its table.
///
/// Column names are globally unique across the four tables, so joined rows
/// can be decoded by name without aliasing each field.
pub trait CoordinateTable: Sized {
    const TABLE: &'static str;
    /// Name under which the row id appears in joined monument rows.
    const ID_ALIAS: &'static str;
    const COLUMNS: &'static [&'static str];

    fn column_values(&self) -> Vec<&str>;
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

impl CoordinateTable for Gauss {
    const TABLE: &'static str = "gauss_points";
    const ID_ALIAS: &'static str = "gauss_id";
    const COLUMNS: &'static [&'static str] = &["gauss_lo", "gauss_x", "gauss_y"];

    fn column_values(&self) -> Vec<&str> {
        vec![
            self.gauss_lo.as_str(),
            self.gauss_x.as_str(),
            self.gauss_y.as_str(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            gauss_lo: row.get("gauss_lo")?,
            gauss_x: row.get("gauss_x")?,
            gauss_y: row.get("gauss_y")?,
        })
    }
}

impl CoordinateTable for Wgs84 {
    const TABLE: &'static str = "wgs84_points";
    const ID_ALIAS: &'static str = "wgs84_id";
    const COLUMNS: &'static [&'static str] = &["wgs84_lat", "wgs84_lon"];

    fn column_values(&self) -> Vec<&str> {
        vec![self.wgs84_lat.as_str(), self.wgs84_lon.as_str()]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            wgs84_lat: row.get("wgs84_lat")?,
            wgs84_lon: row.get("wgs84_lon")?,
        })
    }
}

impl CoordinateTable for Utm {
    const TABLE: &'static str = "utm_points";
    const ID_ALIAS: &'static str = "utm_id";
    const COLUMNS: &'static [&'static str] = &["utm_cm", "utm_north", "utm_east"];

    fn column_values(&self) -> Vec<&str> {
        vec![
            self.utm_cm.as_str(),
            self.utm_north.as_str(),
            self.utm_east.as_str(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            utm_cm: row.get("utm_cm")?,
            utm_north: row.get("utm_north")?,
            utm_east: row.get("utm_east")?,
        })
    }
}

impl CoordinateTable for Delta {
    const TABLE: &'static str = "delta_points";
    const ID_ALIAS: &'static str = "delta_id";
    const COLUMNS: &'static [&'static str] = &[
        "delta_lat",
        "delta_lon",
        "delta_x",
        "delta_y",
        "delta_e",
        "delta_n",
    ];

    fn column_values(&self) -> Vec<&str> {
        vec![
            self.delta_lat.as_str(),
            self.delta_lon.as_str(),
            self.delta_x.as_str(),
            self.delta_y.as_str(),
            self.delta_e.as_str(),
            self.delta_n.as_str(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            delta_lat: row.get("delta_lat")?,
            delta_lon: row.get("delta_lon")?,
            delta_x: row.get("delta_x")?,
            delta_y: row.get("delta_y")?,
            delta_e: row.get("delta_e")?,
            delta_n: row.get("delta_n")?,
        })
    }
}

/// Inserts one coordinate row and returns its id.
///
/// Callers registering a monument pass their open transaction here so the
/// coordinate rows and the monument row commit together.
pub fn insert_point<T: CoordinateTable>(conn: &Connection, point: &T) -> RepoResult<CoordinateId> {
    let placeholders = (1..=T::COLUMNS.len())
        .map(|idx| format!("?{idx}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({placeholders});",
        T::TABLE,
        T::COLUMNS.join(", ")
    );
    conn.execute(&sql, params_from_iter(point.column_values()))?;
    Ok(conn.last_insert_rowid())
}

/// Loads one coordinate row by id.
#[cfg(test)]
pub(crate) fn get_point<T: CoordinateTable>(
    conn: &Connection,
    id: CoordinateId,
) -> RepoResult<Option<CoordinateRecord<T>>> {
    let sql = format!(
        "SELECT id AS {}, {} FROM {} WHERE id = ?1;",
        T::ID_ALIAS,
        T::COLUMNS.join(", "),
        T::TABLE
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([id])?;
    match rows.next()? {
        Some(row) => Ok(Some(record_from_row(row)?)),
        None => Ok(None),
    }
}

/// Decodes the coordinate record embedded in a joined row.
pub(crate) fn record_from_row<T: CoordinateTable>(row: &Row<'_>) -> RepoResult<CoordinateRecord<T>> {
    Ok(CoordinateRecord {
        id: row.get(T::ID_ALIAS)?,
        point: T::from_row(row)?,
    })
}

#[cfg(test)]
mod tests {
    use super::{get_point, insert_point};
    use crate::db::open_db_in_memory;
    use crate::model::coordinates::{Delta, Utm};

    #[test]
    fn inserted_point_reads_back_verbatim() {
        let conn = open_db_in_memory().unwrap();
        let delta = Delta {
            delta_lat: "-0.000123".to_string(),
            delta_lon: "0.0004".to_string(),
            delta_x: "12.1".to_string(),
            delta_y: "-3.40".to_string(),
            delta_e: "1e-3".to_string(),
            delta_n: "".to_string(),
        };

        let id = insert_point(&conn, &delta).unwrap();
        let loaded = get_point::<Delta>(&conn, id).unwrap().unwrap();

        assert_eq!(loaded.id, id);
        assert_eq!(loaded.point, delta);
    }

    #[test]
    fn missing_point_is_none() {
        let conn = open_db_in_memory().unwrap();
        assert!(get_point::<Utm>(&conn, 42).unwrap().is_none());
    }
}
