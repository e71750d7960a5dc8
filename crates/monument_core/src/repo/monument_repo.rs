//! Monument repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Register monuments together with their four coordinate rows.
//! - Read monuments back fully hydrated, by id or by page.
//! - Apply administrative condition changes.
//!
//! # Invariants
//! - Registration is all-or-nothing: coordinate rows and the monument row
//!   share one transaction.
//! - Every read joins all four coordinate tables; a monument with a missing
//!   coordinate row is never returned.
//! - Listing order is `id ASC`.

use crate::model::condition::Condition;
use crate::model::coordinates::{Delta, Gauss, Utm, Wgs84};
use crate::model::monument::{Monument, MonumentId, NewMonument};
use crate::repo::coordinate_store::{insert_point, record_from_row};
use crate::repo::{contains_pattern, ensure_connection_ready, PageRequest, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};

/// Selected monument columns, aliased so joined report rows decode the same way.
pub(crate) const MONUMENT_COLUMNS: &str = "
    m.id AS monument_id,
    m.monument_name AS monument_name,
    m.topo AS topo,
    m.condition AS monument_condition,
    m.monument_image AS monument_image,
    g.id AS gauss_id,
    g.gauss_lo AS gauss_lo,
    g.gauss_x AS gauss_x,
    g.gauss_y AS gauss_y,
    w.id AS wgs84_id,
    w.wgs84_lat AS wgs84_lat,
    w.wgs84_lon AS wgs84_lon,
    u.id AS utm_id,
    u.utm_cm AS utm_cm,
    u.utm_north AS utm_north,
    u.utm_east AS utm_east,
    d.id AS delta_id,
    d.delta_lat AS delta_lat,
    d.delta_lon AS delta_lon,
    d.delta_x AS delta_x,
    d.delta_y AS delta_y,
    d.delta_e AS delta_e,
    d.delta_n AS delta_n";

/// Joins that hydrate `m` with its coordinate rows.
pub(crate) const COORDINATE_JOINS: &str = "
    INNER JOIN gauss_points g ON g.id = m.gauss_id
    INNER JOIN wgs84_points w ON w.id = m.wgs84_id
    INNER JOIN utm_points u ON u.id = m.utm_id
    INNER JOIN delta_points d ON d.id = m.delta_id";

/// Filter and pagination options for monument listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonumentListQuery {
    /// Case-insensitive substring of `monument_name`.
    pub name_contains: Option<String>,
    /// `None` returns every match.
    pub page: Option<PageRequest>,
}

/// Repository interface for the monument registry.
pub trait MonumentRepository {
    /// Inserts four coordinate rows and the monument in one transaction.
    fn create_monument(&mut self, monument: &NewMonument) -> RepoResult<MonumentId>;
    fn get_monument(&self, id: MonumentId) -> RepoResult<Option<Monument>>;
    fn list_monuments(&self, query: &MonumentListQuery) -> RepoResult<Vec<Monument>>;
    /// Counts every monument matching the name filter, ignoring pagination.
    fn count_monuments(&self, name_contains: Option<&str>) -> RepoResult<u64>;
    /// Returns `RepoError::NotFound` when no monument has this id.
    fn update_condition(&self, id: MonumentId, condition: &Condition) -> RepoResult<()>;
}

/// SQLite-backed monument repository.
pub struct SqliteMonumentRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteMonumentRepository<'conn> {
    /// Wraps a migrated connection, rejecting connections with a stale schema.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl MonumentRepository for SqliteMonumentRepository<'_> {
    fn create_monument(&mut self, monument: &NewMonument) -> RepoResult<MonumentId> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let coordinates = &monument.coordinates;
        let gauss_id = insert_point(&tx, &coordinates.gauss)?;
        let wgs84_id = insert_point(&tx, &coordinates.wgs84)?;
        let utm_id = insert_point(&tx, &coordinates.utm)?;
        let delta_id = insert_point(&tx, &coordinates.delta)?;

        tx.execute(
            "INSERT INTO monuments (
                monument_name,
                topo,
                condition,
                monument_image,
                gauss_id,
                wgs84_id,
                utm_id,
                delta_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                monument.monument_name.as_str(),
                monument.topo.as_str(),
                monument.condition.as_str(),
                monument.monument_image.as_str(),
                gauss_id,
                wgs84_id,
                utm_id,
                delta_id,
            ],
        )?;
        let id = tx.last_insert_rowid();

        tx.commit()?;
        Ok(id)
    }

    fn get_monument(&self, id: MonumentId) -> RepoResult<Option<Monument>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE m.id = ?1;", monument_select_sql()))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_monument_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_monuments(&self, query: &MonumentListQuery) -> RepoResult<Vec<Monument>> {
        let mut sql = monument_select_sql();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(needle) = query.name_contains.as_deref() {
            sql.push_str(" WHERE m.monument_name LIKE ? ESCAPE '\\'");
            bind_values.push(Value::Text(contains_pattern(needle)));
        }

        sql.push_str(" ORDER BY m.id ASC");

        if let Some(page) = query.page {
            sql.push_str(" LIMIT ? OFFSET ?");
            bind_values.push(Value::Integer(page.limit()));
            bind_values.push(Value::Integer(page.offset()));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut monuments = Vec::new();
        while let Some(row) = rows.next()? {
            monuments.push(parse_monument_row(row)?);
        }

        Ok(monuments)
    }

    fn count_monuments(&self, name_contains: Option<&str>) -> RepoResult<u64> {
        let count: i64 = match name_contains {
            Some(needle) => self.conn.query_row(
                "SELECT COUNT(*) FROM monuments WHERE monument_name LIKE ?1 ESCAPE '\\';",
                [contains_pattern(needle)],
                |row| row.get(0),
            )?,
            None => self
                .conn
                .query_row("SELECT COUNT(*) FROM monuments;", [], |row| row.get(0))?,
        };
        count_to_u64(count)
    }

    fn update_condition(&self, id: MonumentId, condition: &Condition) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE monuments SET condition = ?2 WHERE id = ?1;",
            params![id, condition.as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

pub(crate) fn monument_select_sql() -> String {
    format!("SELECT {MONUMENT_COLUMNS} FROM monuments m {COORDINATE_JOINS}")
}

/// Decodes a monument from a row produced with [`MONUMENT_COLUMNS`].
pub(crate) fn parse_monument_row(row: &Row<'_>) -> RepoResult<Monument> {
    let condition: String = row.get("monument_condition")?;
    Ok(Monument {
        id: row.get("monument_id")?,
        monument_name: row.get("monument_name")?,
        topo: row.get("topo")?,
        condition: Condition::from(condition),
        monument_image: row.get("monument_image")?,
        gauss: record_from_row::<Gauss>(row)?,
        wgs84: record_from_row::<Wgs84>(row)?,
        utm: record_from_row::<Utm>(row)?,
        delta: record_from_row::<Delta>(row)?,
    })
}

pub(crate) fn monument_exists(conn: &Connection, id: MonumentId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM monuments WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

pub(crate) fn count_to_u64(count: i64) -> RepoResult<u64> {
    u64::try_from(count)
        .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
}
