//! Report ledger contracts and SQLite implementation.
//!
//! # Responsibility
//! - File condition reports against existing monuments.
//! - List the backlog, unresolved reports first.
//! - Resolve a monument's whole backlog in one step.
//!
//! # Invariants
//! - A report can only be filed against an existing monument; the check runs
//!   in the same transaction as the insert.
//! - Resolution updates the monument condition and closes every open report
//!   of that monument atomically.
//! - Reports are never deleted and never reopened.

use crate::model::condition::Condition;
use crate::model::monument::MonumentId;
use crate::model::report::{Report, ReportId};
use crate::repo::monument_repo::{
    count_to_u64, monument_exists, parse_monument_row, COORDINATE_JOINS, MONUMENT_COLUMNS,
};
use crate::repo::{
    bool_to_int, contains_pattern, ensure_connection_ready, int_to_bool, PageRequest, RepoError,
    RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};

/// Filter and pagination options for report listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportListQuery {
    /// Case-insensitive substring of the owning monument's name.
    pub monument_name_contains: Option<String>,
    /// Restricts the listing to one monument.
    pub monument_id: Option<MonumentId>,
    /// `None` returns every match.
    pub page: Option<PageRequest>,
}

/// Repository interface for the report ledger.
pub trait ReportRepository {
    /// Returns `RepoError::NotFound` when the monument does not exist.
    fn create_report(&mut self, monument_id: MonumentId, condition: &str) -> RepoResult<ReportId>;
    fn get_report(&self, id: ReportId) -> RepoResult<Option<Report>>;
    /// Lists reports ordered by `is_resolved ASC, id ASC`.
    fn list_reports(&self, query: &ReportListQuery) -> RepoResult<Vec<Report>>;
    fn count_reports(&self, query: &ReportListQuery) -> RepoResult<u64>;
    fn monument_exists(&self, monument_id: MonumentId) -> RepoResult<bool>;
    /// Sets the monument condition and resolves all of its open reports.
    ///
    /// Returns how many reports moved from unresolved to resolved.
    fn resolve_reports(
        &mut self,
        monument_id: MonumentId,
        condition: &Condition,
    ) -> RepoResult<usize>;
}

/// SQLite-backed report repository.
pub struct SqliteReportRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteReportRepository<'conn> {
    /// Wraps a migrated connection, rejecting connections with a stale schema.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ReportRepository for SqliteReportRepository<'_> {
    fn create_report(&mut self, monument_id: MonumentId, condition: &str) -> RepoResult<ReportId> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !monument_exists(&tx, monument_id)? {
            return Err(RepoError::NotFound(monument_id));
        }

        tx.execute(
            "INSERT INTO reports (monument_id, condition, is_resolved) VALUES (?1, ?2, ?3);",
            params![monument_id, condition, bool_to_int(false)],
        )?;
        let id = tx.last_insert_rowid();

        tx.commit()?;
        Ok(id)
    }

    fn get_report(&self, id: ReportId) -> RepoResult<Option<Report>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE r.id = ?1;", report_select_sql()))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_report_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_reports(&self, query: &ReportListQuery) -> RepoResult<Vec<Report>> {
        let mut sql = report_select_sql();
        let mut bind_values = push_filters(&mut sql, query);

        sql.push_str(" ORDER BY r.is_resolved ASC, r.id ASC");

        if let Some(page) = query.page {
            sql.push_str(" LIMIT ? OFFSET ?");
            bind_values.push(Value::Integer(page.limit()));
            bind_values.push(Value::Integer(page.offset()));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut reports = Vec::new();
        while let Some(row) = rows.next()? {
            reports.push(parse_report_row(row)?);
        }

        Ok(reports)
    }

    fn count_reports(&self, query: &ReportListQuery) -> RepoResult<u64> {
        let mut sql = String::from(
            "SELECT COUNT(*)
             FROM reports r
             INNER JOIN monuments m ON m.id = r.monument_id",
        );
        let bind_values = push_filters(&mut sql, query);
        let count: i64 = self
            .conn
            .query_row(&sql, params_from_iter(bind_values), |row| row.get(0))?;
        count_to_u64(count)
    }

    fn monument_exists(&self, monument_id: MonumentId) -> RepoResult<bool> {
        monument_exists(&*self.conn, monument_id)
    }

    fn resolve_reports(
        &mut self,
        monument_id: MonumentId,
        condition: &Condition,
    ) -> RepoResult<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !monument_exists(&tx, monument_id)? {
            return Err(RepoError::NotFound(monument_id));
        }

        tx.execute(
            "UPDATE monuments SET condition = ?2 WHERE id = ?1;",
            params![monument_id, condition.as_str()],
        )?;
        // Every open report is closed, whatever condition it claimed.
        let resolved = tx.execute(
            "UPDATE reports SET is_resolved = 1 WHERE monument_id = ?1 AND is_resolved = 0;",
            [monument_id],
        )?;

        tx.commit()?;
        Ok(resolved)
    }
}

fn report_select_sql() -> String {
    format!(
        "SELECT
            r.id AS report_id,
            r.monument_id AS report_monument_id,
            r.condition AS report_condition,
            r.is_resolved AS is_resolved,
            {MONUMENT_COLUMNS}
         FROM reports r
         INNER JOIN monuments m ON m.id = r.monument_id
         {COORDINATE_JOINS}"
    )
}

fn push_filters(sql: &mut String, query: &ReportListQuery) -> Vec<Value> {
    let mut bind_values: Vec<Value> = Vec::new();
    sql.push_str(" WHERE 1 = 1");

    if let Some(needle) = query.monument_name_contains.as_deref() {
        sql.push_str(" AND m.monument_name LIKE ? ESCAPE '\\'");
        bind_values.push(Value::Text(contains_pattern(needle)));
    }

    if let Some(monument_id) = query.monument_id {
        sql.push_str(" AND r.monument_id = ?");
        bind_values.push(Value::Integer(monument_id));
    }

    bind_values
}

fn parse_report_row(row: &Row<'_>) -> RepoResult<Report> {
    let monument = parse_monument_row(row)?;
    let monument_id: MonumentId = row.get("report_monument_id")?;
    if monument_id != monument.id {
        return Err(RepoError::InvalidData(format!(
            "report monument id `{monument_id}` does not match joined monument `{}`",
            monument.id
        )));
    }

    Ok(Report {
        id: row.get("report_id")?,
        monument_id,
        condition: row.get("report_condition")?,
        is_resolved: int_to_bool(row.get("is_resolved")?, "reports.is_resolved")?,
        monument,
    })
}
