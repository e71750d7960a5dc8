//! Report ledger use-cases.
//!
//! # Invariants
//! - Reports are filed only against existing monuments.
//! - Resolution is per monument, not per report: one decision closes the
//!   monument's whole backlog, whatever each report claimed.
//! - Duplicate reports (same monument, same text) are accepted.

use crate::model::condition::Condition;
use crate::model::monument::MonumentId;
use crate::model::report::Report;
use crate::repo::report_repo::{ReportListQuery, ReportRepository};
use crate::service::{page_request, PageResult, ServiceError, ServiceResult};
use log::info;

/// Ledger facade over a report repository.
pub struct ReportService<R: ReportRepository> {
    repo: R,
}

impl<R: ReportRepository> ReportService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists reports, unresolved first.
    pub fn list_reports(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> ServiceResult<PageResult<Report>> {
        let request = page_request(page, per_page);
        let query = ReportListQuery {
            page: Some(request),
            ..ReportListQuery::default()
        };
        let items = self.repo.list_reports(&query)?;
        let total_matching = self.repo.count_reports(&ReportListQuery::default())?;

        Ok(PageResult {
            items,
            page: request.page,
            per_page: request.per_page,
            total_matching,
        })
    }

    /// Finds reports whose monument name contains `name_query`, folding ASCII
    /// case only.
    ///
    /// Pagination is advisory here: every match is returned and the
    /// resolved `page`/`per_page` are only echoed back.
    pub fn search_reports(
        &self,
        name_query: &str,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> ServiceResult<PageResult<Report>> {
        let request = page_request(page, per_page);
        let query = ReportListQuery {
            monument_name_contains: Some(name_query.to_string()),
            ..ReportListQuery::default()
        };
        let items = self.repo.list_reports(&query)?;
        let total_matching = items.len() as u64;

        Ok(PageResult {
            items,
            page: request.page,
            per_page: request.per_page,
            total_matching,
        })
    }

    /// All reports of one monument, unresolved first.
    pub fn reports_for_monument(&self, monument_id: MonumentId) -> ServiceResult<Vec<Report>> {
        if !self.repo.monument_exists(monument_id)? {
            return Err(ServiceError::NotFound(monument_id));
        }

        let query = ReportListQuery {
            monument_id: Some(monument_id),
            ..ReportListQuery::default()
        };
        Ok(self.repo.list_reports(&query)?)
    }

    /// Files a new, unresolved report.
    pub fn create_report(
        &mut self,
        monument_id: MonumentId,
        condition: impl Into<String>,
    ) -> ServiceResult<Report> {
        let condition = condition.into();
        let report_id = self.repo.create_report(monument_id, &condition)?;
        info!(
            "event=report_create module=service status=ok monument_id={} report_id={}",
            monument_id, report_id
        );

        self.repo
            .get_report(report_id)?
            .ok_or(ServiceError::InconsistentState(
                "created report not found in read-back",
            ))
    }

    /// Sets the monument's condition and resolves all of its open reports.
    ///
    /// Returns the number of reports that were open before the call.
    pub fn resolve_reports(
        &mut self,
        monument_id: MonumentId,
        condition: impl Into<Condition>,
    ) -> ServiceResult<usize> {
        let condition = condition.into();
        let resolved = self.repo.resolve_reports(monument_id, &condition)?;
        info!(
            "event=report_resolve module=service status=ok monument_id={} resolved_count={}",
            monument_id, resolved
        );
        Ok(resolved)
    }
}
