use super::{
    json_body, page_params, MonumentNameBody, Operation, PageMeta, PageParams, ReportBody,
};
use crate::envelope::NetworkResponse;
use crate::server::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use monument_core::{MonumentId, PageResult, Report, ReportService, SqliteReportRepository};
use serde::Serialize;
use std::time::Instant;

const LIST_REPORTS: Operation = Operation {
    name: "list_reports",
    success: "Successfully fetched Reports",
    failure: "Failed to get reports",
};
const SEARCH_REPORTS: Operation = Operation {
    name: "search_reports",
    success: "Successfully fetched Reports",
    failure: "Failed to search reports",
};
const MONUMENT_REPORTS: Operation = Operation {
    name: "list_reports_for_monument",
    success: "Successfully fetched Reports",
    failure: "Failed to get reports",
};
const CREATE_REPORT: Operation = Operation {
    name: "create_report",
    success: "Report Created!",
    failure: "Failed to create report",
};
const RESOLVE_REPORTS: Operation = Operation {
    name: "resolve_reports",
    success: "Reports Resolved!",
    failure: "Failed to resolve reports",
};

#[derive(Debug, Serialize)]
pub struct ReportPage {
    pub reports: Vec<Report>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

impl From<PageResult<Report>> for ReportPage {
    fn from(value: PageResult<Report>) -> Self {
        let meta = PageMeta::from(&value);
        Self {
            reports: value.items,
            meta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolveSummary {
    pub resolved_count: usize,
}

pub async fn list_reports(
    State(state): State<AppState>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> NetworkResponse<ReportPage> {
    let started = Instant::now();
    let result = async move {
        let params = page_params(query)?;
        state
            .with_session(move |conn| {
                let service = ReportService::new(SqliteReportRepository::try_new(conn)?);
                let page = service.list_reports(params.page, params.per_page)?;
                Ok(ReportPage::from(page))
            })
            .await
    }
    .await;
    LIST_REPORTS.respond(started, result)
}

/// Every report whose monument name matches; paging fields are echoed only.
pub async fn search_reports(
    State(state): State<AppState>,
    query: Result<Query<PageParams>, QueryRejection>,
    body: Result<Json<MonumentNameBody>, JsonRejection>,
) -> NetworkResponse<ReportPage> {
    let started = Instant::now();
    let result = async move {
        let params = page_params(query)?;
        let body = json_body(body)?;
        state
            .with_session(move |conn| {
                let service = ReportService::new(SqliteReportRepository::try_new(conn)?);
                let page =
                    service.search_reports(&body.monument_name, params.page, params.per_page)?;
                Ok(ReportPage::from(page))
            })
            .await
    }
    .await;
    SEARCH_REPORTS.respond(started, result)
}

pub async fn reports_for_monument(
    State(state): State<AppState>,
    id: Result<Path<MonumentId>, PathRejection>,
) -> NetworkResponse<Vec<Report>> {
    let started = Instant::now();
    let result = async move {
        let Path(id) = id?;
        state
            .with_session(move |conn| {
                let service = ReportService::new(SqliteReportRepository::try_new(conn)?);
                Ok(service.reports_for_monument(id)?)
            })
            .await
    }
    .await;
    MONUMENT_REPORTS.respond(started, result)
}

pub async fn create_report(
    State(state): State<AppState>,
    body: Result<Json<ReportBody>, JsonRejection>,
) -> NetworkResponse<Report> {
    let started = Instant::now();
    let result = async move {
        let body = json_body(body)?;
        state
            .with_session(move |conn| {
                let mut service = ReportService::new(SqliteReportRepository::try_new(conn)?);
                Ok(service.create_report(body.monument_id, body.condition)?)
            })
            .await
    }
    .await;
    CREATE_REPORT.respond(started, result)
}

pub async fn resolve_reports(
    State(state): State<AppState>,
    body: Result<Json<ReportBody>, JsonRejection>,
) -> NetworkResponse<ResolveSummary> {
    let started = Instant::now();
    let result = async move {
        let body = json_body(body)?;
        state
            .with_session(move |conn| {
                let mut service = ReportService::new(SqliteReportRepository::try_new(conn)?);
                let resolved_count = service.resolve_reports(body.monument_id, body.condition)?;
                Ok(ResolveSummary { resolved_count })
            })
            .await
    }
    .await;
    RESOLVE_REPORTS.respond(started, result)
}
