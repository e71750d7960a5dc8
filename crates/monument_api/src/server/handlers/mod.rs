//! Endpoint handlers and their wire payloads.

pub mod monuments;
pub mod reports;
pub mod system;

use crate::envelope::{ApiError, ErrorKind, NetworkResponse};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query};
use log::{error, info, warn};
use monument_core::logging::sanitize_message;
use monument_core::{MonumentId, PageResult};
use serde::{Deserialize, Serialize};
use std::time::Instant;

const MAX_ERROR_LOG_CHARS: usize = 240;

/// Names one endpoint's use-case and its envelope messages.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Operation {
    pub name: &'static str,
    pub success: &'static str,
    pub failure: &'static str,
}

impl Operation {
    /// Wraps `result` in the envelope and logs the request outcome.
    pub(crate) fn respond<T>(
        self,
        started: Instant,
        result: Result<T, ApiError>,
    ) -> NetworkResponse<T> {
        let elapsed_ms = started.elapsed().as_millis();
        match result {
            Ok(data) => {
                info!(
                    "event=http_request module=api status=ok operation={} elapsed_ms={}",
                    self.name, elapsed_ms
                );
                NetworkResponse::success(self.success, data)
            }
            Err(err) => {
                let detail = sanitize_message(&err.detail, MAX_ERROR_LOG_CHARS);
                if err.kind == ErrorKind::Internal {
                    error!(
                        "event=http_request module=api status=error operation={} kind={} elapsed_ms={} error={}",
                        self.name,
                        err.kind.as_str(),
                        elapsed_ms,
                        detail
                    );
                } else {
                    warn!(
                        "event=http_request module=api status=error operation={} kind={} elapsed_ms={} error={}",
                        self.name,
                        err.kind.as_str(),
                        elapsed_ms,
                        detail
                    );
                }
                NetworkResponse::failure(self.failure, &err)
            }
        }
    }
}

/// Optional `page` / `per_page` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct MonumentNameBody {
    pub monument_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ConditionBody {
    pub condition: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportBody {
    pub monument_id: MonumentId,
    pub condition: String,
}

/// Paging fields shared by every list payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// Items on this page.
    pub total: usize,
    pub is_empty: bool,
    pub page: u32,
    pub per_page: u32,
    pub total_matching: u64,
}

impl<T> From<&PageResult<T>> for PageMeta {
    fn from(value: &PageResult<T>) -> Self {
        Self {
            total: value.total(),
            is_empty: value.is_empty(),
            page: value.page,
            per_page: value.per_page,
            total_matching: value.total_matching,
        }
    }
}

pub(crate) fn page_params(
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<PageParams, ApiError> {
    let Query(params) = query?;
    Ok(params)
}

pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let Json(body) = body?;
    Ok(body)
}
