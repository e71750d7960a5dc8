use super::{
    json_body, page_params, ConditionBody, MonumentNameBody, Operation, PageMeta, PageParams,
};
use crate::envelope::NetworkResponse;
use crate::server::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use monument_core::{
    Monument, MonumentId, MonumentService, PageResult, SqliteMonumentRepository,
};
use serde::Serialize;
use std::time::Instant;

const LIST_MONUMENTS: Operation = Operation {
    name: "list_monuments",
    success: "Monuments Retrieved!",
    failure: "Failed to get monuments",
};
const SEARCH_MONUMENTS: Operation = Operation {
    name: "search_monuments",
    success: "Monuments Retrieved!",
    failure: "Failed to search monuments",
};
const GET_MONUMENT: Operation = Operation {
    name: "get_monument",
    success: "Monument Retrieved!",
    failure: "Failed to get monument",
};
const UPDATE_CONDITION: Operation = Operation {
    name: "update_monument_condition",
    success: "Monument Updated!",
    failure: "Failed to update monument",
};

#[derive(Debug, Serialize)]
pub struct MonumentPage {
    pub monuments: Vec<Monument>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

impl From<PageResult<Monument>> for MonumentPage {
    fn from(value: PageResult<Monument>) -> Self {
        let meta = PageMeta::from(&value);
        Self {
            monuments: value.items,
            meta,
        }
    }
}

pub async fn list_monuments(
    State(state): State<AppState>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> NetworkResponse<MonumentPage> {
    let started = Instant::now();
    let result = async move {
        let params = page_params(query)?;
        state
            .with_session(move |conn| {
                let service = MonumentService::new(SqliteMonumentRepository::try_new(conn)?);
                let page = service.list_monuments(params.page, params.per_page)?;
                Ok(MonumentPage::from(page))
            })
            .await
    }
    .await;
    LIST_MONUMENTS.respond(started, result)
}

/// Name search; the query travels in a JSON body even though this is a GET.
pub async fn search_monuments(
    State(state): State<AppState>,
    query: Result<Query<PageParams>, QueryRejection>,
    body: Result<Json<MonumentNameBody>, JsonRejection>,
) -> NetworkResponse<MonumentPage> {
    let started = Instant::now();
    let result = async move {
        let params = page_params(query)?;
        let body = json_body(body)?;
        state
            .with_session(move |conn| {
                let service = MonumentService::new(SqliteMonumentRepository::try_new(conn)?);
                let page =
                    service.search_monuments(&body.monument_name, params.page, params.per_page)?;
                Ok(MonumentPage::from(page))
            })
            .await
    }
    .await;
    SEARCH_MONUMENTS.respond(started, result)
}

pub async fn get_monument(
    State(state): State<AppState>,
    id: Result<Path<MonumentId>, PathRejection>,
) -> NetworkResponse<Monument> {
    let started = Instant::now();
    let result = async move {
        let Path(id) = id?;
        state
            .with_session(move |conn| {
                let service = MonumentService::new(SqliteMonumentRepository::try_new(conn)?);
                Ok(service.get_monument(id)?)
            })
            .await
    }
    .await;
    GET_MONUMENT.respond(started, result)
}

pub async fn update_condition(
    State(state): State<AppState>,
    id: Result<Path<MonumentId>, PathRejection>,
    body: Result<Json<ConditionBody>, JsonRejection>,
) -> NetworkResponse<Monument> {
    let started = Instant::now();
    let result = async move {
        let Path(id) = id?;
        let body = json_body(body)?;
        state
            .with_session(move |conn| {
                let service = MonumentService::new(SqliteMonumentRepository::try_new(conn)?);
                Ok(service.update_condition(id, body.condition)?)
            })
            .await
    }
    .await;
    UPDATE_CONDITION.respond(started, result)
}
