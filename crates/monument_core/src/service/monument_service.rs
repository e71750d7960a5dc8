//! Monument registry use-cases.
//!
//! # Invariants
//! - Condition updates touch only `condition`; coordinates are immutable.
//! - Any condition text is accepted; see `Condition::Other`.

use crate::model::condition::Condition;
use crate::model::monument::{Monument, MonumentId, NewMonument};
use crate::repo::monument_repo::{MonumentListQuery, MonumentRepository};
use crate::service::{page_request, PageResult, ServiceError, ServiceResult};
use log::info;

/// Registry facade over a monument repository.
pub struct MonumentService<R: MonumentRepository> {
    repo: R,
}

impl<R: MonumentRepository> MonumentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists monuments by ascending id.
    pub fn list_monuments(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> ServiceResult<PageResult<Monument>> {
        self.page_of(None, page, per_page)
    }

    /// Lists monuments whose name contains `name_query`, ignoring ASCII case.
    ///
    /// Only ASCII letters fold: `ölberg` does not find `ÖLBERG 1`, while
    /// `Ölberg` does.
    pub fn search_monuments(
        &self,
        name_query: &str,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> ServiceResult<PageResult<Monument>> {
        self.page_of(Some(name_query), page, per_page)
    }

    pub fn get_monument(&self, id: MonumentId) -> ServiceResult<Monument> {
        self.repo.get_monument(id)?.ok_or(ServiceError::NotFound(id))
    }

    /// Sets the monument's condition and returns the hydrated result.
    pub fn update_condition(
        &self,
        id: MonumentId,
        condition: impl Into<Condition>,
    ) -> ServiceResult<Monument> {
        let condition = condition.into();
        self.repo.update_condition(id, &condition)?;
        info!(
            "event=monument_condition_update module=service status=ok monument_id={} canonical={}",
            id,
            condition.is_canonical()
        );

        self.repo
            .get_monument(id)?
            .ok_or(ServiceError::InconsistentState(
                "updated monument not found in read-back",
            ))
    }

    /// Registers a monument with its four coordinate records.
    pub fn register_monument(&mut self, monument: &NewMonument) -> ServiceResult<Monument> {
        let id = self.repo.create_monument(monument)?;
        self.repo
            .get_monument(id)?
            .ok_or(ServiceError::InconsistentState(
                "registered monument not found in read-back",
            ))
    }

    fn page_of(
        &self,
        name_query: Option<&str>,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> ServiceResult<PageResult<Monument>> {
        let request = page_request(page, per_page);
        let query = MonumentListQuery {
            name_contains: name_query.map(str::to_string),
            page: Some(request),
        };
        let items = self.repo.list_monuments(&query)?;
        let total_matching = self.repo.count_monuments(name_query)?;

        Ok(PageResult {
            items,
            page: request.page,
            per_page: request.per_page,
            total_matching,
        })
    }
}
