//! Use-case services for the registry and the report ledger.
//!
//! # Responsibility
//! - Apply pagination defaults and shape list results.
//! - Translate repository outcomes into the service error taxonomy.
//!
//! # Invariants
//! - Services never bypass repository contracts.
//! - Services stay storage-agnostic; they only see repository traits.

pub mod monument_service;
pub mod report_service;

use crate::model::monument::MonumentId;
use crate::repo::{PageRequest, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_PAGE: u32 = 0;
pub const DEFAULT_PER_PAGE: u32 = 10;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error taxonomy shared by all registry use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Referenced monument does not exist.
    NotFound(MonumentId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// A write succeeded but its read-back did not.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "monument not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent registry state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// One page of results plus the size of the full matching set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    /// Matches across all pages.
    pub total_matching: u64,
}

impl<T> PageResult<T> {
    /// Number of items on this page.
    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Resolves optional caller pagination to a concrete page (`0`, `10` by default).
pub fn page_request(page: Option<u32>, per_page: Option<u32>) -> PageRequest {
    PageRequest::new(
        page.unwrap_or(DEFAULT_PAGE),
        per_page.unwrap_or(DEFAULT_PER_PAGE),
    )
}

#[cfg(test)]
mod tests {
    use super::{page_request, ServiceError};
    use crate::repo::{PageRequest, RepoError};

    #[test]
    fn page_request_defaults_to_first_page_of_ten() {
        assert_eq!(page_request(None, None), PageRequest::new(0, 10));
        assert_eq!(page_request(Some(2), None), PageRequest::new(2, 10));
        assert_eq!(page_request(None, Some(0)), PageRequest::new(0, 0));
    }

    #[test]
    fn repo_not_found_becomes_service_not_found() {
        let err = ServiceError::from(RepoError::NotFound(9));
        assert!(matches!(err, ServiceError::NotFound(9)));
    }
}
