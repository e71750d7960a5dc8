//! Core domain logic for the geodetic monument registry.
//! This crate is the single source of truth for registry invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::condition::Condition;
pub use model::coordinates::{
    CoordinateId, CoordinateRecord, CoordinateSet, Delta, Gauss, Utm, Wgs84,
};
pub use model::monument::{Monument, MonumentId, NewMonument};
pub use model::report::{Report, ReportId};
pub use repo::monument_repo::{MonumentListQuery, MonumentRepository, SqliteMonumentRepository};
pub use repo::report_repo::{ReportListQuery, ReportRepository, SqliteReportRepository};
pub use repo::{PageRequest, RepoError, RepoResult};
pub use seed::{load_survey_rows, parse_survey_rows, seed_monuments, SeedError, SurveyRow};
pub use service::monument_service::MonumentService;
pub use service::report_service::ReportService;
pub use service::{PageResult, ServiceError, ServiceResult, DEFAULT_PAGE, DEFAULT_PER_PAGE};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
