mod support;

use monument_core::db::open_db_in_memory;
use monument_core::{
    Condition, MonumentId, MonumentRepository, MonumentService, ReportListQuery, ReportRepository,
    ReportService, ServiceError, SqliteMonumentRepository, SqliteReportRepository,
};
use rusqlite::Connection;
use support::new_monument;

fn register(conn: &mut Connection, name: &str, seed: u32) -> MonumentId {
    let mut repo = SqliteMonumentRepository::try_new(conn).unwrap();
    repo.create_monument(&new_monument(name, seed)).unwrap()
}

#[test]
fn created_report_is_open_and_embeds_its_monument() {
    let mut conn = open_db_in_memory().unwrap();
    let monument_id = register(&mut conn, "TSM 1", 1);
    let mut service = ReportService::new(SqliteReportRepository::try_new(&mut conn).unwrap());

    let report = service.create_report(monument_id, "MISSING").unwrap();

    assert_eq!(report.monument_id, monument_id);
    assert_eq!(report.condition, "MISSING");
    assert!(!report.is_resolved);
    assert_eq!(report.monument.id, monument_id);
    assert_eq!(report.monument.monument_name, "TSM 1");

    let listed = service.list_reports(None, None).unwrap();
    assert_eq!(listed.items, vec![report]);
    assert_eq!(listed.total_matching, 1);
}

#[test]
fn reporting_leaves_monument_condition_untouched() {
    let mut conn = open_db_in_memory().unwrap();
    let monument_id = register(&mut conn, "TSM 1", 1);
    {
        let mut service =
            ReportService::new(SqliteReportRepository::try_new(&mut conn).unwrap());
        service.create_report(monument_id, "DAMAGED").unwrap();
    }

    let monuments = MonumentService::new(SqliteMonumentRepository::try_new(&mut conn).unwrap());
    assert_eq!(
        monuments.get_monument(monument_id).unwrap().condition,
        Condition::Good
    );
}

#[test]
fn report_for_unknown_monument_is_not_found_and_not_stored() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = ReportService::new(SqliteReportRepository::try_new(&mut conn).unwrap());

    let err = service.create_report(77, "MISSING").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(77)));
    assert!(service.list_reports(None, None).unwrap().is_empty());
}

#[test]
fn duplicate_reports_are_accepted() {
    let mut conn = open_db_in_memory().unwrap();
    let monument_id = register(&mut conn, "TSM 1", 1);
    let mut service = ReportService::new(SqliteReportRepository::try_new(&mut conn).unwrap());

    let first = service.create_report(monument_id, "DAMAGED").unwrap();
    let second = service.create_report(monument_id, "DAMAGED").unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(service.reports_for_monument(monument_id).unwrap().len(), 2);
}

#[test]
fn resolve_closes_every_open_report_and_sets_condition() {
    let mut conn = open_db_in_memory().unwrap();
    let monument_id = register(&mut conn, "TSM 1", 1);
    let other_id = register(&mut conn, "TSM 2", 2);
    let mut service = ReportService::new(SqliteReportRepository::try_new(&mut conn).unwrap());

    service.create_report(monument_id, "MISSING").unwrap();
    service.create_report(monument_id, "GOOD").unwrap();
    let untouched = service.create_report(other_id, "DAMAGED").unwrap();

    let resolved = service.resolve_reports(monument_id, "DAMAGED").unwrap();
    assert_eq!(resolved, 2);

    let reports = service.reports_for_monument(monument_id).unwrap();
    assert!(reports.iter().all(|report| report.is_resolved));
    assert!(reports
        .iter()
        .all(|report| report.monument.condition == Condition::Damaged));

    let others = service.reports_for_monument(other_id).unwrap();
    assert_eq!(others, vec![untouched]);
}

#[test]
fn resolve_count_excludes_already_resolved_reports() {
    let mut conn = open_db_in_memory().unwrap();
    let monument_id = register(&mut conn, "TSM 1", 1);
    let mut service = ReportService::new(SqliteReportRepository::try_new(&mut conn).unwrap());

    service.create_report(monument_id, "MISSING").unwrap();
    assert_eq!(service.resolve_reports(monument_id, "MISSING").unwrap(), 1);

    service.create_report(monument_id, "GOOD").unwrap();
    assert_eq!(service.resolve_reports(monument_id, "GOOD").unwrap(), 1);
    assert_eq!(service.resolve_reports(monument_id, "GOOD").unwrap(), 0);
}

#[test]
fn resolve_without_open_reports_still_updates_condition() {
    let mut conn = open_db_in_memory().unwrap();
    let monument_id = register(&mut conn, "TSM 1", 1);
    {
        let mut service =
            ReportService::new(SqliteReportRepository::try_new(&mut conn).unwrap());
        assert_eq!(service.resolve_reports(monument_id, "MISSING").unwrap(), 0);
    }

    let monuments = MonumentService::new(SqliteMonumentRepository::try_new(&mut conn).unwrap());
    assert_eq!(
        monuments.get_monument(monument_id).unwrap().condition,
        Condition::Missing
    );
}

#[test]
fn resolve_for_unknown_monument_is_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = ReportService::new(SqliteReportRepository::try_new(&mut conn).unwrap());

    let err = service.resolve_reports(5, "GOOD").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(5)));
}

#[test]
fn open_reports_are_listed_before_resolved_ones() {
    let mut conn = open_db_in_memory().unwrap();
    let resolved_monument = register(&mut conn, "TSM 1", 1);
    let open_monument = register(&mut conn, "TSM 2", 2);
    let mut service = ReportService::new(SqliteReportRepository::try_new(&mut conn).unwrap());

    service.create_report(resolved_monument, "MISSING").unwrap();
    service.create_report(resolved_monument, "DAMAGED").unwrap();
    service.resolve_reports(resolved_monument, "MISSING").unwrap();
    let open = service.create_report(open_monument, "DAMAGED").unwrap();

    let listed = service.list_reports(None, None).unwrap();
    assert_eq!(listed.total(), 3);
    assert_eq!(listed.items[0].id, open.id);
    assert!(listed.items[1..].iter().all(|report| report.is_resolved));
    assert!(listed.items[1].id < listed.items[2].id);
}

#[test]
fn list_reports_is_paginated() {
    let mut conn = open_db_in_memory().unwrap();
    let monument_id = register(&mut conn, "TSM 1", 1);
    let mut service = ReportService::new(SqliteReportRepository::try_new(&mut conn).unwrap());
    for _ in 0..5 {
        service.create_report(monument_id, "DAMAGED").unwrap();
    }

    let second = service.list_reports(Some(1), Some(2)).unwrap();
    assert_eq!(second.total(), 2);
    assert_eq!(second.total_matching, 5);

    let beyond = service.list_reports(Some(9), Some(2)).unwrap();
    assert!(beyond.is_empty());
}

#[test]
fn search_matches_monument_name_and_returns_every_match() {
    let mut conn = open_db_in_memory().unwrap();
    let target = register(&mut conn, "GAUSS-PT-14", 1);
    let other = register(&mut conn, "TSM 22", 2);
    let mut service = ReportService::new(SqliteReportRepository::try_new(&mut conn).unwrap());
    for _ in 0..3 {
        service.create_report(target, "DAMAGED").unwrap();
    }
    service.create_report(other, "MISSING").unwrap();

    let found = service.search_reports("gauss", Some(0), Some(1)).unwrap();
    assert_eq!(found.total(), 3);
    assert_eq!(found.total_matching, 3);
    assert_eq!(found.page, 0);
    assert_eq!(found.per_page, 1);
    assert!(found.items.iter().all(|report| report.monument_id == target));
}

#[test]
fn reports_for_unknown_monument_is_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let service = ReportService::new(SqliteReportRepository::try_new(&mut conn).unwrap());

    let err = service.reports_for_monument(3).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(3)));
}

#[test]
fn repository_counts_follow_filters() {
    let mut conn = open_db_in_memory().unwrap();
    let first = register(&mut conn, "TSM 1", 1);
    let second = register(&mut conn, "BM 2", 2);
    let mut repo = SqliteReportRepository::try_new(&mut conn).unwrap();
    repo.create_report(first, "DAMAGED").unwrap();
    repo.create_report(first, "MISSING").unwrap();
    repo.create_report(second, "GOOD").unwrap();

    assert_eq!(repo.count_reports(&ReportListQuery::default()).unwrap(), 3);
    let by_monument = ReportListQuery {
        monument_id: Some(first),
        ..ReportListQuery::default()
    };
    assert_eq!(repo.count_reports(&by_monument).unwrap(), 2);
    let by_name = ReportListQuery {
        monument_name_contains: Some("bm".to_string()),
        ..ReportListQuery::default()
    };
    assert_eq!(repo.count_reports(&by_name).unwrap(), 1);
}
