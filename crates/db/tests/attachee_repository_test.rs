//! Attachee repository tests against an in-memory SQLite database.

#![allow(clippy::similar_names)]

use attachee_core::aggregation::{AggregationService, DashboardSettings};
use attachee_core::attachee::{
    Attachee, AttacheeStore, CompletedFilter, CreateAttacheeInput, StoreError,
};
use attachee_core::clock::FixedClock;
use attachee_core::fiscal::{FiscalYear, PeriodSelection, Quarter, RangeResolver};
use attachee_core::status::{AttacheeStatus, StatusService};
use attachee_db::entities::attachees;
use attachee_db::{AttacheeRepository, DepartmentRepository, Migrator};
use attachee_shared::types::{AttacheeId, DepartmentId};
use chrono::NaiveDate;
use futures::future::join_all;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use sea_orm_migration::MigratorTrait;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn setup() -> DatabaseConnection {
    let db = attachee_db::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

fn input(
    department: DepartmentId,
    name: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> CreateAttacheeInput {
    CreateAttacheeInput {
        department_id: department,
        first_name: name.to_string(),
        last_name: "Kamau".to_string(),
        school: Some("University of Nairobi".to_string()),
        start_date: start,
        end_date: end,
        ..CreateAttacheeInput::default()
    }
}

#[tokio::test]
async fn test_create_derives_status_and_fiscal_year() {
    let db = setup().await;
    let departments = DepartmentRepository::new(db.clone());
    let repo = AttacheeRepository::new(db);
    let ict = departments.create("ICT", Some(5)).await.unwrap();

    let created = repo
        .create(
            input(ict.id, "Wanjiku", date(2023, 11, 15), date(2024, 2, 15)),
            &FixedClock::new(date(2023, 11, 1)),
        )
        .await
        .unwrap();

    assert_eq!(created.status, AttacheeStatus::Active);
    assert_eq!(created.fiscal_year.unwrap().label(), "2023-2024");

    let loaded = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(loaded.fiscal_year, created.fiscal_year);
    assert_eq!(loaded.start_date, date(2023, 11, 15));
    assert_eq!(loaded.school.as_deref(), Some("University of Nairobi"));
    assert_eq!(loaded.created_at.date_naive(), date(2023, 11, 1));
}

#[tokio::test]
async fn test_create_rejects_unknown_department_and_bad_label() {
    let db = setup().await;
    let departments = DepartmentRepository::new(db.clone());
    let repo = AttacheeRepository::new(db);

    let clock = FixedClock::new(date(2024, 1, 1));

    let missing = DepartmentId::new();
    let result = repo
        .create(input(missing, "Otieno", date(2024, 1, 8), date(2024, 4, 8)), &clock)
        .await;
    assert!(matches!(result, Err(StoreError::DepartmentNotFound(id)) if id == missing));

    let hr = departments.create("Human Resources", None).await.unwrap();
    let mut bad = input(hr.id, "Otieno", date(2024, 1, 8), date(2024, 4, 8));
    bad.fiscal_year = Some("2023-2025".to_string());
    assert!(matches!(
        repo.create(bad, &clock).await,
        Err(StoreError::Invalid(_))
    ));
}

#[tokio::test]
async fn test_find_in_range_uses_overlap() {
    let db = setup().await;
    let departments = DepartmentRepository::new(db.clone());
    let repo = AttacheeRepository::new(db);
    let ict = departments.create("ICT", None).await.unwrap();
    let finance = departments.create("Finance", None).await.unwrap();
    let today = FixedClock::new(date(2023, 7, 1));

    // spans Q1 into Q2
    repo.create(input(ict.id, "A", date(2023, 9, 1), date(2023, 10, 31)), &today)
        .await
        .unwrap();
    repo.create(input(ict.id, "B", date(2024, 1, 8), date(2024, 3, 29)), &today)
        .await
        .unwrap();
    repo.create(input(finance.id, "C", date(2023, 12, 31), date(2024, 1, 5)), &today)
        .await
        .unwrap();

    let q2 = RangeResolver::resolve("2023-2024", "2").unwrap();
    let in_q2 = repo.find_in_range(q2, None).await.unwrap();
    let names: Vec<&str> = in_q2.iter().map(|a| a.first_name.as_str()).collect();
    assert_eq!(names, ["A", "C"]);

    let ict_q2 = repo.find_in_range(q2, Some(ict.id)).await.unwrap();
    assert_eq!(ict_q2.len(), 1);

    let fy = FiscalYear::starting(2023).unwrap();
    assert_eq!(repo.find_by_fiscal_year(fy, None).await.unwrap().len(), 3);
    assert_eq!(
        repo.find_by_fiscal_year(fy, Some(finance.id)).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn test_reconcile_is_idempotent_and_monotonic() {
    let db = setup().await;
    let departments = DepartmentRepository::new(db.clone());
    let repo = AttacheeRepository::new(db);
    let ict = departments.create("ICT", None).await.unwrap();
    let created_on = FixedClock::new(date(2024, 1, 2));

    let due = repo
        .create(input(ict.id, "Due", date(2024, 1, 8), date(2024, 3, 1)), &created_on)
        .await
        .unwrap();
    let running = repo
        .create(input(ict.id, "Running", date(2024, 1, 8), date(2024, 3, 2)), &created_on)
        .await
        .unwrap();

    let clock = FixedClock::new(date(2024, 3, 1));
    assert_eq!(StatusService::reconcile_today(&repo, &clock).await.unwrap(), 1);
    assert_eq!(StatusService::reconcile_today(&repo, &clock).await.unwrap(), 0);

    let due = repo.find_by_id(due.id).await.unwrap().unwrap();
    let running = repo.find_by_id(running.id).await.unwrap().unwrap();
    assert_eq!(due.status, AttacheeStatus::Completed);
    assert_eq!(running.status, AttacheeStatus::Active);

    // An earlier date never reactivates anything.
    assert_eq!(StatusService::reconcile(&repo, date(2023, 1, 1)).await.unwrap(), 0);
    let due = repo.find_by_id(due.id).await.unwrap().unwrap();
    assert_eq!(due.status, AttacheeStatus::Completed);
}

#[tokio::test]
async fn test_reconcile_department_scope() {
    let db = setup().await;
    let departments = DepartmentRepository::new(db.clone());
    let repo = AttacheeRepository::new(db);
    let ict = departments.create("ICT", None).await.unwrap();
    let finance = departments.create("Finance", None).await.unwrap();
    let created_on = FixedClock::new(date(2024, 1, 2));

    repo.create(input(ict.id, "A", date(2024, 1, 8), date(2024, 2, 9)), &created_on)
        .await
        .unwrap();
    repo.create(input(finance.id, "B", date(2024, 1, 8), date(2024, 2, 9)), &created_on)
        .await
        .unwrap();

    let as_of = date(2024, 3, 1);
    assert_eq!(
        StatusService::reconcile_department(&repo, finance.id, as_of)
            .await
            .unwrap(),
        1
    );
    assert_eq!(StatusService::reconcile(&repo, as_of).await.unwrap(), 1);
}

#[tokio::test]
async fn test_concurrent_reconcile_updates_each_row_once() {
    let db = setup().await;
    let departments = DepartmentRepository::new(db.clone());
    let repo = AttacheeRepository::new(db);
    let ict = departments.create("ICT", None).await.unwrap();

    for i in 0..10 {
        repo.create(
            input(ict.id, &format!("Attachee {i}"), date(2024, 1, 8), date(2024, 2, 9)),
            &FixedClock::new(date(2024, 1, 2)),
        )
        .await
        .unwrap();
    }

    let as_of = date(2024, 3, 1);
    let results = join_all((0..4).map(|_| StatusService::reconcile(&repo, as_of))).await;
    let total: u64 = results.into_iter().map(Result::unwrap).sum();

    assert_eq!(total, 10);
    assert_eq!(StatusService::reconcile(&repo, as_of).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unreadable_stored_label_reads_as_absent() {
    let db = setup().await;
    let departments = DepartmentRepository::new(db.clone());
    let repo = AttacheeRepository::new(db.clone());
    let ict = departments.create("ICT", None).await.unwrap();

    let created = repo
        .create(
            input(ict.id, "Legacy", date(2023, 8, 1), date(2023, 11, 1)),
            &FixedClock::new(date(2023, 8, 1)),
        )
        .await
        .unwrap();

    // Older rows were written as "YYYY/YYYY".
    let model = attachees::Entity::find_by_id(created.id.into_inner())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let mut active: attachees::ActiveModel = model.into();
    active.fiscal_year = Set(Some("2023/2024".to_string()));
    active.update(&db).await.unwrap();

    let loaded = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(loaded.fiscal_year, None);

    let fy = FiscalYear::starting(2023).unwrap();
    assert!(repo.find_by_fiscal_year(fy, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_recent_and_delete() {
    let db = setup().await;
    let departments = DepartmentRepository::new(db.clone());
    let repo = AttacheeRepository::new(db);
    let ict = departments.create("ICT", None).await.unwrap();
    let mut ids = Vec::new();
    for i in 0..4 {
        // One creation day per record so created_at orders them.
        let clock = FixedClock::new(date(2023, 7, 1 + i));
        let created = repo
            .create(
                input(ict.id, &format!("R{i}"), date(2023, 8, 1), date(2023, 12, 1)),
                &clock,
            )
            .await
            .unwrap();
        ids.push(created.id);
    }

    let fy = FiscalYear::starting(2023).unwrap().range();
    let recent = repo.recent(fy, 2).await.unwrap();
    let names: Vec<&str> = recent.iter().map(|a| a.first_name.as_str()).collect();
    assert_eq!(names, ["R3", "R2"]);

    repo.delete(ids[3]).await.unwrap();
    assert!(repo.find_by_id(ids[3]).await.unwrap().is_none());
    assert!(matches!(
        repo.delete(ids[3]).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        repo.delete(AttacheeId::new()).await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_find_completed_applies_report_filters() {
    let db = setup().await;
    let departments = DepartmentRepository::new(db.clone());
    let repo = AttacheeRepository::new(db);
    let ict = departments.create("ICT", None).await.unwrap();
    let finance = departments.create("Finance", None).await.unwrap();
    let clock = FixedClock::new(date(2024, 8, 1));

    let placed = |department: DepartmentId, name: &str, end: NaiveDate, school: &str| {
        let mut record = input(department, name, end - chrono::Duration::days(90), end);
        record.school = Some(school.to_string());
        record.location_slot = Some(format!("Block {name}, Desk 1"));
        record
    };
    let rows = [
        placed(ict.id, "A", date(2023, 11, 30), "Moi University"),
        placed(ict.id, "B", date(2024, 2, 15), "Moi University"),
        placed(finance.id, "C", date(2024, 3, 31), "Kenyatta University"),
        placed(ict.id, "D", date(2022, 2, 10), "Moi University"),
        placed(ict.id, "E", date(2024, 12, 20), "Moi University"),
    ];
    for row in rows {
        repo.create(row, &clock).await.unwrap();
    }

    let names = |records: Vec<Attachee>| {
        records.into_iter().map(|a| a.first_name).collect::<Vec<_>>()
    };

    // E is still active; latest end date first.
    let all = repo.find_completed(CompletedFilter::default()).await.unwrap();
    assert_eq!(names(all), ["C", "B", "A", "D"]);

    let fy = FiscalYear::starting(2023).unwrap();
    let in_year = CompletedFilter {
        fiscal_year: Some(fy),
        ..CompletedFilter::default()
    };
    assert_eq!(names(repo.find_completed(in_year).await.unwrap()), ["C", "B", "A"]);

    let third_quarter = CompletedFilter {
        fiscal_year: Some(fy),
        quarter: Some(Quarter::Q3),
        department: Some(ict.id),
        ..CompletedFilter::default()
    };
    assert_eq!(names(repo.find_completed(third_quarter).await.unwrap()), ["B"]);

    // Quarter alone matches the end-date month in any year.
    let any_year_q3 = CompletedFilter {
        quarter: Some(Quarter::Q3),
        ..CompletedFilter::default()
    };
    assert_eq!(names(repo.find_completed(any_year_q3).await.unwrap()), ["C", "B", "D"]);

    let by_school_and_desk = CompletedFilter {
        school: Some("Kenyatta University".to_string()),
        location: Some("Block C".to_string()),
        ..CompletedFilter::default()
    };
    assert_eq!(names(repo.find_completed(by_school_and_desk).await.unwrap()), ["C"]);

    let blank = CompletedFilter {
        school: Some(String::new()),
        location: Some(String::new()),
        ..CompletedFilter::default()
    };
    assert_eq!(repo.find_completed(blank).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_departments_listed_by_name() {
    let db = setup().await;
    let departments = DepartmentRepository::new(db);

    let hr = departments.create("Human Resources", Some(4)).await.unwrap();
    departments.create("Finance", None).await.unwrap();
    departments.create("ICT", Some(12)).await.unwrap();

    let names: Vec<String> = departments
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, ["Finance", "Human Resources", "ICT"]);

    let loaded = departments.find_by_id(hr.id).await.unwrap().unwrap();
    assert_eq!(loaded.max_capacity, Some(4));
    assert!(departments.find_by_id(DepartmentId::new()).await.unwrap().is_none());
    assert!(departments.create("ICT", None).await.is_err());
}

#[tokio::test]
async fn test_dashboard_from_stored_records() {
    let db = setup().await;
    let departments = DepartmentRepository::new(db.clone());
    let repo = AttacheeRepository::new(db);
    let ict = departments.create("ICT", Some(2)).await.unwrap();
    let finance = departments.create("Finance", None).await.unwrap();
    let today = date(2023, 11, 20);
    let clock = FixedClock::new(today);

    repo.create(input(ict.id, "A", date(2023, 10, 2), date(2024, 1, 31)), &clock)
        .await
        .unwrap();
    repo.create(input(ict.id, "B", date(2023, 11, 6), date(2024, 2, 28)), &clock)
        .await
        .unwrap();
    repo.create(input(finance.id, "C", date(2023, 7, 3), date(2023, 10, 13)), &clock)
        .await
        .unwrap();

    StatusService::reconcile(&repo, today).await.unwrap();

    let selection = PeriodSelection::from_request(Some("2023-2024"), Some("2"), today).unwrap();
    let records = repo
        .find_in_range(selection.fiscal_year.range(), None)
        .await
        .unwrap();
    let all_departments = departments.list().await.unwrap();

    let dashboard = AggregationService::build_dashboard(
        &records,
        &all_departments,
        &selection,
        &DashboardSettings::default(),
    );

    assert_eq!(dashboard.totals.total, 3);
    assert_eq!(dashboard.totals.completed, 1);
    assert_eq!(dashboard.capacity_warnings.len(), 1);
    assert_eq!(dashboard.capacity_warnings[0].department_id, ict.id);
    assert_eq!(dashboard.capacity_warnings[0].utilization_percent, dec!(100.00));
    assert_eq!(dashboard.quarterly[&Quarter::Q1], 1);
    assert_eq!(dashboard.quarterly[&Quarter::Q2], 3);
}
