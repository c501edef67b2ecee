//! Integration tests for the SQLite repositories, exercised through the
//! core services over temporary databases.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use centsible_core::errors::Error;
use centsible_core::goals::{GoalService, GoalServiceTrait, GoalStatus, NewGoal};
use centsible_core::learning::{
    ContentType, LearningRepositoryTrait, LearningService, LearningServiceTrait, NewCourse,
    NewLesson,
};
use centsible_core::transactions::{
    NewTransaction, TransactionError, TransactionFilters, TransactionKind, TransactionService,
    TransactionServiceTrait,
};
use centsible_storage_sqlite::goals::GoalRepository;
use centsible_storage_sqlite::learning::LearningRepository;
use centsible_storage_sqlite::transactions::TransactionRepository;
use centsible_storage_sqlite::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbPool, WriteHandle,
};

const USER: &str = "user-1";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup() -> (tempfile::TempDir, Arc<DbPool>, WriteHandle) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = init(dir.path().to_str().unwrap()).unwrap();
    let pool = create_pool(&db_path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer((*pool).clone());
    (dir, pool, writer)
}

fn new_transaction(kind: TransactionKind, amount: i64, on: NaiveDate) -> NewTransaction {
    NewTransaction {
        id: None,
        user_id: USER.to_string(),
        kind,
        amount,
        category: "General".to_string(),
        date: on,
        notes: None,
    }
}

#[tokio::test]
async fn test_transaction_stats_roundtrip() {
    let (_dir, pool, writer) = setup();
    let service = TransactionService::new(Arc::new(TransactionRepository::new(pool, writer)));

    for (kind, amount, on) in [
        (TransactionKind::Income, 10_000, date(2024, 1, 15)),
        (TransactionKind::Expense, 4_000, date(2024, 1, 20)),
        (TransactionKind::Income, 5_000, date(2024, 2, 1)),
    ] {
        service
            .create_transaction(new_transaction(kind, amount, on))
            .await
            .unwrap();
    }

    let stats = service.get_transaction_stats(USER, None, None).unwrap();
    assert_eq!(stats.total_income, dec!(150.00));
    assert_eq!(stats.total_expenses, dec!(40.00));
    assert_eq!(stats.net_balance, dec!(110.00));
    assert_eq!(stats.monthly_trends.len(), 2);
    assert_eq!(stats.monthly_trends[0].month, "2024-01");
    assert_eq!(stats.monthly_trends[1].month, "2024-02");

    // Inclusive date window
    let january = service
        .get_transaction_stats(USER, Some(date(2024, 1, 1)), Some(date(2024, 1, 31)))
        .unwrap();
    assert_eq!(january.total_income, dec!(100.00));
    assert_eq!(january.total_expenses, dec!(40.00));

    // Another user sees nothing
    let empty = service.get_transaction_stats("user-2", None, None).unwrap();
    assert_eq!(empty.total_income, dec!(0));
    assert!(empty.monthly_trends.is_empty());
}

#[tokio::test]
async fn test_create_transaction_rejects_invalid_amount() {
    let (_dir, pool, writer) = setup();
    let service = TransactionService::new(Arc::new(TransactionRepository::new(pool, writer)));

    let result = service
        .create_transaction(new_transaction(
            TransactionKind::Expense,
            0,
            date(2024, 1, 1),
        ))
        .await;
    assert!(matches!(
        result,
        Err(Error::Transaction(TransactionError::InvalidData(_)))
    ));
}

#[tokio::test]
async fn test_search_transactions_filters_and_paginates() {
    let (_dir, pool, writer) = setup();
    let service = TransactionService::new(Arc::new(TransactionRepository::new(pool, writer)));

    for (kind, amount, on) in [
        (TransactionKind::Income, 10_000, date(2024, 3, 1)),
        (TransactionKind::Expense, 2_000, date(2024, 3, 2)),
        (TransactionKind::Expense, 3_000, date(2024, 3, 3)),
    ] {
        service
            .create_transaction(new_transaction(kind, amount, on))
            .await
            .unwrap();
    }

    let page = service
        .search_transactions(USER, 1, 2, TransactionFilters::default(), None)
        .unwrap();
    assert_eq!(page.meta.total_row_count, 3);
    assert_eq!(page.data.len(), 2);
    // Default order is date descending
    assert_eq!(page.data[0].date, date(2024, 3, 3));

    let second_page = service
        .search_transactions(USER, 2, 2, TransactionFilters::default(), None)
        .unwrap();
    assert_eq!(second_page.data.len(), 1);

    let expenses_only = service
        .search_transactions(
            USER,
            1,
            10,
            TransactionFilters {
                kind: Some(TransactionKind::Expense),
                ..Default::default()
            },
            None,
        )
        .unwrap();
    assert_eq!(expenses_only.meta.total_row_count, 2);
}

#[tokio::test]
async fn test_unknown_kind_rejected_at_boundary() {
    use diesel::prelude::*;

    let (_dir, pool, writer) = setup();
    let service =
        TransactionService::new(Arc::new(TransactionRepository::new(pool.clone(), writer)));

    let mut conn = get_connection(&pool).unwrap();
    diesel::sql_query(
        "INSERT INTO transactions (id, user_id, kind, amount, category, transaction_date)
         VALUES ('t-bad', 'user-1', 'TRANSFER', 100, 'Misc', '2024-01-01')",
    )
    .execute(&mut conn)
    .unwrap();

    let result = service.get_transactions(USER);
    assert!(matches!(
        result,
        Err(Error::Transaction(TransactionError::UnknownKind(_)))
    ));
}

#[tokio::test]
async fn test_goal_contribution_completes_goal() {
    let (_dir, pool, writer) = setup();
    let service = GoalService::new(Arc::new(GoalRepository::new(pool, writer)));

    let goal = service
        .create_goal(NewGoal {
            id: None,
            user_id: USER.to_string(),
            title: "Laptop".to_string(),
            target_amount: 50_000,
            deadline: None,
        })
        .await
        .unwrap();
    assert_eq!(goal.status, GoalStatus::Active);
    assert_eq!(goal.saved_amount, 0);

    let partial = service.add_contribution(USER, &goal.id, 10_000).await.unwrap();
    assert_eq!(partial.saved_amount, 10_000);
    assert_eq!(partial.status, GoalStatus::Active);
    assert_eq!(partial.progress(), dec!(20));

    let completed = service.add_contribution(USER, &goal.id, 40_000).await.unwrap();
    assert_eq!(completed.status, GoalStatus::Completed);
    assert_eq!(completed.progress(), dec!(100));

    let stats = service.get_goal_stats(USER).unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.total_saved_amount, dec!(500.00));
}

#[tokio::test]
async fn test_lesson_completion_updates_course_progress() {
    let (_dir, pool, writer) = setup();
    let repository = Arc::new(LearningRepository::new(pool, writer));
    let service = LearningService::new(repository.clone());

    let course = service
        .create_course(NewCourse {
            id: None,
            instructor_id: "instructor-1".to_string(),
            title: "Personal Finance 101".to_string(),
            description: "Basics of budgeting and saving".to_string(),
            price: None,
            thumbnail: None,
        })
        .await
        .unwrap();

    let mut lesson_ids = Vec::new();
    for (index, title) in ["Budgeting Basics", "Saving Strategies"].iter().enumerate() {
        let lesson = service
            .create_lesson(
                "instructor-1",
                NewLesson {
                    id: None,
                    course_id: course.id.clone(),
                    title: title.to_string(),
                    content_type: ContentType::Text,
                    content_ref: format!("https://example.com/lesson-{index}"),
                    order_index: index as i32,
                    duration_minutes: Some(10),
                },
            )
            .await
            .unwrap();
        lesson_ids.push(lesson.id);
    }

    service.enroll("student-1", &course.id).await.unwrap();

    service
        .mark_lesson_complete("student-1", &lesson_ids[0])
        .await
        .unwrap();
    let progress = service.get_course_progress("student-1", 5).unwrap();
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].progress, 50);

    service
        .mark_lesson_complete("student-1", &lesson_ids[1])
        .await
        .unwrap();
    // Completing the same lesson again changes nothing
    service
        .mark_lesson_complete("student-1", &lesson_ids[1])
        .await
        .unwrap();

    let progress = service.get_course_progress("student-1", 5).unwrap();
    assert_eq!(progress[0].progress, 100);

    let enrollment = repository
        .get_enrollment("student-1", &course.id)
        .unwrap()
        .unwrap();
    assert!(enrollment.completed_at.is_some());
}

#[tokio::test]
async fn test_course_mutations_require_owner() {
    let (_dir, pool, writer) = setup();
    let service = LearningService::new(Arc::new(LearningRepository::new(pool, writer)));

    let course = service
        .create_course(NewCourse {
            id: None,
            instructor_id: "instructor-1".to_string(),
            title: "Personal Finance 101".to_string(),
            description: "Basics".to_string(),
            price: Some(4_999),
            thumbnail: None,
        })
        .await
        .unwrap();

    let result = service.delete_course("instructor-2", &course.id).await;
    assert!(matches!(result, Err(Error::Learning(_))));

    let deleted = service
        .delete_course("instructor-1", &course.id)
        .await
        .unwrap();
    assert_eq!(deleted, 1);
}
