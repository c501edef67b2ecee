//! Tests for the dashboard service: window comparison, threshold insights,
//! and the merged summary payload. Repositories are in-memory fixtures
//! supplied through the storage traits.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use std::sync::Arc;

use crate::dashboard::{DashboardService, DashboardServiceTrait, InsightKind};
use crate::errors::Result;
use crate::goals::{
    Goal, GoalRepositoryTrait, GoalService, GoalStatus, GoalUpdate, NewGoal,
};
use crate::learning::{
    Course, CourseProgressSummary, CourseUpdate, Enrollment, LearningRepositoryTrait,
    LearningService, Lesson, LessonCompletion, LessonUpdate, NewCourse, NewLesson,
};
use crate::transactions::{
    NewTransaction, Sort, Transaction, TransactionFilters, TransactionKind,
    TransactionRepositoryTrait, TransactionSearchResponse, TransactionService,
    TransactionUpdate,
};

// ==================== In-memory fixtures ====================

struct InMemoryTransactionRepository {
    transactions: Vec<Transaction>,
}

#[async_trait]
impl TransactionRepositoryTrait for InMemoryTransactionRepository {
    fn list_transactions(
        &self,
        user_id: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .filter(|t| date_from.map_or(true, |from| t.date >= from))
            .filter(|t| date_to.map_or(true, |to| t.date <= to))
            .cloned()
            .collect())
    }

    fn list_recent_transactions(&self, user_id: &str, limit: i64) -> Result<Vec<Transaction>> {
        let mut recent: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(limit as usize);
        Ok(recent)
    }

    fn search_transactions(
        &self,
        _user_id: &str,
        _page: i64,
        _page_size: i64,
        _filters: TransactionFilters,
        _sort: Option<Sort>,
    ) -> Result<TransactionSearchResponse> {
        unimplemented!("not exercised by dashboard tests")
    }

    fn get_transaction(&self, _user_id: &str, _transaction_id: &str) -> Result<Transaction> {
        unimplemented!("not exercised by dashboard tests")
    }

    async fn insert_new_transaction(
        &self,
        _new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        unimplemented!("not exercised by dashboard tests")
    }

    async fn update_transaction(
        &self,
        _transaction_update: TransactionUpdate,
    ) -> Result<Transaction> {
        unimplemented!("not exercised by dashboard tests")
    }

    async fn delete_transaction(&self, _user_id: &str, _transaction_id: &str) -> Result<usize> {
        unimplemented!("not exercised by dashboard tests")
    }
}

struct InMemoryGoalRepository {
    goals: Vec<Goal>,
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryGoalRepository {
    fn load_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        Ok(self
            .goals
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    fn get_goal(&self, _user_id: &str, _goal_id: &str) -> Result<Goal> {
        unimplemented!("not exercised by dashboard tests")
    }

    async fn insert_new_goal(&self, _new_goal: NewGoal) -> Result<Goal> {
        unimplemented!("not exercised by dashboard tests")
    }

    async fn update_goal(&self, _goal_update: GoalUpdate) -> Result<Goal> {
        unimplemented!("not exercised by dashboard tests")
    }

    async fn set_saved_amount(
        &self,
        _user_id: &str,
        _goal_id: &str,
        _saved_amount: i64,
        _status: GoalStatus,
    ) -> Result<Goal> {
        unimplemented!("not exercised by dashboard tests")
    }

    async fn delete_goal(&self, _user_id: &str, _goal_id: &str) -> Result<usize> {
        unimplemented!("not exercised by dashboard tests")
    }
}

struct InMemoryLearningRepository {
    course_progress: Vec<CourseProgressSummary>,
}

#[async_trait]
impl LearningRepositoryTrait for InMemoryLearningRepository {
    fn load_courses(&self, _published: Option<bool>) -> Result<Vec<Course>> {
        unimplemented!("not exercised by dashboard tests")
    }

    fn get_course(&self, _course_id: &str) -> Result<Course> {
        unimplemented!("not exercised by dashboard tests")
    }

    async fn insert_new_course(&self, _new_course: NewCourse) -> Result<Course> {
        unimplemented!("not exercised by dashboard tests")
    }

    async fn update_course(&self, _course_update: CourseUpdate) -> Result<Course> {
        unimplemented!("not exercised by dashboard tests")
    }

    async fn delete_course(&self, _course_id: &str) -> Result<usize> {
        unimplemented!("not exercised by dashboard tests")
    }

    fn load_lessons(&self, _course_id: &str) -> Result<Vec<Lesson>> {
        unimplemented!("not exercised by dashboard tests")
    }

    fn get_lesson(&self, _lesson_id: &str) -> Result<Lesson> {
        unimplemented!("not exercised by dashboard tests")
    }

    async fn insert_new_lesson(&self, _new_lesson: NewLesson) -> Result<Lesson> {
        unimplemented!("not exercised by dashboard tests")
    }

    async fn update_lesson(&self, _lesson_update: LessonUpdate) -> Result<Lesson> {
        unimplemented!("not exercised by dashboard tests")
    }

    async fn delete_lesson(&self, _lesson_id: &str) -> Result<usize> {
        unimplemented!("not exercised by dashboard tests")
    }

    fn count_lessons(&self, _course_id: &str) -> Result<i64> {
        unimplemented!("not exercised by dashboard tests")
    }

    fn get_enrollment(&self, _user_id: &str, _course_id: &str) -> Result<Option<Enrollment>> {
        unimplemented!("not exercised by dashboard tests")
    }

    async fn upsert_enrollment(
        &self,
        _user_id: &str,
        _course_id: &str,
        _percent_complete: i32,
    ) -> Result<Enrollment> {
        unimplemented!("not exercised by dashboard tests")
    }

    async fn insert_lesson_completion(
        &self,
        _user_id: &str,
        _course_id: &str,
        _lesson_id: &str,
    ) -> Result<LessonCompletion> {
        unimplemented!("not exercised by dashboard tests")
    }

    fn count_completed_lessons(&self, _user_id: &str, _course_id: &str) -> Result<i64> {
        unimplemented!("not exercised by dashboard tests")
    }

    fn load_course_progress(
        &self,
        _user_id: &str,
        limit: i64,
    ) -> Result<Vec<CourseProgressSummary>> {
        Ok(self
            .course_progress
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

// ==================== Helpers ====================

const USER: &str = "user-1";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn transaction(kind: TransactionKind, amount: i64, on: NaiveDate) -> Transaction {
    Transaction {
        id: format!("tx-{}-{}", kind, on),
        user_id: USER.to_string(),
        kind,
        amount,
        category: "General".to_string(),
        date: on,
        notes: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn goal(status: GoalStatus, deadline: Option<NaiveDate>) -> Goal {
    Goal {
        id: format!("goal-{:?}-{:?}", status, deadline),
        user_id: USER.to_string(),
        title: "Goal".to_string(),
        target_amount: 50000,
        saved_amount: 10000,
        deadline,
        status,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn dashboard_service(
    transactions: Vec<Transaction>,
    goals: Vec<Goal>,
    course_progress: Vec<CourseProgressSummary>,
) -> DashboardService {
    let transaction_service = Arc::new(TransactionService::new(Arc::new(
        InMemoryTransactionRepository { transactions },
    )));
    let goal_service = Arc::new(GoalService::new(Arc::new(InMemoryGoalRepository { goals })));
    let learning_service = Arc::new(LearningService::new(Arc::new(InMemoryLearningRepository {
        course_progress,
    })));
    DashboardService::new(transaction_service, goal_service, learning_service)
}

// `as_of` 2024-06-30: current window [2024-05-31, 2024-06-30],
// previous window [2024-05-01, 2024-05-31].
const AS_OF: (i32, u32, u32) = (2024, 6, 30);

// ==================== Insight Tests ====================

#[tokio::test]
async fn test_insights_income_growth_and_savings_boost() {
    let as_of = date(AS_OF.0, AS_OF.1, AS_OF.2);
    let service = dashboard_service(
        vec![
            // previous window
            transaction(TransactionKind::Income, 100_000, date(2024, 5, 10)),
            transaction(TransactionKind::Expense, 15_000, date(2024, 5, 12)),
            transaction(TransactionKind::Savings, 5_000, date(2024, 5, 15)),
            // current window
            transaction(TransactionKind::Income, 115_000, date(2024, 6, 15)),
            transaction(TransactionKind::Expense, 18_000, date(2024, 6, 10)),
            transaction(TransactionKind::Savings, 6_000, date(2024, 6, 12)),
        ],
        vec![],
        vec![],
    );

    let report = service.get_financial_insights(USER, as_of).await.unwrap();

    assert_eq!(report.trends.income, dec!(15));
    assert_eq!(report.trends.expenses, dec!(20));
    assert_eq!(report.trends.savings, dec!(20));

    let titles: Vec<&str> = report.insights.iter().map(|i| i.title.as_str()).collect();
    // Expenses changed exactly +20%: not strictly above the spike threshold.
    assert_eq!(titles, vec!["Income Growth", "Savings Boost"]);
    assert_eq!(
        report.insights[0].message,
        "Your income increased by 15.0% this month!"
    );
    assert_eq!(report.insights[0].kind, InsightKind::Positive);
}

#[tokio::test]
async fn test_insights_boundary_changes_do_not_fire() {
    let as_of = date(AS_OF.0, AS_OF.1, AS_OF.2);
    let service = dashboard_service(
        vec![
            transaction(TransactionKind::Income, 100_000, date(2024, 5, 10)),
            transaction(TransactionKind::Expense, 20_000, date(2024, 5, 12)),
            transaction(TransactionKind::Income, 100_000, date(2024, 6, 15)),
            // Exactly -10%: not strictly below the drop threshold.
            transaction(TransactionKind::Expense, 18_000, date(2024, 6, 10)),
        ],
        vec![],
        vec![],
    );

    let report = service.get_financial_insights(USER, as_of).await.unwrap();

    assert_eq!(report.trends.income, dec!(0));
    assert_eq!(report.trends.expenses, dec!(-10));
    assert!(report.insights.is_empty());
}

#[tokio::test]
async fn test_insights_zero_previous_is_full_increase() {
    let as_of = date(AS_OF.0, AS_OF.1, AS_OF.2);
    let service = dashboard_service(
        vec![transaction(
            TransactionKind::Income,
            5_000,
            date(2024, 6, 20),
        )],
        vec![],
        vec![],
    );

    let report = service.get_financial_insights(USER, as_of).await.unwrap();

    // Went from nothing to something: a full 100% increase, not infinity.
    assert_eq!(report.trends.income, dec!(100));
    // Nothing to nothing stays flat.
    assert_eq!(report.trends.expenses, dec!(0));
    assert_eq!(report.trends.savings, dec!(0));

    let titles: Vec<&str> = report.insights.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Income Growth"]);
    assert_eq!(
        report.insights[0].message,
        "Your income increased by 100.0% this month!"
    );
}

#[tokio::test]
async fn test_insights_emitted_in_fixed_order() {
    let as_of = date(AS_OF.0, AS_OF.1, AS_OF.2);
    let service = dashboard_service(
        vec![
            transaction(TransactionKind::Income, 100_000, date(2024, 5, 10)),
            transaction(TransactionKind::Expense, 10_000, date(2024, 5, 12)),
            transaction(TransactionKind::Savings, 10_000, date(2024, 5, 15)),
            transaction(TransactionKind::Income, 70_000, date(2024, 6, 15)),
            transaction(TransactionKind::Expense, 12_500, date(2024, 6, 10)),
            transaction(TransactionKind::Savings, 12_000, date(2024, 6, 12)),
        ],
        vec![goal(GoalStatus::Active, Some(date(2024, 7, 10)))],
        vec![],
    );

    let report = service.get_financial_insights(USER, as_of).await.unwrap();

    let titles: Vec<&str> = report.insights.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Income Decrease",
            "High Spending",
            "Savings Boost",
            "Goal Deadline Approaching",
        ]
    );
    assert_eq!(report.insights[0].kind, InsightKind::Warning);
    assert_eq!(report.insights[3].kind, InsightKind::Info);
}

#[tokio::test]
async fn test_goal_deadline_window_counts_only_active_upcoming() {
    let as_of = date(AS_OF.0, AS_OF.1, AS_OF.2);
    let service = dashboard_service(
        vec![],
        vec![
            goal(GoalStatus::Active, Some(date(2024, 7, 15))),  // +15: counted
            goal(GoalStatus::Active, Some(date(2024, 7, 30))),  // +30: counted
            goal(GoalStatus::Active, Some(date(2024, 7, 31))),  // +31: out
            goal(GoalStatus::Active, Some(date(2024, 6, 29))),  // -1: already past
            goal(GoalStatus::Active, Some(date(2024, 6, 30))),  // same day: out
            goal(GoalStatus::Paused, Some(date(2024, 7, 10))),  // not active
            goal(GoalStatus::Active, None),                     // no deadline
        ],
        vec![],
    );

    let report = service.get_financial_insights(USER, as_of).await.unwrap();

    let deadline_insights: Vec<_> = report
        .insights
        .iter()
        .filter(|i| i.kind == InsightKind::Info)
        .collect();
    assert_eq!(deadline_insights.len(), 1);
    assert_eq!(
        deadline_insights[0].message,
        "You have 2 goal(s) with deadlines in the next 30 days."
    );
}

#[tokio::test]
async fn test_insight_windows_partition_transactions() {
    let as_of = date(AS_OF.0, AS_OF.1, AS_OF.2);
    let service = dashboard_service(
        vec![
            transaction(TransactionKind::Income, 10_000, date(2024, 6, 30)), // current edge
            transaction(TransactionKind::Income, 20_000, date(2024, 5, 1)),  // previous edge
            transaction(TransactionKind::Income, 40_000, date(2024, 4, 30)), // before both
        ],
        vec![],
        vec![],
    );

    let report = service.get_financial_insights(USER, as_of).await.unwrap();

    assert_eq!(report.current_period.total_income, dec!(100.00));
    assert_eq!(report.previous_period.total_income, dec!(200.00));
}

// ==================== Dashboard Summary Tests ====================

#[tokio::test]
async fn test_dashboard_summary_merges_all_sections() {
    let progress_entry = CourseProgressSummary {
        course_id: "course-1".to_string(),
        course_title: "Personal Finance 101".to_string(),
        course_thumbnail: None,
        progress: 25,
        last_accessed: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
    };
    let service = dashboard_service(
        vec![
            transaction(TransactionKind::Income, 200_000, date(2024, 6, 1)),
            transaction(TransactionKind::Expense, 50_000, date(2024, 6, 2)),
            transaction(TransactionKind::Savings, 30_000, date(2024, 6, 3)),
            transaction(TransactionKind::Expense, 1_000, date(2024, 6, 4)),
            transaction(TransactionKind::Expense, 2_000, date(2024, 6, 5)),
            transaction(TransactionKind::Expense, 3_000, date(2024, 6, 6)),
        ],
        vec![
            goal(GoalStatus::Active, None),
            goal(GoalStatus::Active, Some(date(2025, 1, 1))),
            goal(GoalStatus::Completed, None),
        ],
        vec![progress_entry.clone()],
    );

    let summary = service.get_dashboard_summary(USER).await.unwrap();

    assert_eq!(summary.total_income, dec!(2000.00));
    assert_eq!(summary.total_expenses, dec!(560.00));
    assert_eq!(summary.total_savings, dec!(300.00));
    assert_eq!(summary.net_balance, dec!(1440.00));

    assert_eq!(summary.goal_progress.active, 2);
    assert_eq!(summary.goal_progress.completed, 1);
    assert_eq!(summary.goal_progress.total_saved, dec!(300.00));

    // Five newest, newest first.
    assert_eq!(summary.recent_transactions.len(), 5);
    assert_eq!(summary.recent_transactions[0].date, date(2024, 6, 6));

    assert_eq!(summary.monthly_trends.len(), 1);
    assert_eq!(summary.category_breakdown["General"], dec!(2860.00));
    assert_eq!(summary.course_progress, vec![progress_entry]);
}
