use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use log::debug;
use std::sync::Arc;
use tokio::task;

use crate::dashboard::dashboard_constants::{
    COURSE_PROGRESS_LIMIT, EXPENSE_DROP_THRESHOLD, EXPENSE_SPIKE_THRESHOLD,
    GOAL_DEADLINE_WINDOW_DAYS, INCOME_DROP_THRESHOLD, INCOME_GROWTH_THRESHOLD,
    INSIGHT_WINDOW_DAYS, RECENT_TRANSACTIONS_LIMIT, SAVINGS_BOOST_THRESHOLD,
};
use crate::dashboard::dashboard_model::{
    percentage_change, DashboardSummary, GoalProgressOverview, Insight, InsightKind,
    InsightReport, TrendChanges,
};
use crate::errors::{Error, Result};
use crate::goals::{GoalServiceTrait, GoalStatus};
use crate::learning::LearningServiceTrait;
use crate::transactions::TransactionServiceTrait;
use rust_decimal::Decimal;

/// Trait defining the contract for the dashboard service
#[async_trait]
pub trait DashboardServiceTrait: Send + Sync {
    /// Merges the aggregate window, goal stats, recent transactions, and
    /// course progress into one dashboard payload.
    async fn get_dashboard_summary(&self, user_id: &str) -> Result<DashboardSummary>;
    /// Insight generator: compares the last 30 days ending at `as_of` with
    /// the 30 days before that and emits threshold-based advisories.
    async fn get_financial_insights(&self, user_id: &str, as_of: NaiveDate)
        -> Result<InsightReport>;
}

pub struct DashboardService {
    transaction_service: Arc<dyn TransactionServiceTrait>,
    goal_service: Arc<dyn GoalServiceTrait>,
    learning_service: Arc<dyn LearningServiceTrait>,
}

impl DashboardService {
    pub fn new(
        transaction_service: Arc<dyn TransactionServiceTrait>,
        goal_service: Arc<dyn GoalServiceTrait>,
        learning_service: Arc<dyn LearningServiceTrait>,
    ) -> Self {
        DashboardService {
            transaction_service,
            goal_service,
            learning_service,
        }
    }

    /// Formats a change magnitude with one decimal place, e.g. "15.0".
    fn format_percent(change: Decimal) -> String {
        let mut rounded = change.abs().round_dp(1);
        rounded.rescale(1);
        rounded.to_string()
    }

    /// Evaluates the fixed thresholds. Within a metric only one branch
    /// fires; across metrics all applicable insights are included, in the
    /// order income, expenses, savings, goal deadlines.
    fn build_insights(trends: &TrendChanges, goals_near_deadline: usize) -> Vec<Insight> {
        let mut insights = Vec::new();

        if trends.income > INCOME_GROWTH_THRESHOLD {
            insights.push(Insight {
                kind: InsightKind::Positive,
                title: "Income Growth".to_string(),
                message: format!(
                    "Your income increased by {}% this month!",
                    Self::format_percent(trends.income)
                ),
                icon: "📈".to_string(),
            });
        } else if trends.income < INCOME_DROP_THRESHOLD {
            insights.push(Insight {
                kind: InsightKind::Warning,
                title: "Income Decrease".to_string(),
                message: format!(
                    "Your income decreased by {}% this month.",
                    Self::format_percent(trends.income)
                ),
                icon: "📉".to_string(),
            });
        }

        if trends.expenses > EXPENSE_SPIKE_THRESHOLD {
            insights.push(Insight {
                kind: InsightKind::Warning,
                title: "High Spending".to_string(),
                message: format!(
                    "Your expenses increased by {}% this month. Consider reviewing your budget.",
                    Self::format_percent(trends.expenses)
                ),
                icon: "⚠️".to_string(),
            });
        } else if trends.expenses < EXPENSE_DROP_THRESHOLD {
            insights.push(Insight {
                kind: InsightKind::Positive,
                title: "Great Savings".to_string(),
                message: format!(
                    "You reduced your expenses by {}% this month!",
                    Self::format_percent(trends.expenses)
                ),
                icon: "💰".to_string(),
            });
        }

        if trends.savings > SAVINGS_BOOST_THRESHOLD {
            insights.push(Insight {
                kind: InsightKind::Positive,
                title: "Savings Boost".to_string(),
                message: format!(
                    "Your savings increased by {}% this month!",
                    Self::format_percent(trends.savings)
                ),
                icon: "🎯".to_string(),
            });
        }

        // One insight regardless of how many goals qualify.
        if goals_near_deadline > 0 {
            insights.push(Insight {
                kind: InsightKind::Info,
                title: "Goal Deadline Approaching".to_string(),
                message: format!(
                    "You have {} goal(s) with deadlines in the next {} days.",
                    goals_near_deadline, GOAL_DEADLINE_WINDOW_DAYS
                ),
                icon: "⏰".to_string(),
            });
        }

        insights
    }
}

#[async_trait]
impl DashboardServiceTrait for DashboardService {
    async fn get_dashboard_summary(&self, user_id: &str) -> Result<DashboardSummary> {
        debug!("Building dashboard summary for user {}", user_id);

        // Independent reads over disjoint entity types; run them
        // concurrently and join.
        let stats_task = task::spawn_blocking({
            let service = Arc::clone(&self.transaction_service);
            let user_id = user_id.to_string();
            move || service.get_transaction_stats(&user_id, None, None)
        });
        let goal_stats_task = task::spawn_blocking({
            let service = Arc::clone(&self.goal_service);
            let user_id = user_id.to_string();
            move || service.get_goal_stats(&user_id)
        });

        let (stats, goal_stats) = tokio::try_join!(stats_task, goal_stats_task)
            .map_err(|e| Error::Unexpected(format!("Blocking task failed: {e}")))?;
        let (stats, goal_stats) = (stats?, goal_stats?);

        let recent_transactions = self
            .transaction_service
            .get_recent_transactions(user_id, RECENT_TRANSACTIONS_LIMIT)?;
        let course_progress = self
            .learning_service
            .get_course_progress(user_id, COURSE_PROGRESS_LIMIT)?;

        Ok(DashboardSummary {
            total_income: stats.total_income,
            total_expenses: stats.total_expenses,
            total_savings: stats.total_savings,
            net_balance: stats.net_balance,
            goal_progress: GoalProgressOverview {
                completed: goal_stats.completed,
                active: goal_stats.active,
                total_saved: goal_stats.total_saved_amount,
            },
            recent_transactions,
            monthly_trends: stats.monthly_trends,
            category_breakdown: stats.category_breakdown,
            course_progress,
        })
    }

    async fn get_financial_insights(
        &self,
        user_id: &str,
        as_of: NaiveDate,
    ) -> Result<InsightReport> {
        debug!(
            "Generating financial insights for user {} as of {}",
            user_id, as_of
        );

        let window_start = as_of - Duration::days(INSIGHT_WINDOW_DAYS);
        let previous_start = as_of - Duration::days(2 * INSIGHT_WINDOW_DAYS);

        let current_task = task::spawn_blocking({
            let service = Arc::clone(&self.transaction_service);
            let user_id = user_id.to_string();
            move || service.get_transaction_stats(&user_id, Some(window_start), Some(as_of))
        });
        let previous_task = task::spawn_blocking({
            let service = Arc::clone(&self.transaction_service);
            let user_id = user_id.to_string();
            move || service.get_transaction_stats(&user_id, Some(previous_start), Some(window_start))
        });

        // Both windows must land before changes are computed.
        let (current, previous) = tokio::try_join!(current_task, previous_task)
            .map_err(|e| Error::Unexpected(format!("Blocking task failed: {e}")))?;
        let (current, previous) = (current?, previous?);

        let trends = TrendChanges {
            income: percentage_change(previous.total_income, current.total_income),
            expenses: percentage_change(previous.total_expenses, current.total_expenses),
            savings: percentage_change(previous.total_savings, current.total_savings),
        };

        let goals = self.goal_service.get_goals(user_id)?;
        let goals_near_deadline = goals
            .iter()
            .filter(|goal| goal.status == GoalStatus::Active)
            .filter_map(|goal| goal.days_until_deadline(as_of))
            .filter(|days| *days > 0 && *days <= GOAL_DEADLINE_WINDOW_DAYS)
            .count();

        let insights = Self::build_insights(&trends, goals_near_deadline);

        Ok(InsightReport {
            current_period: current,
            previous_period: previous,
            trends,
            insights,
        })
    }
}
