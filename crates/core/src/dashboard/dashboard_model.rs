use num_traits::Zero;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::learning::CourseProgressSummary;
use crate::transactions::{MonthlySummary, Transaction, TransactionStats};

/// Severity class of an advisory insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Positive,
    Warning,
    Info,
}

/// Human-readable advisory message derived from period-over-period changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub icon: String,
}

/// Percentage changes of the three metrics between the comparison windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendChanges {
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
}

/// Output of the insight generator: the two raw aggregate windows, the
/// percentage changes, and the ordered advisory list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub current_period: TransactionStats,
    pub previous_period: TransactionStats,
    pub trends: TrendChanges,
    pub insights: Vec<Insight>,
}

/// Goal portfolio digest embedded in the dashboard payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressOverview {
    pub completed: u32,
    pub active: u32,
    pub total_saved: Decimal,
}

/// Merged dashboard payload returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_savings: Decimal,
    pub net_balance: Decimal,
    pub goal_progress: GoalProgressOverview,
    pub recent_transactions: Vec<Transaction>,
    pub monthly_trends: Vec<MonthlySummary>,
    pub category_breakdown: HashMap<String, Decimal>,
    pub course_progress: Vec<CourseProgressSummary>,
}

/// Period-over-period percentage change.
///
/// A zero previous value would be undefined; "went from nothing to
/// something" is defined as a full 100% increase, and "nothing to nothing"
/// as 0.
pub fn percentage_change(previous: Decimal, current: Decimal) -> Decimal {
    if previous == Decimal::zero() {
        if current > Decimal::zero() {
            dec!(100)
        } else {
            Decimal::zero()
        }
    } else {
        (current - previous) / previous * dec!(100)
    }
}
