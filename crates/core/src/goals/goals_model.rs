use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::MINOR_UNIT_SCALE;
use crate::goals::goals_errors::GoalError;

/// Lifecycle status of a savings goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    Active,
    Completed,
    Paused,
    Cancelled,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "ACTIVE",
            GoalStatus::Completed => "COMPLETED",
            GoalStatus::Paused => "PAUSED",
            GoalStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = GoalError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(GoalStatus::Active),
            "COMPLETED" => Ok(GoalStatus::Completed),
            "PAUSED" => Ok(GoalStatus::Paused),
            "CANCELLED" => Ok(GoalStatus::Cancelled),
            other => Err(GoalError::UnknownStatus(other.to_string())),
        }
    }
}

/// Domain model representing a savings goal.
///
/// Target and saved amounts are integer minor units; saved may exceed
/// target. Percent-complete is always recomputed, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: i64,
    pub saved_amount: i64,
    pub deadline: Option<NaiveDate>,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    pub fn target_major(&self) -> Decimal {
        Decimal::new(self.target_amount, MINOR_UNIT_SCALE)
    }

    pub fn saved_major(&self) -> Decimal {
        Decimal::new(self.saved_amount, MINOR_UNIT_SCALE)
    }

    /// Percent-complete. A goal with a non-positive target has undefined
    /// progress, defined here as 0 rather than an error; progress may
    /// exceed 100 when saved > target.
    pub fn progress(&self) -> Decimal {
        if self.target_amount > 0 {
            self.saved_major() / self.target_major() * dec!(100)
        } else {
            Decimal::ZERO
        }
    }

    /// Whole days from `today` until the deadline, if one is set.
    pub fn days_until_deadline(&self, today: NaiveDate) -> Option<i64> {
        self.deadline
            .map(|deadline| (deadline - today).num_days())
    }
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub id: Option<String>,
    pub user_id: String,
    pub title: String,
    pub target_amount: i64,
    pub deadline: Option<NaiveDate>,
}

impl NewGoal {
    /// Validates the new goal data
    pub fn validate(&self) -> std::result::Result<(), GoalError> {
        if self.user_id.trim().is_empty() {
            return Err(GoalError::InvalidData("User ID cannot be empty".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(GoalError::InvalidData("Title cannot be empty".to_string()));
        }
        if self.target_amount <= 0 {
            return Err(GoalError::InvalidData(
                "Target amount must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input model for updating an existing goal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: i64,
    pub deadline: Option<NaiveDate>,
    pub status: GoalStatus,
}

impl GoalUpdate {
    /// Validates the goal update data
    pub fn validate(&self) -> std::result::Result<(), GoalError> {
        if self.id.trim().is_empty() {
            return Err(GoalError::InvalidData(
                "Goal ID is required for updates".to_string(),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(GoalError::InvalidData("Title cannot be empty".to_string()));
        }
        if self.target_amount <= 0 {
            return Err(GoalError::InvalidData(
                "Target amount must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Portfolio-level goal statistics.
///
/// Monetary sums are major units; `average_progress` is the mean per-goal
/// percent-complete across all goals, 0 when the user has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStats {
    pub total: u32,
    pub active: u32,
    pub completed: u32,
    pub paused: u32,
    pub cancelled: u32,
    pub total_target_amount: Decimal,
    pub total_saved_amount: Decimal,
    pub average_progress: Decimal,
}

impl GoalStats {
    /// Folds a goal snapshot into portfolio statistics.
    pub fn from_goals<'a, I>(goals: I) -> Self
    where
        I: IntoIterator<Item = &'a Goal>,
    {
        let mut stats = GoalStats {
            total: 0,
            active: 0,
            completed: 0,
            paused: 0,
            cancelled: 0,
            total_target_amount: Decimal::ZERO,
            total_saved_amount: Decimal::ZERO,
            average_progress: Decimal::ZERO,
        };
        let mut total_progress = Decimal::ZERO;

        for goal in goals {
            stats.total += 1;
            match goal.status {
                GoalStatus::Active => stats.active += 1,
                GoalStatus::Completed => stats.completed += 1,
                GoalStatus::Paused => stats.paused += 1,
                GoalStatus::Cancelled => stats.cancelled += 1,
            }
            stats.total_target_amount += goal.target_major();
            stats.total_saved_amount += goal.saved_major();
            total_progress += goal.progress();
        }

        if stats.total > 0 {
            stats.average_progress = total_progress / Decimal::from(stats.total);
        }
        stats
    }
}
