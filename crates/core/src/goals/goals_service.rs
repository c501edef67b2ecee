use log::debug;
use std::sync::Arc;

use crate::errors::Result;
use crate::goals::goals_errors::GoalError;
use crate::goals::goals_model::{Goal, GoalStats, GoalStatus, GoalUpdate, NewGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use async_trait::async_trait;

/// Service for managing savings goals and computing portfolio progress
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { repository }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        self.repository.load_goals(user_id)
    }

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        self.repository.get_goal(user_id, goal_id)
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        self.repository.insert_new_goal(new_goal).await
    }

    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal> {
        goal_update.validate()?;
        self.repository.update_goal(goal_update).await
    }

    async fn add_contribution(&self, user_id: &str, goal_id: &str, amount: i64) -> Result<Goal> {
        if amount <= 0 {
            return Err(GoalError::InvalidData(
                "Contribution amount must be positive".to_string(),
            )
            .into());
        }

        let goal = self.repository.get_goal(user_id, goal_id)?;
        let saved_amount = goal.saved_amount + amount;
        // Completion is one-way: a completed goal never reverts here.
        let status = if saved_amount >= goal.target_amount {
            GoalStatus::Completed
        } else {
            goal.status
        };
        debug!(
            "Adding contribution of {} to goal {} (saved {} -> {})",
            amount, goal_id, goal.saved_amount, saved_amount
        );
        self.repository
            .set_saved_amount(user_id, goal_id, saved_amount, status)
            .await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        self.repository.delete_goal(user_id, goal_id).await
    }

    fn get_goal_stats(&self, user_id: &str) -> Result<GoalStats> {
        let goals = self.repository.load_goals(user_id)?;
        Ok(GoalStats::from_goals(&goals))
    }
}
