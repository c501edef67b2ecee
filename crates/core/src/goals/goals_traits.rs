use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalStats, GoalStatus, GoalUpdate, NewGoal};
use async_trait::async_trait;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn load_goals(&self, user_id: &str) -> Result<Vec<Goal>>;
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal>;
    async fn set_saved_amount(
        &self,
        user_id: &str,
        goal_id: &str,
        saved_amount: i64,
        status: GoalStatus,
    ) -> Result<Goal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>>;
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal>;
    /// Adds minor units to a goal's saved amount, flipping the status to
    /// Completed once saved reaches the target.
    async fn add_contribution(&self, user_id: &str, goal_id: &str, amount: i64) -> Result<Goal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize>;
    /// Goal progress calculator over the user's whole portfolio.
    fn get_goal_stats(&self, user_id: &str) -> Result<GoalStats>;
}
