use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use centsible_core::errors::{DatabaseError, Error, Result};
use centsible_core::goals::{Goal, GoalRepositoryTrait, GoalStatus, GoalUpdate, NewGoal};

use super::model::GoalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::goals;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn load_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = goals::table
            .filter(goals::user_id.eq(user_id))
            .order(goals::created_at.desc())
            .load::<GoalDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(Goal::try_from).collect()
    }

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;

        let row = goals::table
            .filter(goals::id.eq(goal_id))
            .filter(goals::user_id.eq(user_id))
            .first::<GoalDB>(&mut conn)
            .into_core()?;
        Goal::try_from(row)
    }

    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        self.writer
            .exec(move |conn| {
                let id = new_goal
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let now = Utc::now().naive_utc();
                let goal_db = GoalDB::from_new(new_goal, id, now);

                let result_db: GoalDB = diesel::insert_into(goals::table)
                    .values(&goal_db)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Goal::try_from(result_db)
            })
            .await
    }

    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal> {
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let updated_rows = diesel::update(
                    goals::table
                        .filter(goals::id.eq(&goal_update.id))
                        .filter(goals::user_id.eq(&goal_update.user_id)),
                )
                .set((
                    goals::title.eq(&goal_update.title),
                    goals::target_amount.eq(goal_update.target_amount),
                    goals::deadline.eq(goal_update.deadline),
                    goals::status.eq(goal_update.status.as_str()),
                    goals::updated_at.eq(now),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;

                if updated_rows == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Goal {} not found",
                        goal_update.id
                    ))));
                }

                let result_db = goals::table
                    .filter(goals::id.eq(&goal_update.id))
                    .first::<GoalDB>(conn)
                    .map_err(StorageError::from)?;
                Goal::try_from(result_db)
            })
            .await
    }

    async fn set_saved_amount(
        &self,
        user_id: &str,
        goal_id: &str,
        saved_amount: i64,
        status: GoalStatus,
    ) -> Result<Goal> {
        let user_id = user_id.to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let updated_rows = diesel::update(
                    goals::table
                        .filter(goals::id.eq(&goal_id))
                        .filter(goals::user_id.eq(&user_id)),
                )
                .set((
                    goals::saved_amount.eq(saved_amount),
                    goals::status.eq(status.as_str()),
                    goals::updated_at.eq(now),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;

                if updated_rows == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Goal {goal_id} not found"
                    ))));
                }

                let result_db = goals::table
                    .filter(goals::id.eq(&goal_id))
                    .first::<GoalDB>(conn)
                    .map_err(StorageError::from)?;
                Goal::try_from(result_db)
            })
            .await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(
                    goals::table
                        .filter(goals::id.eq(&goal_id))
                        .filter(goals::user_id.eq(&user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                Ok(deleted)
            })
            .await
    }
}
