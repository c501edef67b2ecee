//! Database models for goals.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use centsible_core::errors::Error;
use centsible_core::goals::{Goal, GoalStatus, NewGoal};

/// Database model for goals
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: i64,
    pub saved_amount: i64,
    pub deadline: Option<NaiveDate>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl GoalDB {
    /// Builds an insertable row from the domain input model. New goals start
    /// out Active with nothing saved.
    pub fn from_new(new: NewGoal, id: String, now: NaiveDateTime) -> Self {
        GoalDB {
            id,
            user_id: new.user_id,
            title: new.title,
            target_amount: new.target_amount,
            saved_amount: 0,
            deadline: new.deadline,
            status: GoalStatus::Active.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

// Conversion to the domain model; unknown status strings are rejected at
// this boundary.
impl TryFrom<GoalDB> for Goal {
    type Error = Error;

    fn try_from(db: GoalDB) -> Result<Self, Self::Error> {
        let status = GoalStatus::from_str(&db.status)?;
        Ok(Goal {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            target_amount: db.target_amount,
            saved_amount: db.saved_amount,
            deadline: db.deadline,
            status,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::<Utc>::from_naive_utc_and_offset(db.updated_at, Utc),
        })
    }
}
