//! Database models for transactions.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use centsible_core::errors::Error;
use centsible_core::transactions::{NewTransaction, Transaction, TransactionKind};

/// Database model for transactions
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
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub amount: i64,
    pub category: String,
    pub transaction_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TransactionDB {
    /// Builds an insertable row from the domain input model.
    pub fn from_new(new: NewTransaction, id: String, now: NaiveDateTime) -> Self {
        TransactionDB {
            id,
            user_id: new.user_id,
            kind: new.kind.as_str().to_string(),
            amount: new.amount,
            category: new.category,
            transaction_date: new.date,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

// Conversion to the domain model. The kind column is free text in SQLite;
// an unknown value is a defect and is rejected here, before any aggregation
// can see it.
impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        let kind = TransactionKind::from_str(&db.kind)?;
        Ok(Transaction {
            id: db.id,
            user_id: db.user_id,
            kind,
            amount: db.amount,
            category: db.category,
            date: db.transaction_date,
            notes: db.notes,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::<Utc>::from_naive_utc_and_offset(db.updated_at, Utc),
        })
    }
}
