use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use centsible_core::errors::{DatabaseError, Error, Result};
use centsible_core::transactions::{
    NewTransaction, Sort, Transaction, TransactionFilters, TransactionRepositoryTrait,
    TransactionSearchResponse, TransactionSearchResponseMeta, TransactionUpdate,
};

use super::model::TransactionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::transactions;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }

    fn rows_to_domain(rows: Vec<TransactionDB>) -> Result<Vec<Transaction>> {
        rows.into_iter().map(Transaction::try_from).collect()
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn list_transactions(
        &self,
        user_id: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .into_boxed();
        if let Some(from) = date_from {
            query = query.filter(transactions::transaction_date.ge(from));
        }
        if let Some(to) = date_to {
            query = query.filter(transactions::transaction_date.le(to));
        }

        let rows = query
            .order(transactions::transaction_date.asc())
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        Self::rows_to_domain(rows)
    }

    fn list_recent_transactions(&self, user_id: &str, limit: i64) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .order((
                transactions::transaction_date.desc(),
                transactions::created_at.desc(),
            ))
            .limit(limit)
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        Self::rows_to_domain(rows)
    }

    fn search_transactions(
        &self,
        user_id: &str,
        page: i64, // 1-based
        page_size: i64,
        filters: TransactionFilters,
        sort: Option<Sort>,
    ) -> Result<TransactionSearchResponse> {
        let mut conn = get_connection(&self.pool)?;

        let create_base_query = || {
            let mut query = transactions::table
                .filter(transactions::user_id.eq(user_id))
                .into_boxed();

            if let Some(kind) = filters.kind {
                query = query.filter(transactions::kind.eq(kind.as_str()));
            }
            if let Some(ref category) = filters.category {
                query = query.filter(transactions::category.like(format!("%{}%", category)));
            }
            if let Some(from) = filters.date_from {
                query = query.filter(transactions::transaction_date.ge(from));
            }
            if let Some(to) = filters.date_to {
                query = query.filter(transactions::transaction_date.le(to));
            }

            // Apply sorting
            if let Some(ref sort) = sort {
                match sort.id.as_str() {
                    "date" => {
                        if sort.desc {
                            query = query.order(transactions::transaction_date.desc());
                        } else {
                            query = query.order(transactions::transaction_date.asc());
                        }
                    }
                    "amount" => {
                        if sort.desc {
                            query = query.order(transactions::amount.desc());
                        } else {
                            query = query.order(transactions::amount.asc());
                        }
                    }
                    "category" => {
                        if sort.desc {
                            query = query.order(transactions::category.desc());
                        } else {
                            query = query.order(transactions::category.asc());
                        }
                    }
                    _ => query = query.order(transactions::transaction_date.desc()),
                }
            } else {
                query = query.order(transactions::transaction_date.desc());
            }

            query
        };

        let total_row_count = create_base_query()
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()?;

        let offset = (page - 1).max(0) * page_size;
        let rows = create_base_query()
            .limit(page_size)
            .offset(offset)
            .load::<TransactionDB>(&mut conn)
            .into_core()?;

        Ok(TransactionSearchResponse {
            data: Self::rows_to_domain(rows)?,
            meta: TransactionSearchResponseMeta { total_row_count },
        })
    }

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        let row = transactions::table
            .filter(transactions::id.eq(transaction_id))
            .filter(transactions::user_id.eq(user_id))
            .first::<TransactionDB>(&mut conn)
            .into_core()?;
        Transaction::try_from(row)
    }

    async fn insert_new_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn| {
                let id = new_transaction
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let now = Utc::now().naive_utc();
                let transaction_db = TransactionDB::from_new(new_transaction, id, now);

                let result_db: TransactionDB = diesel::insert_into(transactions::table)
                    .values(&transaction_db)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Transaction::try_from(result_db)
            })
            .await
    }

    async fn update_transaction(
        &self,
        transaction_update: TransactionUpdate,
    ) -> Result<Transaction> {
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let updated_rows = diesel::update(
                    transactions::table
                        .filter(transactions::id.eq(&transaction_update.id))
                        .filter(transactions::user_id.eq(&transaction_update.user_id)),
                )
                .set((
                    transactions::kind.eq(transaction_update.kind.as_str()),
                    transactions::amount.eq(transaction_update.amount),
                    transactions::category.eq(&transaction_update.category),
                    transactions::transaction_date.eq(transaction_update.date),
                    transactions::notes.eq(transaction_update.notes.clone()),
                    transactions::updated_at.eq(now),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;

                if updated_rows == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Transaction {} not found",
                        transaction_update.id
                    ))));
                }

                let result_db = transactions::table
                    .filter(transactions::id.eq(&transaction_update.id))
                    .first::<TransactionDB>(conn)
                    .map_err(StorageError::from)?;
                Transaction::try_from(result_db)
            })
            .await
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(
                    transactions::table
                        .filter(transactions::id.eq(&transaction_id))
                        .filter(transactions::user_id.eq(&user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                Ok(deleted)
            })
            .await
    }
}
