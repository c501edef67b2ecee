use log::debug;
use std::sync::Arc;

use crate::errors::Result;
use crate::transactions::transactions_model::{
    NewTransaction, Sort, Transaction, TransactionFilters, TransactionSearchResponse,
    TransactionStats, TransactionUpdate,
};
use crate::transactions::transactions_traits::{
    TransactionRepositoryTrait, TransactionServiceTrait,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Service for managing transactions and computing aggregate statistics
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        TransactionService { repository }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.repository.list_transactions(user_id, None, None)
    }

    fn get_recent_transactions(&self, user_id: &str, limit: i64) -> Result<Vec<Transaction>> {
        self.repository.list_recent_transactions(user_id, limit)
    }

    fn search_transactions(
        &self,
        user_id: &str,
        page: i64,
        page_size: i64,
        filters: TransactionFilters,
        sort: Option<Sort>,
    ) -> Result<TransactionSearchResponse> {
        self.repository
            .search_transactions(user_id, page, page_size, filters, sort)
    }

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.repository.get_transaction(user_id, transaction_id)
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;
        self.repository
            .insert_new_transaction(new_transaction)
            .await
    }

    async fn update_transaction(
        &self,
        transaction_update: TransactionUpdate,
    ) -> Result<Transaction> {
        transaction_update.validate()?;
        self.repository.update_transaction(transaction_update).await
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<usize> {
        self.repository
            .delete_transaction(user_id, transaction_id)
            .await
    }

    fn get_transaction_stats(
        &self,
        user_id: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<TransactionStats> {
        debug!(
            "Computing transaction stats for user {} ({:?}..{:?})",
            user_id, date_from, date_to
        );
        let transactions = self
            .repository
            .list_transactions(user_id, date_from, date_to)?;
        Ok(TransactionStats::from_transactions(&transactions))
    }
}
