use crate::errors::Result;
use crate::transactions::transactions_model::{
    NewTransaction, Sort, Transaction, TransactionFilters, TransactionSearchResponse,
    TransactionStats, TransactionUpdate,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Loads a user's transactions, optionally bounded by an inclusive date
    /// range, ordered by occurrence date ascending.
    fn list_transactions(
        &self,
        user_id: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>>;
    fn list_recent_transactions(&self, user_id: &str, limit: i64) -> Result<Vec<Transaction>>;
    fn search_transactions(
        &self,
        user_id: &str,
        page: i64,
        page_size: i64,
        filters: TransactionFilters,
        sort: Option<Sort>,
    ) -> Result<TransactionSearchResponse>;
    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    async fn insert_new_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(&self, transaction_update: TransactionUpdate)
        -> Result<Transaction>;
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;
    fn get_recent_transactions(&self, user_id: &str, limit: i64) -> Result<Vec<Transaction>>;
    fn search_transactions(
        &self,
        user_id: &str,
        page: i64,
        page_size: i64,
        filters: TransactionFilters,
        sort: Option<Sort>,
    ) -> Result<TransactionSearchResponse>;
    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(&self, transaction_update: TransactionUpdate)
        -> Result<Transaction>;
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<usize>;
    /// Statistics aggregator: folds the user's transactions in the given
    /// inclusive window into an aggregate record.
    fn get_transaction_stats(
        &self,
        user_id: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<TransactionStats>;
}
