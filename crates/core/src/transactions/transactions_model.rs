use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::constants::{MINOR_UNIT_SCALE, MIN_TRANSACTION_AMOUNT};
use crate::transactions::transactions_errors::TransactionError;

/// Kind of a money movement. Kinds are mutually exclusive and exhaustive;
/// an unknown kind string is rejected at the storage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,
    Expense,
    Savings,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "INCOME",
            TransactionKind::Expense => "EXPENSE",
            TransactionKind::Savings => "SAVINGS",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "INCOME" => Ok(TransactionKind::Income),
            "EXPENSE" => Ok(TransactionKind::Expense),
            "SAVINGS" => Ok(TransactionKind::Savings),
            other => Err(TransactionError::UnknownKind(other.to_string())),
        }
    }
}

/// Domain model representing a transaction.
///
/// Amounts are integer minor units (cents); conversion to major units
/// happens only when aggregates are produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub kind: TransactionKind,
    pub amount: i64,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Amount in major units (dollars), exact at scale 2.
    pub fn amount_major(&self) -> Decimal {
        Decimal::new(self.amount, MINOR_UNIT_SCALE)
    }

    /// `YYYY-MM` bucket key of the occurrence date.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// Input model for creating a new transaction
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub id: Option<String>,
    pub user_id: String,
    pub kind: TransactionKind,
    pub amount: i64,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl NewTransaction {
    /// Validates the new transaction data
    pub fn validate(&self) -> std::result::Result<(), TransactionError> {
        if self.user_id.trim().is_empty() {
            return Err(TransactionError::InvalidData(
                "User ID cannot be empty".to_string(),
            ));
        }
        if self.amount < MIN_TRANSACTION_AMOUNT {
            return Err(TransactionError::InvalidData(format!(
                "Amount must be at least {} minor unit(s)",
                MIN_TRANSACTION_AMOUNT
            )));
        }
        if self.category.trim().is_empty() {
            return Err(TransactionError::InvalidData(
                "Category cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input model for updating an existing transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub id: String,
    pub user_id: String,
    pub kind: TransactionKind,
    pub amount: i64,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl TransactionUpdate {
    /// Validates the transaction update data
    pub fn validate(&self) -> std::result::Result<(), TransactionError> {
        if self.id.trim().is_empty() {
            return Err(TransactionError::InvalidData(
                "Transaction ID is required for updates".to_string(),
            ));
        }
        if self.amount < MIN_TRANSACTION_AMOUNT {
            return Err(TransactionError::InvalidData(format!(
                "Amount must be at least {} minor unit(s)",
                MIN_TRANSACTION_AMOUNT
            )));
        }
        if self.category.trim().is_empty() {
            return Err(TransactionError::InvalidData(
                "Category cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Optional filters for transaction listing/search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilters {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Sort order for transaction search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sort {
    pub id: String,
    pub desc: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSearchResponseMeta {
    pub total_row_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSearchResponse {
    pub data: Vec<Transaction>,
    pub meta: TransactionSearchResponseMeta,
}

/// One month of the trend series, keyed by `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
}

impl MonthlySummary {
    pub fn new(month: impl Into<String>) -> Self {
        MonthlySummary {
            month: month.into(),
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            savings: Decimal::ZERO,
        }
    }

    fn add(&mut self, kind: TransactionKind, amount: Decimal) {
        match kind {
            TransactionKind::Income => self.income += amount,
            TransactionKind::Expense => self.expenses += amount,
            TransactionKind::Savings => self.savings += amount,
        }
    }
}

/// Aggregate window over a set of transactions.
///
/// All monetary fields are major units. `net_balance` is income minus
/// expenses; savings represent money set aside, not spent, and are excluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_savings: Decimal,
    pub net_balance: Decimal,
    pub category_breakdown: HashMap<String, Decimal>,
    pub monthly_trends: Vec<MonthlySummary>,
}

impl TransactionStats {
    /// Folds a transaction snapshot into an aggregate window.
    ///
    /// A single pass producing an immutable record: kind totals, category
    /// breakdown, and the month-bucketed trend series, emitted in ascending
    /// `YYYY-MM` order with exactly one entry per month seen. An empty input
    /// yields all-zero aggregates.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut total_income = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;
        let mut total_savings = Decimal::ZERO;
        let mut category_breakdown: HashMap<String, Decimal> = HashMap::new();
        let mut by_month: BTreeMap<String, MonthlySummary> = BTreeMap::new();

        for transaction in transactions {
            let amount = transaction.amount_major();

            match transaction.kind {
                TransactionKind::Income => total_income += amount,
                TransactionKind::Expense => total_expenses += amount,
                TransactionKind::Savings => total_savings += amount,
            }

            *category_breakdown
                .entry(transaction.category.clone())
                .or_insert(Decimal::ZERO) += amount;

            let month_key = transaction.month_key();
            by_month
                .entry(month_key.clone())
                .or_insert_with(|| MonthlySummary::new(month_key))
                .add(transaction.kind, amount);
        }

        TransactionStats {
            total_income,
            total_expenses,
            total_savings,
            net_balance: total_income - total_expenses,
            category_breakdown,
            monthly_trends: by_month.into_values().collect(),
        }
    }
}
