//! Budget ledger: credits, debits and running totals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Result, StoreError, ValidationError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Credit,
    Debit,
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "credit" => Ok(TransactionKind::Credit),
            "debit" => Ok(TransactionKind::Debit),
            other => Err(ValidationError::invalid(
                "kind",
                format!("expected credit or debit, got '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Allowance,
    Income,
    Books,
    Food,
    Transport,
    Entertainment,
    Other,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 7] = [
        BudgetCategory::Allowance,
        BudgetCategory::Income,
        BudgetCategory::Books,
        BudgetCategory::Food,
        BudgetCategory::Transport,
        BudgetCategory::Entertainment,
        BudgetCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetCategory::Allowance => "allowance",
            BudgetCategory::Income => "income",
            BudgetCategory::Books => "books",
            BudgetCategory::Food => "food",
            BudgetCategory::Transport => "transport",
            BudgetCategory::Entertainment => "entertainment",
            BudgetCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetCategory::Allowance => "Allowance",
            BudgetCategory::Income => "Part-time Income",
            BudgetCategory::Books => "Books & Supplies",
            BudgetCategory::Food => "Food & Dining",
            BudgetCategory::Transport => "Transportation",
            BudgetCategory::Entertainment => "Entertainment",
            BudgetCategory::Other => "Other",
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        BudgetCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| ValidationError::invalid("category", format!("unknown category '{s}'")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub kind: TransactionKind,
    pub reason: String,
    pub category: BudgetCategory,
}

impl Transaction {
    /// Amount with its sign applied: credits positive, debits negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Credit => self.amount,
            TransactionKind::Debit => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub kind: TransactionKind,
    pub reason: String,
    pub category: BudgetCategory,
}

/// Per-category credit and debit sums.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: BudgetCategory,
    pub credits: f64,
    pub debits: f64,
}

/// Transactions, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a transaction.
    ///
    /// # Errors
    /// Returns a validation error if the amount is not a positive finite
    /// number or the reason is blank.
    pub fn add(&mut self, draft: NewTransaction) -> Result<&Transaction> {
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(ValidationError::invalid(
                "amount",
                format!("must be a positive number, got {}", draft.amount),
            )
            .into());
        }
        if draft.reason.trim().is_empty() {
            return Err(ValidationError::MissingField("reason").into());
        }

        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            date: draft.date,
            amount: draft.amount,
            kind: draft.kind,
            reason: draft.reason,
            category: draft.category,
        };
        tracing::debug!(id = %transaction.id, amount = transaction.amount, "transaction added");
        self.transactions.insert(0, transaction);
        Ok(&self.transactions[0])
    }

    pub fn delete(&mut self, id: &str) -> Result<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("Transaction", id))?;
        Ok(self.transactions.remove(index))
    }

    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Credits minus debits.
    pub fn balance(&self) -> f64 {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    pub fn total_credits(&self) -> f64 {
        self.sum_of(TransactionKind::Credit)
    }

    pub fn total_debits(&self) -> f64 {
        self.sum_of(TransactionKind::Debit)
    }

    fn sum_of(&self, kind: TransactionKind) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    }

    /// Totals for every category that has at least one transaction, in
    /// category order.
    pub fn totals_by_category(&self) -> Vec<CategoryTotal> {
        BudgetCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let mut seen = false;
                let mut total = CategoryTotal {
                    category,
                    credits: 0.0,
                    debits: 0.0,
                };
                for t in self.transactions.iter().filter(|t| t.category == category) {
                    seen = true;
                    match t.kind {
                        TransactionKind::Credit => total.credits += t.amount,
                        TransactionKind::Debit => total.debits += t.amount,
                    }
                }
                seen.then_some(total)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(amount: f64, kind: TransactionKind, category: BudgetCategory) -> NewTransaction {
        NewTransaction {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            amount,
            kind,
            reason: "test".to_string(),
            category,
        }
    }

    fn sample() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .add(draft(500.0, TransactionKind::Credit, BudgetCategory::Allowance))
            .unwrap();
        ledger
            .add(draft(45.0, TransactionKind::Debit, BudgetCategory::Books))
            .unwrap();
        ledger
            .add(draft(25.0, TransactionKind::Debit, BudgetCategory::Food))
            .unwrap();
        ledger
            .add(draft(200.0, TransactionKind::Credit, BudgetCategory::Income))
            .unwrap();
        ledger
    }

    #[test]
    fn totals() {
        let ledger = sample();
        assert_eq!(ledger.total_credits(), 700.0);
        assert_eq!(ledger.total_debits(), 70.0);
        assert_eq!(ledger.balance(), 630.0);
    }

    #[test]
    fn newest_first() {
        let ledger = sample();
        assert_eq!(ledger.list()[0].amount, 200.0);
        assert_eq!(ledger.list()[3].amount, 500.0);
    }

    #[test]
    fn rejects_non_positive_amount() {
        let mut ledger = Ledger::new();
        assert!(ledger
            .add(draft(0.0, TransactionKind::Debit, BudgetCategory::Food))
            .is_err());
        assert!(ledger
            .add(draft(f64::INFINITY, TransactionKind::Debit, BudgetCategory::Food))
            .is_err());
        assert!(ledger.list().is_empty());
    }

    #[test]
    fn delete_updates_balance() {
        let mut ledger = sample();
        let id = ledger.list()[0].id.clone();
        ledger.delete(&id).unwrap();
        assert_eq!(ledger.balance(), 430.0);
        assert!(ledger.delete(&id).is_err());
    }

    #[test]
    fn category_breakdown_skips_unused() {
        let totals = sample().totals_by_category();
        assert_eq!(totals.len(), 4);
        assert_eq!(totals[0].category, BudgetCategory::Allowance);
        assert_eq!(totals[0].credits, 500.0);
        assert!(totals.iter().all(|t| t.category != BudgetCategory::Transport));
    }

    #[test]
    fn parses_categories() {
        assert_eq!("Books".parse::<BudgetCategory>().unwrap(), BudgetCategory::Books);
        assert!("rent".parse::<BudgetCategory>().is_err());
        assert_eq!(BudgetCategory::Income.label(), "Part-time Income");
    }
}
