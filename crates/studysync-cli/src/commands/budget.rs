//! Budget ledger commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use studysync_core::{BudgetCategory, NewTransaction, TransactionKind};

use super::{CmdResult, Session};

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Record a credit or debit
    Add {
        /// credit or debit
        kind: TransactionKind,
        /// Amount, positive
        amount: f64,
        /// What it was for
        #[arg(long)]
        reason: String,
        /// Category (allowance, income, books, food, transport, entertainment, other)
        #[arg(long, default_value = "other")]
        category: BudgetCategory,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = super::parse_date)]
        date: Option<NaiveDate>,
    },
    /// List transactions, newest first
    List,
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
    /// Balance and per-category totals
    Balance,
}

pub fn run(action: BudgetAction, today: Option<NaiveDate>) -> CmdResult {
    let mut session = Session::open(today)?;
    let ws = &mut session.workspace;
    let currency = ws.config().currency.clone();

    match action {
        BudgetAction::Add {
            kind,
            amount,
            reason,
            category,
            date,
        } => {
            let date = date.unwrap_or_else(|| ws.today());
            let transaction = ws.add_transaction(NewTransaction {
                date,
                amount,
                kind,
                reason,
                category,
            })?;
            println!("Transaction recorded: {}", transaction.id);
        }
        BudgetAction::List => return super::print_json(ws.ledger().list()),
        BudgetAction::Delete { id } => {
            let transaction = ws.delete_transaction(&id)?;
            println!("Transaction deleted: {}", transaction.id);
        }
        BudgetAction::Balance => {
            let ledger = ws.ledger();
            println!("Credits:  {currency}{:.2}", ledger.total_credits());
            println!("Debits:   {currency}{:.2}", ledger.total_debits());
            println!("Balance:  {currency}{:.2}", ledger.balance());
            for total in ledger.totals_by_category() {
                println!(
                    "  {:<18} +{currency}{:.2} -{currency}{:.2}",
                    total.category.label(),
                    total.credits,
                    total.debits
                );
            }
            return Ok(());
        }
    }

    session.save()
}
