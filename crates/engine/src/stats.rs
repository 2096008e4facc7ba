//! Balance and monthly rollups computed from the current state.
//!
//! Records referencing a deleted account or category are left out of every
//! view.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::{Account, MoneyCents, ResultEngine, Transaction, error::overflow, state::State};

/// Amounts keyed by month, `YYYY-MM`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    pub by_month: BTreeMap<String, MoneyCents>,
}

impl MonthlyTotals {
    fn add(&mut self, date: NaiveDate, amount: MoneyCents) -> ResultEngine<()> {
        let total = self
            .by_month
            .entry(date.format("%Y-%m").to_string())
            .or_default();
        *total = total
            .checked_add(amount)
            .ok_or_else(|| overflow("monthly total"))?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub initial_balance: MoneyCents,
    pub current_balance: MoneyCents,
    pub income: MonthlyTotals,
    pub expenses: MonthlyTotals,
}

impl Summary {
    fn new(initial_balance: MoneyCents) -> Self {
        Self {
            initial_balance,
            current_balance: initial_balance,
            ..Default::default()
        }
    }

    fn credit(&mut self, amount: MoneyCents) -> ResultEngine<()> {
        self.current_balance = credit(self.current_balance, amount)?;
        Ok(())
    }

    fn debit(&mut self, amount: MoneyCents) -> ResultEngine<()> {
        self.current_balance = debit(self.current_balance, amount)?;
        Ok(())
    }

    fn income(&mut self, income: &Transaction) -> ResultEngine<()> {
        self.credit(income.amount)?;
        self.income.add(income.transaction_date, income.amount)
    }

    fn expense(&mut self, expense: &Transaction) -> ResultEngine<()> {
        self.debit(expense.amount)?;
        self.expenses.add(expense.transaction_date, expense.amount)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub global: Summary,
    pub per_account: BTreeMap<Uuid, Summary>,
    pub per_category: BTreeMap<Uuid, Summary>,
}

impl Statistics {
    /// Aggregate `state` in a single pass over each collection.
    ///
    /// Fails with [`EngineError::Fatal`](crate::EngineError::Fatal) when a
    /// total does not fit in [`MoneyCents`].
    pub fn compute(state: &State) -> ResultEngine<Self> {
        let initial_balance = state
            .accounts
            .values()
            .try_fold(MoneyCents::ZERO, |total, account| {
                credit(total, account.initial_balance)
            })?;
        let mut stats = Self {
            global: Summary::new(initial_balance),
            ..Default::default()
        };

        for income in state.income.values() {
            let Some(initial_balance) = account_seed(state, income) else {
                continue;
            };
            stats.global.income(income)?;
            stats
                .per_account
                .entry(income.account_id)
                .or_insert_with(|| Summary::new(initial_balance))
                .income(income)?;
            stats
                .per_category
                .entry(income.category_id)
                .or_default()
                .income(income)?;
        }

        for expense in state.expenses.values() {
            let Some(initial_balance) = account_seed(state, expense) else {
                continue;
            };
            stats.global.expense(expense)?;
            stats
                .per_account
                .entry(expense.account_id)
                .or_insert_with(|| Summary::new(initial_balance))
                .expense(expense)?;
            stats
                .per_category
                .entry(expense.category_id)
                .or_default()
                .expense(expense)?;
        }

        for transfer in state.transfers.values() {
            let (Some(from), Some(to)) = (
                state.accounts.get(&transfer.from_id),
                state.accounts.get(&transfer.to_id),
            ) else {
                continue;
            };
            stats
                .per_account
                .entry(from.id)
                .or_insert_with(|| Summary::new(from.initial_balance))
                .debit(transfer.amount)?;
            stats
                .per_account
                .entry(to.id)
                .or_insert_with(|| Summary::new(to.initial_balance))
                .credit(transfer.amount)?;
        }

        Ok(stats)
    }
}

/// Current balance of `account`.
///
/// Counts every record booked on the account, including those whose
/// category no longer exists.
pub(crate) fn account_balance(state: &State, account: &Account) -> ResultEngine<MoneyCents> {
    let id = account.id;
    let mut balance = account.initial_balance;
    for income in state.income.values().filter(|income| income.account_id == id) {
        balance = credit(balance, income.amount)?;
    }
    for expense in state.expenses.values().filter(|expense| expense.account_id == id) {
        balance = debit(balance, expense.amount)?;
    }
    for transfer in state.transfers.values().filter(|transfer| transfer.touches(id)) {
        if transfer.from_id == id {
            balance = debit(balance, transfer.amount)?;
        }
        if transfer.to_id == id {
            balance = credit(balance, transfer.amount)?;
        }
    }
    Ok(balance)
}

fn credit(balance: MoneyCents, amount: MoneyCents) -> ResultEngine<MoneyCents> {
    balance.checked_add(amount).ok_or_else(|| overflow("balance"))
}

fn debit(balance: MoneyCents, amount: MoneyCents) -> ResultEngine<MoneyCents> {
    balance.checked_sub(amount).ok_or_else(|| overflow("balance"))
}

/// Initial balance of the account `transaction` belongs to, `None` when
/// the account or the category no longer exists.
fn account_seed(state: &State, transaction: &Transaction) -> Option<MoneyCents> {
    state.categories.get(&transaction.category_id)?;
    state
        .accounts
        .get(&transaction.account_id)
        .map(|account| account.initial_balance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Transfer};

    fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, month, day).unwrap()
    }

    fn account(state: &mut State, initial: i64) -> Uuid {
        let account = Account {
            id: Uuid::now_v7(),
            name: "account".to_string(),
            initial_balance: MoneyCents::new(initial),
        };
        let id = account.id;
        state.accounts.insert(id, account);
        id
    }

    fn category(state: &mut State) -> Uuid {
        let category = Category {
            id: Uuid::now_v7(),
            name: "category".to_string(),
        };
        let id = category.id;
        state.categories.insert(id, category);
        id
    }

    fn transaction(account_id: Uuid, category_id: Uuid, amount: i64, date: NaiveDate) -> Transaction {
        Transaction {
            id: Uuid::now_v7(),
            amount: MoneyCents::new(amount),
            account_id,
            category_id,
            transaction_date: date,
            description: None,
        }
    }

    #[test]
    fn empty_state() {
        let stats = Statistics::compute(&State::default()).unwrap();
        assert_eq!(stats.global, Summary::default());
        assert!(stats.per_account.is_empty());
        assert!(stats.per_category.is_empty());
    }

    #[test]
    fn buckets_by_month_and_moves_balances() {
        let mut state = State::default();
        let a = account(&mut state, 500);
        let b = account(&mut state, 0);
        let salary = category(&mut state);
        let food = category(&mut state);

        for tx in [
            transaction(a, salary, 1000, day(6, 1)),
            transaction(a, salary, 300, day(7, 1)),
        ] {
            state.income.insert(tx.id, tx);
        }
        let expense = transaction(a, food, 250, day(6, 15));
        state.expenses.insert(expense.id, expense);
        let transfer = Transfer {
            id: Uuid::now_v7(),
            amount: MoneyCents::new(100),
            from_id: a,
            to_id: b,
            transaction_date: day(6, 20),
        };
        state.transfers.insert(transfer.id, transfer);

        let stats = Statistics::compute(&state).unwrap();

        assert_eq!(stats.global.initial_balance, MoneyCents::new(500));
        assert_eq!(stats.global.current_balance, MoneyCents::new(1550));
        assert_eq!(stats.global.income.by_month["2020-06"], MoneyCents::new(1000));
        assert_eq!(stats.global.income.by_month["2020-07"], MoneyCents::new(300));
        assert_eq!(stats.global.expenses.by_month["2020-06"], MoneyCents::new(250));

        assert_eq!(stats.per_account[&a].current_balance, MoneyCents::new(1450));
        assert_eq!(stats.per_account[&b].initial_balance, MoneyCents::ZERO);
        assert_eq!(stats.per_account[&b].current_balance, MoneyCents::new(100));
        assert!(stats.per_account[&b].income.by_month.is_empty());

        assert_eq!(stats.per_category[&salary].initial_balance, MoneyCents::ZERO);
        assert_eq!(stats.per_category[&salary].current_balance, MoneyCents::new(1300));
        assert_eq!(stats.per_category[&food].current_balance, MoneyCents::new(-250));
    }

    #[test]
    fn orphans_are_skipped() {
        let mut state = State::default();
        let a = account(&mut state, 100);
        let salary = category(&mut state);
        let orphan = transaction(a, Uuid::now_v7(), 1000, day(6, 1));
        state.income.insert(orphan.id, orphan);
        let orphan = transaction(Uuid::now_v7(), salary, 1000, day(6, 1));
        state.expenses.insert(orphan.id, orphan);

        let stats = Statistics::compute(&state).unwrap();
        assert_eq!(stats.global.current_balance, MoneyCents::new(100));
        assert!(stats.global.income.by_month.is_empty());
        assert!(stats.per_account.is_empty());
        assert!(stats.per_category.is_empty());
    }

    #[test]
    fn wire_shape() {
        let stats = Statistics::compute(&State::default()).unwrap();
        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "global": {
                    "initialBalance": 0,
                    "currentBalance": 0,
                    "income": {"byMonth": {}},
                    "expenses": {"byMonth": {}},
                },
                "perAccount": {},
                "perCategory": {},
            })
        );
    }

    #[test]
    fn overflowing_totals_fail_instead_of_wrapping() {
        let mut state = State::default();
        account(&mut state, i64::MAX);
        account(&mut state, 1);
        assert!(Statistics::compute(&state).unwrap_err().is_fatal());

        let mut state = State::default();
        let a = account(&mut state, i64::MAX);
        let salary = category(&mut state);
        let income = transaction(a, salary, 1, day(6, 1));
        state.income.insert(income.id, income);
        assert_eq!(
            Statistics::compute(&state),
            Err(crate::EngineError::Fatal("balance is out of range".to_string()))
        );
        let account = &state.accounts[&a];
        assert!(account_balance(&state, account).unwrap_err().is_fatal());
    }

    #[test]
    fn account_balance_counts_orphaned_categories() {
        let mut state = State::default();
        let a = account(&mut state, 500);
        let b = account(&mut state, 0);
        let income = transaction(a, Uuid::now_v7(), 1000, day(6, 1));
        state.income.insert(income.id, income);
        let expense = transaction(a, Uuid::now_v7(), 300, day(6, 2));
        state.expenses.insert(expense.id, expense);
        for (from_id, to_id, amount) in [(a, b, 200), (b, b, 50)] {
            let transfer = Transfer {
                id: Uuid::now_v7(),
                amount: MoneyCents::new(amount),
                from_id,
                to_id,
                transaction_date: day(6, 3),
            };
            state.transfers.insert(transfer.id, transfer);
        }

        assert_eq!(
            account_balance(&state, &state.accounts[&a]).unwrap(),
            MoneyCents::new(1000)
        );
        assert_eq!(
            account_balance(&state, &state.accounts[&b]).unwrap(),
            MoneyCents::new(200)
        );
    }
}
