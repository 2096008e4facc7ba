//! Filters for the list selectors of dated records.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{Transaction, Transfer};

/// Restricts the result of a list selector.
///
/// Date bounds are inclusive. An absent id set means no restriction, a
/// present but empty one matches nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub account_ids: Option<BTreeSet<Uuid>>,
    pub category_ids: Option<BTreeSet<Uuid>>,
}

impl ListQuery {
    fn in_range(&self, date: NaiveDate) -> bool {
        self.from_date.is_none_or(|from| date >= from) && self.to_date.is_none_or(|to| date <= to)
    }

    pub(crate) fn matches_transaction(&self, transaction: &Transaction) -> bool {
        self.in_range(transaction.transaction_date)
            && contains(&self.account_ids, transaction.account_id)
            && contains(&self.category_ids, transaction.category_id)
    }

    /// Transfers have no category: `category_ids` is ignored.
    pub(crate) fn matches_transfer(&self, transfer: &Transfer) -> bool {
        self.in_range(transfer.transaction_date)
            && self
                .account_ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&transfer.from_id) || ids.contains(&transfer.to_id))
    }
}

fn contains(ids: &Option<BTreeSet<Uuid>>, id: Uuid) -> bool {
    ids.as_ref().is_none_or(|ids| ids.contains(&id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoneyCents;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 6, d).unwrap()
    }

    fn income(account_id: Uuid, category_id: Uuid, date: NaiveDate) -> Transaction {
        Transaction {
            id: Uuid::now_v7(),
            amount: MoneyCents::new(100),
            account_id,
            category_id,
            transaction_date: date,
            description: None,
        }
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let record = income(Uuid::now_v7(), Uuid::now_v7(), day(10));
        let query = ListQuery {
            from_date: Some(day(10)),
            to_date: Some(day(10)),
            ..Default::default()
        };
        assert!(query.matches_transaction(&record));
        let query = ListQuery {
            from_date: Some(day(11)),
            ..Default::default()
        };
        assert!(!query.matches_transaction(&record));
    }

    #[test]
    fn empty_set_matches_nothing() {
        let record = income(Uuid::now_v7(), Uuid::now_v7(), day(1));
        assert!(ListQuery::default().matches_transaction(&record));
        let query = ListQuery {
            account_ids: Some(BTreeSet::new()),
            ..Default::default()
        };
        assert!(!query.matches_transaction(&record));
    }

    #[test]
    fn transfers_match_either_side_and_ignore_categories() {
        let (a, b, c) = (Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7());
        let transfer = Transfer {
            id: Uuid::now_v7(),
            amount: MoneyCents::new(100),
            from_id: a,
            to_id: b,
            transaction_date: day(2),
        };
        let to_side = ListQuery {
            account_ids: Some(BTreeSet::from([b])),
            category_ids: Some(BTreeSet::new()),
            ..Default::default()
        };
        assert!(to_side.matches_transfer(&transfer));
        let elsewhere = ListQuery {
            account_ids: Some(BTreeSet::from([c])),
            ..Default::default()
        };
        assert!(!elsewhere.matches_transfer(&transfer));
    }
}
