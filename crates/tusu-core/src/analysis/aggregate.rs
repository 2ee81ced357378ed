//! Category aggregation

use std::collections::HashMap;

use crate::models::{CategorySpending, Transaction};

/// Group transactions by category, summing amounts and counting entries
///
/// Categories are keyed exactly as given (case-sensitive, untrimmed).
pub fn aggregate_by_category(transactions: &[Transaction]) -> HashMap<String, CategorySpending> {
    let mut categories: HashMap<String, CategorySpending> = HashMap::new();

    for tx in transactions {
        categories
            .entry(tx.category.clone())
            .and_modify(|spending| {
                spending.total_amount += tx.amount;
                spending.transaction_count += 1;
            })
            .or_insert_with(|| CategorySpending {
                category: tx.category.clone(),
                total_amount: tx.amount,
                transaction_count: 1,
            });
    }

    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(category: &str, amount: f64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            "test",
            category,
            amount,
            "TRY",
        )
    }

    #[test]
    fn test_sums_and_counts_per_category() {
        let spending = aggregate_by_category(&[
            tx("Dining", 150.0),
            tx("Dining", 200.0),
            tx("Shopping", 80.0),
            tx("Dining", 5000.0),
        ]);

        assert_eq!(spending.len(), 2);
        let dining = &spending["Dining"];
        assert_eq!(dining.total_amount, 5350.0);
        assert_eq!(dining.transaction_count, 3);
        assert_eq!(spending["Shopping"].transaction_count, 1);
    }

    #[test]
    fn test_categories_are_case_sensitive() {
        let spending = aggregate_by_category(&[tx("dining", 10.0), tx("Dining", 20.0)]);
        assert_eq!(spending.len(), 2);
        assert_eq!(spending["dining"].total_amount, 10.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_by_category(&[]).is_empty());
    }
}
