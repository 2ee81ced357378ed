//! Known expense categories and their placeholder baselines

use std::collections::BTreeMap;

/// Categories offered to clients when labelling transactions
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Utilities",
    "Groceries",
    "Healthcare",
    "Education",
    "Travel",
    "Other",
];

/// Average monthly spending used until real history is recorded
const DEFAULT_BASELINES: &[(&str, f64)] = &[
    ("Dining", 3000.0),
    ("Transportation", 2000.0),
    ("Shopping", 4000.0),
    ("Entertainment", 1500.0),
    ("Utilities", 1000.0),
    ("Groceries", 2500.0),
];

pub fn expense_categories() -> Vec<String> {
    EXPENSE_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

pub fn default_baselines() -> BTreeMap<String, f64> {
    DEFAULT_BASELINES
        .iter()
        .map(|(category, amount)| (category.to_string(), *amount))
        .collect()
}
