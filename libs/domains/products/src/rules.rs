//! Field rules for product bodies.

use axum_helpers::validation::{Rule, RuleSet};

/// Evaluated in this order; within a field, rules run left to right.
pub static PRODUCT_RULES: RuleSet = RuleSet::new(&[
    ("name", &[Rule::MinLength(4), Rule::Required]),
    ("description", &[Rule::MinLength(4), Rule::Required]),
    ("price", &[Rule::Required]),
    ("quantity", &[Rule::Required]),
]);
