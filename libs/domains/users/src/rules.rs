//! Field rules for registration bodies.

use axum_helpers::validation::{Rule, RuleSet};

pub static REGISTRATION_RULES: RuleSet = RuleSet::new(&[
    ("email", &[Rule::Email, Rule::Required]),
    ("username", &[Rule::MinLength(4), Rule::Required]),
    ("password", &[Rule::MinLength(8), Rule::Required]),
]);
