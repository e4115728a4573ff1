//! Rule-table validation of untyped JSON request bodies.
//!
//! A [`RuleSet`] is a static table of `(field, rules)` pairs. Validation walks the
//! table in order and collects every failure into [`Violations`], an ordered
//! list of `(field, message)` pairs. An empty list means the input is accepted.
//!
//! ```rust
//! use axum_helpers::validation::{Rule, RuleSet};
//! use serde_json::json;
//!
//! static RULES: RuleSet = RuleSet::new(&[
//!     ("name", &[Rule::MinLength(4), Rule::Required]),
//!     ("email", &[Rule::Email, Rule::Required]),
//! ]);
//!
//! let input = json!({"name": "Pen", "email": "pen@example.com"});
//! let violations = RULES.validate(input.as_object().unwrap());
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations.iter().next().unwrap().field, "name");
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;
use validator::ValidateEmail;

pub const BLANK: &str = "This value should not be blank.";
pub const MISSING: &str = "This field is missing.";
pub const INVALID_EMAIL: &str = "This value is not a valid email address.";
pub const NOT_A_STRING: &str = "This value should be of type string.";
pub const NOT_AN_INTEGER: &str = "This value should be a valid integer.";
pub const EXTRA_FIELD: &str = "This field was not expected.";

/// A single field constraint. Each variant knows its predicate and its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Present and not blank (`null`, `""`, `false`, `[]`, `{}` are blank).
    Required,
    /// At least N characters. `null` is left to [`Rule::Required`]; booleans
    /// measure as `"1"` and `""`.
    MinLength(usize),
    /// Email syntax. `null` and `""` are left to [`Rule::Required`].
    Email,
}

impl Rule {
    /// Returns the violation message when `value` breaks the rule.
    pub fn check(&self, value: &Value) -> Option<String> {
        match self {
            Rule::Required => is_blank(value).then(|| BLANK.to_string()),
            Rule::MinLength(min) => match scalar_text(value) {
                Scalar::Absent => None,
                Scalar::Text(text) if text.chars().count() < *min => Some(too_short(*min)),
                Scalar::Text(_) => None,
                Scalar::Composite => Some(NOT_A_STRING.to_string()),
            },
            Rule::Email => match scalar_text(value) {
                Scalar::Absent => None,
                Scalar::Text(text) if text.is_empty() => None,
                Scalar::Text(text) if text.as_str().validate_email() => None,
                Scalar::Text(_) => Some(INVALID_EMAIL.to_string()),
                Scalar::Composite => Some(NOT_A_STRING.to_string()),
            },
        }
    }
}

fn too_short(min: usize) -> String {
    if min == 1 {
        "This value is too short. It should have 1 character or more.".to_string()
    } else {
        format!("This value is too short. It should have {min} characters or more.")
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) => false,
    }
}

enum Scalar {
    Absent,
    Text(String),
    Composite,
}

fn scalar_text(value: &Value) -> Scalar {
    match value {
        Value::Null => Scalar::Absent,
        Value::String(s) => Scalar::Text(s.clone()),
        Value::Number(n) => Scalar::Text(n.to_string()),
        Value::Bool(true) => Scalar::Text("1".to_string()),
        Value::Bool(false) => Scalar::Text(String::new()),
        Value::Array(_) | Value::Object(_) => Scalar::Composite,
    }
}

/// Ordered table of field rules.
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    fields: &'static [(&'static str, &'static [Rule])],
}

impl RuleSet {
    pub const fn new(fields: &'static [(&'static str, &'static [Rule])]) -> Self {
        Self { fields }
    }

    /// Field names in table order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(field, _)| *field)
    }

    /// Evaluate every rule against `input`.
    ///
    /// A missing key yields a single [`MISSING`] violation when the field is
    /// [`Rule::Required`], and skips the field's other rules. Every key not in
    /// the table is reported with [`EXTRA_FIELD`] after the table's own rules.
    pub fn validate(&self, input: &Map<String, Value>) -> Violations {
        let mut violations = Violations::new();

        for (field, rules) in self.fields {
            match input.get(*field) {
                None => {
                    if rules.contains(&Rule::Required) {
                        violations.push(*field, MISSING);
                    }
                }
                Some(value) => {
                    for rule in rules.iter() {
                        if let Some(message) = rule.check(value) {
                            violations.push(*field, message);
                        }
                    }
                }
            }
        }

        for key in input.keys() {
            if !self.fields.iter().any(|(field, _)| *field == key.as_str()) {
                violations.push(key.as_str(), EXTRA_FIELD);
            }
        }

        violations
    }
}

/// One field-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

/// Ordered collection of field-level failures.
///
/// Serializes as `{field: [messages...]}`, fields in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} validation violation(s)", .0.len())]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(Violation {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// `Ok(value)` when empty, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, Violations> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }

    /// Messages grouped by field, preserving order.
    pub fn field_errors(&self) -> Vec<(&str, Vec<&str>)> {
        let mut grouped: Vec<(&str, Vec<&str>)> = Vec::new();
        for violation in &self.0 {
            match grouped.iter_mut().find(|(field, _)| *field == violation.field) {
                Some((_, messages)) => messages.push(&violation.message),
                None => grouped.push((&violation.field, vec![&violation.message])),
            }
        }
        grouped
    }

    /// Messages for a single field.
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|v| v.field == field)
            .map(|v| v.message.as_str())
            .collect()
    }

    /// JSON object `{field: message}`; when a field has several messages the last one wins.
    pub fn to_message_json(&self) -> String {
        let mut map = Map::new();
        for violation in &self.0 {
            map.insert(
                violation.field.clone(),
                Value::String(violation.message.clone()),
            );
        }
        Value::Object(map).to_string()
    }
}

impl Serialize for Violations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let grouped = self.field_errors();
        let mut map = serializer.serialize_map(Some(grouped.len()))?;
        for (field, messages) in grouped {
            map.serialize_entry(field, &messages)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static PRODUCT: RuleSet = RuleSet::new(&[
        ("name", &[Rule::MinLength(4), Rule::Required]),
        ("description", &[Rule::MinLength(4), Rule::Required]),
        ("price", &[Rule::Required]),
        ("quantity", &[Rule::Required]),
    ]);

    static USER: RuleSet = RuleSet::new(&[
        ("email", &[Rule::Email, Rule::Required]),
        ("username", &[Rule::MinLength(4), Rule::Required]),
        ("password", &[Rule::MinLength(8), Rule::Required]),
    ]);

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_valid_product_has_no_violations() {
        let input = object(json!({
            "name": "Fountain pen",
            "description": "Blue ink",
            "price": "1.50",
            "quantity": 100
        }));
        assert!(PRODUCT.validate(&input).is_empty());
    }

    #[test]
    fn test_empty_name_reports_length_then_blank() {
        let input = object(json!({
            "name": "",
            "description": "x",
            "price": "1",
            "quantity": 1
        }));
        let violations = PRODUCT.validate(&input);

        assert_eq!(
            violations.messages_for("name"),
            vec![
                "This value is too short. It should have 4 characters or more.",
                BLANK
            ]
        );
        assert_eq!(
            violations.messages_for("description"),
            vec!["This value is too short. It should have 4 characters or more."]
        );
        assert!(violations.messages_for("price").is_empty());
    }

    #[test]
    fn test_missing_fields_are_reported_once() {
        let violations = PRODUCT.validate(&Map::new());
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();

        assert_eq!(fields, vec!["name", "description", "price", "quantity"]);
        assert!(violations.iter().all(|v| v.message == MISSING));
    }

    #[test]
    fn test_null_is_blank_but_not_short() {
        let input = object(json!({"name": null, "description": "Blue ink", "price": null, "quantity": 0}));
        let violations = PRODUCT.validate(&input);

        assert_eq!(violations.messages_for("name"), vec![BLANK]);
        assert_eq!(violations.messages_for("price"), vec![BLANK]);
        assert!(violations.messages_for("quantity").is_empty());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let input = object(json!({"name": "Café", "description": "Crème", "price": "2", "quantity": 1}));
        assert!(PRODUCT.validate(&input).is_empty());
    }

    #[test]
    fn test_numbers_are_measured_as_text() {
        assert_eq!(Rule::MinLength(4).check(&json!(12345)), None);
        assert!(Rule::MinLength(4).check(&json!(12)).is_some());
    }

    #[test]
    fn test_composite_values_are_not_strings() {
        assert_eq!(
            Rule::MinLength(4).check(&json!(["a", "b"])),
            Some(NOT_A_STRING.to_string())
        );
        assert_eq!(
            Rule::Email.check(&json!({"a": 1})),
            Some(NOT_A_STRING.to_string())
        );
    }

    #[test]
    fn test_user_rules() {
        let input = object(json!({
            "email": "not-an-email",
            "username": "bob",
            "password": "short"
        }));
        let violations = USER.validate(&input);

        assert_eq!(violations.messages_for("email"), vec![INVALID_EMAIL]);
        assert_eq!(violations.messages_for("username").len(), 1);
        assert_eq!(
            violations.messages_for("password"),
            vec!["This value is too short. It should have 8 characters or more."]
        );
    }

    #[test]
    fn test_empty_email_is_only_blank() {
        let input = object(json!({"email": "", "username": "alice", "password": "correct horse"}));
        let violations = USER.validate(&input);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations.messages_for("email"), vec![BLANK]);
    }

    #[test]
    fn test_unexpected_keys_are_rejected() {
        let input = object(json!({
            "email": "alice@example.com",
            "username": "alice",
            "password": "correct horse",
            "role": "admin"
        }));
        let violations = USER.validate(&input);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations.messages_for("role"), vec![EXTRA_FIELD]);
    }

    #[test]
    fn test_unexpected_keys_come_after_table_rules() {
        let input = object(json!({
            "id": 77,
            "name": "Pen",
            "description": "Blue ink",
            "price": "1.50",
            "quantity": 1
        }));
        let violations = PRODUCT.validate(&input);
        let fields: Vec<&str> = violations
            .iter()
            .map(|v| v.field.as_str())
            .collect();

        assert_eq!(fields, vec!["name", "id"]);
    }

    #[test]
    fn test_booleans_measure_as_one_or_empty() {
        assert_eq!(
            Rule::MinLength(4).check(&json!(true)),
            Some("This value is too short. It should have 4 characters or more.".to_string())
        );

        let input = object(json!({"name": false, "description": "Blue ink", "price": "1", "quantity": 1}));
        assert_eq!(
            PRODUCT.validate(&input).messages_for("name"),
            vec![
                "This value is too short. It should have 4 characters or more.",
                BLANK
            ]
        );
    }

    #[test]
    fn test_serializes_grouped_in_first_appearance_order() {
        let mut violations = Violations::new();
        violations.push("name", "first");
        violations.push("price", "second");
        violations.push("name", "third");

        let encoded = serde_json::to_string(&violations).unwrap();
        assert_eq!(encoded, r#"{"name":["first","third"],"price":["second"]}"#);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Violations::new().into_result(7), Ok(7));

        let mut violations = Violations::new();
        violations.push("quantity", NOT_AN_INTEGER);
        assert!(violations.into_result(7).is_err());
    }

    #[test]
    fn test_singular_length_message() {
        assert_eq!(
            Rule::MinLength(1).check(&json!("")),
            Some("This value is too short. It should have 1 character or more.".to_string())
        );
    }
}
