use axum_helpers::validation::{MISSING, NOT_AN_INTEGER, NOT_A_STRING};
use axum_helpers::Violations;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Stored product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Server-generated identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Fountain pen")]
    pub name: String,
    #[schema(example = "Blue ink, steel nib")]
    pub description: String,
    /// Decimal amount kept as text
    #[schema(example = "1.50")]
    pub price: String,
    #[schema(example = 100)]
    pub quantity: i32,
}

impl Product {
    /// Replacement value: same id, every business field taken from `input`.
    pub fn with_input(self, input: ProductInput) -> Product {
        Product {
            id: self.id,
            name: input.name,
            description: input.description,
            price: input.price,
            quantity: input.quantity,
        }
    }
}

/// Body of create and update requests, after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductInput {
    #[schema(example = "Fountain pen", min_length = 4)]
    pub name: String,
    #[schema(example = "Blue ink, steel nib", min_length = 4)]
    pub description: String,
    #[schema(example = "1.50")]
    pub price: String,
    #[schema(example = 100)]
    pub quantity: i32,
}

impl ProductInput {
    /// Convert an untyped body into typed fields.
    ///
    /// - `name`, `description`: strings; numbers and booleans become their text form
    /// - `price`: a string or a number, kept as text
    /// - `quantity`: an integer in `i32` range, or a string holding one
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, Violations> {
        let mut violations = Violations::new();

        let name = text(fields, "name", &mut violations);
        let description = text(fields, "description", &mut violations);
        let price = text(fields, "price", &mut violations);
        let quantity = integer(fields, "quantity", &mut violations);

        match (name, description, price, quantity) {
            (Some(name), Some(description), Some(price), Some(quantity))
                if violations.is_empty() =>
            {
                Ok(ProductInput {
                    name,
                    description,
                    price,
                    quantity,
                })
            }
            _ => Err(violations),
        }
    }
}

fn text(fields: &Map<String, Value>, field: &str, violations: &mut Violations) -> Option<String> {
    match fields.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(true)) => Some("1".to_string()),
        Some(Value::Bool(false)) => Some(String::new()),
        Some(_) => {
            violations.push(field, NOT_A_STRING);
            None
        }
        None => {
            violations.push(field, MISSING);
            None
        }
    }
}

fn integer(fields: &Map<String, Value>, field: &str, violations: &mut Violations) -> Option<i32> {
    let parsed = match fields.get(field) {
        Some(Value::Number(n)) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        Some(_) => None,
        None => {
            violations.push(field, MISSING);
            return None;
        }
    };

    if parsed.is_none() {
        violations.push(field, NOT_AN_INTEGER);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_from_fields_typed_values() {
        let input = ProductInput::from_fields(&fields(json!({
            "name": "Fountain pen",
            "description": "Blue ink",
            "price": "1.50",
            "quantity": 100
        })))
        .unwrap();

        assert_eq!(input.name, "Fountain pen");
        assert_eq!(input.price, "1.50");
        assert_eq!(input.quantity, 100);
    }

    #[test]
    fn test_from_fields_coerces_scalars() {
        let input = ProductInput::from_fields(&fields(json!({
            "name": 12345,
            "description": "Blue ink",
            "price": true,
            "quantity": "7"
        })))
        .unwrap();

        assert_eq!(input.name, "12345");
        assert_eq!(input.description, "Blue ink");
        assert_eq!(input.price, "1");
        assert_eq!(input.quantity, 7);
    }

    #[test]
    fn test_from_fields_rejects_non_integer_quantity() {
        for quantity in [json!("lots"), json!(1.5), json!(4_000_000_000_i64), json!([1])] {
            let err = ProductInput::from_fields(&fields(json!({
                "name": "Fountain pen",
                "description": "Blue ink",
                "price": "1.50",
                "quantity": quantity
            })))
            .unwrap_err();

            assert_eq!(err.messages_for("quantity"), vec![NOT_AN_INTEGER]);
        }
    }

    #[test]
    fn test_from_fields_rejects_composite_text() {
        let err = ProductInput::from_fields(&fields(json!({
            "name": {"en": "Pen"},
            "description": "Blue ink",
            "price": ["1.50"],
            "quantity": 1
        })))
        .unwrap_err();

        assert_eq!(err.messages_for("name"), vec![NOT_A_STRING]);
        assert_eq!(err.messages_for("price"), vec![NOT_A_STRING]);
    }

    #[test]
    fn test_with_input_keeps_id() {
        let product = Product {
            id: 9,
            name: "Old name".into(),
            description: "Old description".into(),
            price: "1.00".into(),
            quantity: 1,
        };
        let updated = product.with_input(ProductInput {
            name: "New name".into(),
            description: "New description".into(),
            price: "2.00".into(),
            quantity: 2,
        });

        assert_eq!(updated.id, 9);
        assert_eq!(updated.name, "New name");
        assert_eq!(updated.quantity, 2);
    }
}
