use axum_helpers::Violations;
use axum_helpers::validation::{MISSING, NOT_A_STRING};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    /// Argon2 PHC string (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// User about to be persisted; the id is assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Registration body, after validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct RegisterUser {
    #[schema(example = "alice@example.com", format = "email")]
    pub email: String,
    #[schema(example = "alice", min_length = 4)]
    pub username: String,
    #[schema(example = "correct horse battery", min_length = 8)]
    pub password: String,
}

impl RegisterUser {
    /// Every field must be a JSON string.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, Violations> {
        let mut violations = Violations::new();

        let email = string(fields, "email", &mut violations);
        let username = string(fields, "username", &mut violations);
        let password = string(fields, "password", &mut violations);

        match (email, username, password) {
            (Some(email), Some(username), Some(password)) => Ok(RegisterUser {
                email,
                username,
                password,
            }),
            _ => Err(violations),
        }
    }
}

fn string(fields: &Map<String, Value>, field: &str, violations: &mut Violations) -> Option<String> {
    match fields.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            email: "alice@example.com".into(),
            username: "alice".into(),
            password_hash: "$argon2id$v=19$...".into(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["username"], "alice");
    }

    #[test]
    fn test_from_fields_requires_strings() {
        let fields = json!({"email": "alice@example.com", "username": 12345, "password": "correct horse"});
        let err = RegisterUser::from_fields(fields.as_object().unwrap()).unwrap_err();

        assert_eq!(err.messages_for("username"), vec![NOT_A_STRING]);
    }

    #[test]
    fn test_from_fields() {
        let fields = json!({"email": "alice@example.com", "username": "alice", "password": "correct horse"});
        let input = RegisterUser::from_fields(fields.as_object().unwrap()).unwrap();

        assert_eq!(input.username, "alice");
        assert_eq!(input.password, "correct horse");
    }
}
