//! User entity and related types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// User identifier, assigned by the store on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    age: i32,
    salary: f64,
    email: String,
}

impl User {
    /// Build a stored user from a validated record and the id the store assigned
    pub fn new(id: UserId, record: ValidUser) -> Self {
        Self {
            id,
            first_name: record.first_name,
            last_name: record.last_name,
            age: record.age,
            salary: record.salary,
            email: record.email,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Apply every supplied field of a validated patch, leaving the rest untouched
    pub fn apply(&mut self, patch: ValidUserPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(salary) = patch.salary {
            self.salary = salary;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
    }
}

/// A user record exactly as submitted by a client.
///
/// `age` and `salary` are kept as raw JSON values so that a numeric string
/// such as `"25"` reaches the validator and is rejected there instead of
/// being coerced or failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct UserCandidate {
    pub first_name: String,
    pub last_name: String,
    pub age: Value,
    pub salary: Value,
    pub email: String,
}

/// A partial user record; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "present_value")]
    pub age: Option<Value>,
    #[serde(default, deserialize_with = "present_value")]
    pub salary: Option<Value>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Treats an explicit JSON `null` the same as an absent field
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(other),
    })
}

/// A user record that passed every field rule
#[derive(Debug, Clone, PartialEq)]
pub struct ValidUser {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub salary: f64,
    pub email: String,
}

/// A partial user record whose supplied fields passed their rules
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidUserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub salary: Option<f64>,
    pub email: Option<String>,
}

impl ValidUserPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.age.is_none()
            && self.salary.is_none()
            && self.email.is_none()
    }
}
