//! User validation utilities
//!
//! Field rules are an ordered chain. Every rule inspects one aspect of one
//! field and the first rule that fails decides the reported error; the rest
//! of the chain is not evaluated.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use super::entity::{UserCandidate, UserPatch, ValidUser, ValidUserPatch};

/// Minimum length, in characters, of first and last names
pub const MIN_NAME_LENGTH: usize = 3;
/// Inclusive age bounds
pub const MIN_AGE: f64 = 0.0;
pub const MAX_AGE: f64 = 120.0;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("email pattern is valid"));

/// Errors reported by the field rules
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("Длина имени должна быть не менее 3 символов")]
    NameTooShort,

    #[error("Длина фамилии должна быть не менее 3 символов")]
    SurnameTooShort,

    #[error("Возраст должен быть числом")]
    AgeNotNumeric,

    #[error("Возраст должен быть в пределах от 0 до 120")]
    AgeOutOfRange,

    #[error("Заработная плата должна быть числом")]
    SalaryNotNumeric,

    #[error("Заработная плата должна быть от 0")]
    SalaryNegative,

    #[error("Неверный формат почты")]
    EmailMalformed,
}

impl FieldError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameTooShort => "first_name",
            Self::SurnameTooShort => "last_name",
            Self::AgeNotNumeric | Self::AgeOutOfRange => "age",
            Self::SalaryNotNumeric | Self::SalaryNegative => "salary",
            Self::EmailMalformed => "email",
        }
    }

    /// Client-facing message, prefixed the way every value error is reported
    pub fn message(&self) -> String {
        format!("Value error, {}", self)
    }
}

/// Borrowed view over the fields under validation; `None` means "not supplied"
#[derive(Debug, Default, Clone, Copy)]
struct Fields<'a> {
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
    age: Option<&'a Value>,
    salary: Option<&'a Value>,
    email: Option<&'a str>,
}

type Rule = fn(&Fields<'_>) -> Result<(), FieldError>;

/// The chain, in the order the record declares its fields
const RULES: &[Rule] = &[
    first_name_length,
    last_name_length,
    age_is_number,
    age_in_range,
    salary_is_number,
    salary_not_negative,
    email_format,
];

fn run_chain(fields: &Fields<'_>) -> Result<(), FieldError> {
    RULES.iter().try_for_each(|rule| rule(fields))
}

fn first_name_length(fields: &Fields<'_>) -> Result<(), FieldError> {
    match fields.first_name {
        Some(name) if name.chars().count() < MIN_NAME_LENGTH => Err(FieldError::NameTooShort),
        _ => Ok(()),
    }
}

fn last_name_length(fields: &Fields<'_>) -> Result<(), FieldError> {
    match fields.last_name {
        Some(name) if name.chars().count() < MIN_NAME_LENGTH => Err(FieldError::SurnameTooShort),
        _ => Ok(()),
    }
}

fn age_is_number(fields: &Fields<'_>) -> Result<(), FieldError> {
    match fields.age {
        Some(age) if whole_number(age).is_none() => Err(FieldError::AgeNotNumeric),
        _ => Ok(()),
    }
}

fn age_in_range(fields: &Fields<'_>) -> Result<(), FieldError> {
    match fields.age.and_then(whole_number) {
        Some(age) if !(MIN_AGE..=MAX_AGE).contains(&age) => Err(FieldError::AgeOutOfRange),
        _ => Ok(()),
    }
}

fn salary_is_number(fields: &Fields<'_>) -> Result<(), FieldError> {
    match fields.salary {
        Some(salary) if !salary.is_number() => Err(FieldError::SalaryNotNumeric),
        _ => Ok(()),
    }
}

fn salary_not_negative(fields: &Fields<'_>) -> Result<(), FieldError> {
    match fields.salary.and_then(Value::as_f64) {
        Some(salary) if salary < 0.0 => Err(FieldError::SalaryNegative),
        _ => Ok(()),
    }
}

fn email_format(fields: &Fields<'_>) -> Result<(), FieldError> {
    match fields.email {
        Some(email) if !EMAIL_PATTERN.is_match(email) => Err(FieldError::EmailMalformed),
        _ => Ok(()),
    }
}

/// A JSON number with no fractional part; strings and booleans are not numbers
fn whole_number(value: &Value) -> Option<f64> {
    if let Some(n) = value.as_i64() {
        return Some(n as f64);
    }

    value.as_f64().filter(|n| n.fract() == 0.0)
}

/// Validate a complete user record
pub fn validate_user(candidate: &UserCandidate) -> Result<ValidUser, FieldError> {
    let fields = Fields {
        first_name: Some(candidate.first_name.trim()),
        last_name: Some(candidate.last_name.trim()),
        age: Some(&candidate.age),
        salary: Some(&candidate.salary),
        email: Some(candidate.email.trim()),
    };

    run_chain(&fields)?;

    Ok(ValidUser {
        first_name: candidate.first_name.trim().to_string(),
        last_name: candidate.last_name.trim().to_string(),
        age: to_age(&candidate.age)?,
        salary: to_salary(&candidate.salary)?,
        email: candidate.email.trim().to_string(),
    })
}

/// Validate only the supplied fields of a partial record
pub fn validate_user_patch(patch: &UserPatch) -> Result<ValidUserPatch, FieldError> {
    let fields = Fields {
        first_name: patch.first_name.as_deref().map(str::trim),
        last_name: patch.last_name.as_deref().map(str::trim),
        age: patch.age.as_ref(),
        salary: patch.salary.as_ref(),
        email: patch.email.as_deref().map(str::trim),
    };

    run_chain(&fields)?;

    Ok(ValidUserPatch {
        first_name: fields.first_name.map(String::from),
        last_name: fields.last_name.map(String::from),
        age: fields.age.map(to_age).transpose()?,
        salary: fields.salary.map(to_salary).transpose()?,
        email: fields.email.map(String::from),
    })
}

fn to_age(value: &Value) -> Result<i32, FieldError> {
    // The range rule has already bounded the value, so the cast is exact.
    whole_number(value)
        .map(|age| age as i32)
        .ok_or(FieldError::AgeNotNumeric)
}

fn to_salary(value: &Value) -> Result<f64, FieldError> {
    value.as_f64().ok_or(FieldError::SalaryNotNumeric)
}
