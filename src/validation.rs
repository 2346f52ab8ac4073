//! Local input validation
//!
//! Every rule here runs before a request is built; a failing rule means the
//! network is never touched.

use std::fmt;

use crate::client::models::{NewInstance, SimulateRequest};
use crate::error::ValidationError;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Password composition rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength,
    Uppercase,
    Lowercase,
    Number,
    Special,
}

impl PasswordRule {
    pub const ALL: [PasswordRule; 5] = [
        PasswordRule::MinLength,
        PasswordRule::Uppercase,
        PasswordRule::Lowercase,
        PasswordRule::Number,
        PasswordRule::Special,
    ];

    /// Whether `password` satisfies this rule
    pub fn check(self, password: &str) -> bool {
        match self {
            PasswordRule::MinLength => password.chars().count() >= MIN_PASSWORD_LENGTH,
            PasswordRule::Uppercase => password.chars().any(char::is_uppercase),
            PasswordRule::Lowercase => password.chars().any(char::is_lowercase),
            PasswordRule::Number => password.chars().any(|c| c.is_ascii_digit()),
            PasswordRule::Special => password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        }
    }

    /// Requirement phrased for an error message
    pub fn requirement(self) -> &'static str {
        match self {
            PasswordRule::MinLength => "at least 8 characters",
            PasswordRule::Uppercase => "an uppercase letter",
            PasswordRule::Lowercase => "a lowercase letter",
            PasswordRule::Number => "a number",
            PasswordRule::Special => "a special character",
        }
    }
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PasswordRule::MinLength => "minLength",
            PasswordRule::Uppercase => "uppercase",
            PasswordRule::Lowercase => "lowercase",
            PasswordRule::Number => "number",
            PasswordRule::Special => "special",
        };
        f.write_str(name)
    }
}

/// Rules `password` fails, in declaration order
pub fn failed_password_rules(password: &str) -> Vec<PasswordRule> {
    PasswordRule::ALL
        .into_iter()
        .filter(|rule| !rule.check(password))
        .collect()
}

pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// Shape check: `local@domain.tld` with no whitespace and a single `@`
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Validate login input: both fields present, email well-formed
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    require("Email", email)?;
    require("Password", password)?;
    if !is_valid_email(email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validate registration input, including password strength and confirmation
pub fn validate_registration(
    email: &str,
    password: &str,
    confirmation: &str,
) -> Result<(), ValidationError> {
    validate_login(email, password)?;

    let failed = failed_password_rules(password);
    if !failed.is_empty() {
        return Err(ValidationError::WeakPassword(
            failed.iter().map(|r| r.requirement()).collect(),
        ));
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

pub fn validate_new_instance(instance: &NewInstance) -> Result<(), ValidationError> {
    require("Instance ID", &instance.instance_id)?;
    require("Region", &instance.region)?;
    Ok(())
}

pub fn validate_simulation(request: &SimulateRequest) -> Result<(), ValidationError> {
    require("Instance ID", &request.instance_id)?;
    percent("CPU utilization", request.cpu_utilization)?;
    percent("Memory usage", request.memory_usage)?;
    if request.duration_minutes == Some(0) {
        return Err(ValidationError::NotPositive("Duration"));
    }
    if request.interval_seconds == Some(0) {
        return Err(ValidationError::NotPositive("Interval"));
    }
    Ok(())
}

fn percent(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !(0.0..=100.0).contains(&v) => Err(ValidationError::OutOfRange {
            field,
            min: 0,
            max: 100,
        }),
        _ => Ok(()),
    }
}
