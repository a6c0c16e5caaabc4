//! Payload validation for the scoring API server.

use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{RegisterUserRequest, ScoreRequest};
use crate::scoring::ScoringInput;

/// A registration that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub job_type: String,
    pub months_active: i64,
}

/// A score request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidScoreRequest {
    pub user_id: Uuid,
    pub input: ScoringInput,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // RFC 5322 simplified: local@domain.tld
    RE.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
        )
        .expect("email pattern is valid")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Parses a user id path or body value.
pub fn parse_user_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid user ID format".to_string()))
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(AppError::Validation(format!(
            "{}: must be between 1 and {} characters",
            field, max
        )));
    }
    Ok(())
}

fn required<T>(field: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{}: field required", field)))
}

fn check_range(field: &str, value: f64, min: f64, max: Option<f64>) -> Result<(), AppError> {
    let too_high = max.is_some_and(|m| value > m);
    if !value.is_finite() || value < min || too_high {
        let bounds = match max {
            Some(m) => format!("between {} and {}", min, m),
            None => format!("at least {}", min),
        };
        return Err(AppError::Validation(format!("{}: must be {}", field, bounds)));
    }
    Ok(())
}

pub fn validate_registration(req: &RegisterUserRequest) -> Result<NewUser, AppError> {
    check_length("name", &req.name, 100)?;
    if !is_valid_email(&req.email) {
        return Err(AppError::Validation(
            "email: value is not a valid email address".to_string(),
        ));
    }
    check_length("job_type", &req.job_type, 50)?;
    let months_active = required("months_active", req.months_active)?;
    check_range("months_active", months_active as f64, 0.0, None)?;

    Ok(NewUser {
        name: req.name.clone(),
        email: req.email.clone(),
        job_type: req.job_type.clone(),
        months_active,
    })
}

pub fn validate_score_request(req: &ScoreRequest) -> Result<ValidScoreRequest, AppError> {
    let user_id = required("user_id", req.user_id.as_deref())?;
    let avg_income = required("avg_income", req.avg_income)?;
    let income_variance = required("income_variance", req.income_variance)?;
    let upi_txn_count = required("upi_txn_count", req.upi_txn_count)?;
    let bill_payment_score = required("bill_payment_score", req.bill_payment_score)?;
    let withdrawal_ratio = required("withdrawal_ratio", req.withdrawal_ratio)?;

    check_range("avg_income", avg_income, 0.0, None)?;
    check_range("income_variance", income_variance, 0.0, Some(1.0))?;
    check_range("upi_txn_count", upi_txn_count as f64, 0.0, None)?;
    check_range("bill_payment_score", bill_payment_score as f64, 0.0, Some(10.0))?;
    check_range("withdrawal_ratio", withdrawal_ratio, 0.0, Some(1.0))?;

    Ok(ValidScoreRequest {
        user_id: parse_user_id(user_id)?,
        input: ScoringInput {
            avg_income,
            income_variance,
            upi_txn_count,
            bill_payment_score,
            withdrawal_ratio,
        },
    })
}
