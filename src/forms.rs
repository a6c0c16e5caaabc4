//! Form inputs for the registration and score pages.
//!
//! Field values arrive as the raw strings a user typed. Numeric fields are read
//! the way a browser script reads them: the longest numeric prefix is taken,
//! anything unparseable becomes not-a-number and travels to the server as
//! `null`. No other validation happens here.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{RegisterUserRequest, ScoreRequest};

/// Raw values of the registration form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub job: String,
    pub months: String,
}

impl RegistrationForm {
    /// Builds the `/register` payload. Text fields are forwarded verbatim.
    pub fn to_request(&self) -> RegisterUserRequest {
        RegisterUserRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            job_type: self.job.clone(),
            months_active: parse_int(&self.months),
        }
    }
}

/// Raw values of the score calculation form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreForm {
    pub income: String,
    pub variance: String,
    pub upi: String,
    pub bill: String,
    pub withdrawal: String,
}

impl ScoreForm {
    /// Builds the `/calculate-score` payload for `user_id`.
    ///
    /// Income, UPI count and bill score are integer fields; variance and
    /// withdrawal ratio are float fields.
    pub fn to_request(&self, user_id: Option<&str>) -> ScoreRequest {
        ScoreRequest {
            user_id: user_id.map(str::to_string),
            avg_income: parse_int(&self.income).map(|v| v as f64),
            income_variance: parse_float(&self.variance),
            upi_txn_count: parse_int(&self.upi),
            bill_payment_score: parse_int(&self.bill),
            withdrawal_ratio: parse_float(&self.withdrawal),
        }
    }
}

fn int_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<sign>[+-]?)(?:(?P<radix>0[xX])(?P<hex>[0-9a-fA-F]*)|(?P<dec>[0-9]+))")
            .expect("integer prefix pattern is valid")
    })
}

fn float_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
            .expect("float prefix pattern is valid")
    })
}

/// Parses the leading integer of `raw`.
///
/// Leading whitespace is skipped, an optional sign is accepted, a `0x` prefix
/// switches to hexadecimal, and parsing stops at the first non-digit, so
/// `"12abc"` reads as `12` and `"3.9"` as `3`. Returns `None` when no digits
/// lead the value, including a `0x` prefix with no hex digit after it (`"0x"`,
/// `"0xg"`).
///
/// Magnitudes that do not fit an `i64` also return `None` and go on the wire
/// as `null`, so the server answers 422. A browser reads `"99999999999999999999"`
/// as the float `1e20` instead and may have it accepted.
pub fn parse_int(raw: &str) -> Option<i64> {
    let caps = int_prefix().captures(raw.trim_start())?;
    let negative = &caps["sign"] == "-";

    let magnitude = if caps.name("radix").is_some() {
        let hex = &caps["hex"];
        if hex.is_empty() {
            return None;
        }
        i64::from_str_radix(hex, 16).ok()?
    } else {
        caps["dec"].parse::<i64>().ok()?
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// Parses the leading decimal number of `raw`.
///
/// Accepts an optional sign, a fraction and an exponent; trailing garbage is
/// ignored. Returns `None` for values that would be not-a-number or infinite,
/// both of which serialize to `null`.
pub fn parse_float(raw: &str) -> Option<f64> {
    let m = float_prefix().find(raw.trim_start())?;
    let value: f64 = m.as_str().replace("Infinity", "inf").parse().ok()?;
    value.is_finite().then_some(value)
}
