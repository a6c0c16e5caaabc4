use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============ Request Payloads ============

/// Body of `POST /register`.
///
/// `months_active` is optional on the wire because the portal forwards an
/// unparseable form value as `null`; the server rejects it during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    /// Display name (1-100 characters).
    pub name: String,
    /// Contact email, unique per user.
    pub email: String,
    /// Job classification, e.g. "Delivery Driver" (1-50 characters).
    pub job_type: String,
    /// How many months the user has been working.
    pub months_active: Option<i64>,
}

/// Body of `POST /calculate-score`.
///
/// Every field is nullable: a form value that fails numeric parsing is sent as
/// `null`, as is a missing session user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoreRequest {
    /// Identifier returned by registration.
    pub user_id: Option<String>,
    /// Average monthly income.
    pub avg_income: Option<f64>,
    /// Income variance in `[0, 1]`.
    pub income_variance: Option<f64>,
    /// Number of UPI transactions.
    pub upi_txn_count: Option<i64>,
    /// Bill payment regularity in `[0, 10]`.
    pub bill_payment_score: Option<i64>,
    /// Share of income withdrawn as cash, in `[0, 1]`.
    pub withdrawal_ratio: Option<f64>,
}

// ============ Response Payloads ============

/// A registered user as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub job_type: String,
    pub months_active: i64,
    pub created_at: DateTime<Utc>,
}

/// The slice of the registration response the portal keeps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisterResponse {
    pub id: String,
}

/// Result of a score calculation.
///
/// The portal needs only the score, label and explanation; the remaining
/// fields are filled by the bundled server and tolerated when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoreResult {
    /// Digital trust score, 0-100.
    pub digital_trust_score: i64,
    /// Risk bucket label, e.g. "Low Risk".
    pub risk_category: String,
    /// Human readable reasons for the score, in rule order.
    pub explanation: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_profile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

/// A stored scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreditProfile {
    pub id: String,
    pub user_id: String,
    pub avg_income: f64,
    pub income_variance: f64,
    pub upi_txn_count: i64,
    pub bill_payment_score: i64,
    pub withdrawal_ratio: f64,
    pub digital_trust_score: i64,
    pub risk_category: String,
    pub explanation: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of `GET /user/{id}`: the user with their latest credit profile, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub credit_profile: Option<CreditProfile>,
}

/// Lenient client-side view of `GET /user/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub job_type: String,
    #[serde(default)]
    pub months_active: Option<i64>,
    #[serde(default)]
    pub credit_profile: Option<ProfileScore>,
}

/// The part of a nested credit profile the profile page shows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileScore {
    #[serde(default)]
    pub digital_trust_score: Option<i64>,
    #[serde(default)]
    pub risk_category: Option<String>,
}
