//! In-memory storage for users and their credit profiles.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CreditProfile, User};
use crate::scoring::{ScoringInput, TrustAssessment};
use crate::validation::NewUser;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    credit_profiles: Vec<CreditProfile>,
}

/// Shared handle to the user and credit profile tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a user, rejecting an email that is already registered.
    pub async fn insert_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::BadRequest(
                "User with this email already exists".to_string(),
            ));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: new_user.name,
            email: new_user.email,
            job_type: new_user.job_type,
            months_active: new_user.months_active,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    /// All users in registration order.
    pub async fn list_users(&self) -> Vec<User> {
        self.tables.read().await.users.clone()
    }

    pub async fn find_user(&self, id: &Uuid) -> Option<User> {
        let id = id.to_string();
        self.tables
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    /// Records a scoring run for `user_id`.
    pub async fn insert_credit_profile(
        &self,
        user_id: &Uuid,
        input: &ScoringInput,
        assessment: &TrustAssessment,
    ) -> CreditProfile {
        let profile = CreditProfile {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            avg_income: input.avg_income,
            income_variance: input.income_variance,
            upi_txn_count: input.upi_txn_count,
            bill_payment_score: input.bill_payment_score,
            withdrawal_ratio: input.withdrawal_ratio,
            digital_trust_score: assessment.score,
            risk_category: assessment.risk.label().to_string(),
            explanation: assessment.explanations.clone(),
            created_at: Utc::now(),
        };

        self.tables
            .write()
            .await
            .credit_profiles
            .push(profile.clone());
        profile
    }

    /// Most recent credit profile of `user_id`, if any.
    ///
    /// Ties on `created_at` resolve to the later insertion.
    pub async fn latest_credit_profile(&self, user_id: &Uuid) -> Option<CreditProfile> {
        let user_id = user_id.to_string();
        self.tables
            .read()
            .await
            .credit_profiles
            .iter()
            .filter(|p| p.user_id == user_id)
            .max_by_key(|p| p.created_at)
            .cloned()
    }
}
