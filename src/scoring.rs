//! Rule-based digital trust scoring.
//!
//! | Rule              | Condition              | Points |
//! |-------------------|------------------------|--------|
//! | Stable income     | variance < 0.3         | +25    |
//! | UPI activity      | > 30 / > 15            | +20/+10|
//! | Bill payments     | > 7 / > 4              | +20/+10|
//! | Work duration     | >= 12 / >= 6 months    | +25/+15|
//! | Cash withdrawals  | ratio > 0.7            | -10    |
//!
//! Income level only adds an explanation line. The total is clamped to 0-100.

use std::fmt;

/// Validated inputs of one scoring run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringInput {
    pub avg_income: f64,
    pub income_variance: f64,
    pub upi_txn_count: i64,
    pub bill_payment_score: i64,
    pub withdrawal_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low Risk",
            RiskCategory::Medium => "Medium Risk",
            RiskCategory::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score, bucket and reasons produced by [`calculate_digital_trust_score`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrustAssessment {
    pub score: i64,
    pub risk: RiskCategory,
    pub explanations: Vec<String>,
}

pub fn classify_risk(score: i64) -> RiskCategory {
    if score >= 70 {
        RiskCategory::Low
    } else if score >= 40 {
        RiskCategory::Medium
    } else {
        RiskCategory::High
    }
}

/// Applies the scoring rules to `input` for a user active `months_active` months.
pub fn calculate_digital_trust_score(input: &ScoringInput, months_active: i64) -> TrustAssessment {
    let mut score: i64 = 0;
    let mut explanations = Vec::with_capacity(6);

    if input.income_variance < 0.3 {
        score += 25;
        explanations.push("Stable income pattern detected with low variance");
    } else {
        explanations.push("Income fluctuation detected - consider stabilizing earnings");
    }

    if input.upi_txn_count > 30 {
        score += 20;
        explanations.push("High UPI transaction activity observed - strong digital footprint");
    } else if input.upi_txn_count > 15 {
        score += 10;
        explanations.push("Moderate UPI transaction activity detected");
    } else {
        explanations.push("Low digital payment activity - increase UPI usage for better score");
    }

    if input.bill_payment_score > 7 {
        score += 20;
        explanations.push("Regular bill payments recorded - demonstrates financial discipline");
    } else if input.bill_payment_score > 4 {
        score += 10;
        explanations.push("Occasional bill payments detected");
    } else {
        explanations.push("Irregular bill payment history - maintain consistent payments");
    }

    if months_active >= 12 {
        score += 25;
        explanations.push("Long-term work activity improves trust and stability");
    } else if months_active >= 6 {
        score += 15;
        explanations.push("Moderate work duration demonstrates some commitment");
    } else {
        explanations.push("Short work history - longer tenure will improve creditworthiness");
    }

    if input.withdrawal_ratio > 0.7 {
        score -= 10;
        explanations.push(
            "High cash withdrawal behavior increases risk - reduce dependency on cash",
        );
    } else if input.withdrawal_ratio > 0.5 {
        explanations.push("Moderate cash withdrawal ratio detected");
    } else {
        explanations.push("Low withdrawal ratio indicates good digital transaction habits");
    }

    if input.avg_income > 30000.0 {
        explanations.push("Above-average income level supports creditworthiness");
    } else if input.avg_income > 15000.0 {
        explanations.push("Moderate income level observed");
    } else {
        explanations.push(
            "Lower income bracket - focus on building savings and reducing withdrawals",
        );
    }

    let score = score.clamp(0, 100);

    TrustAssessment {
        score,
        risk: classify_risk(score),
        explanations: explanations.into_iter().map(String::from).collect(),
    }
}

/// Suggestions for raising the score, most urgent first.
pub fn generate_recommendations(
    score: i64,
    risk: RiskCategory,
    input: &ScoringInput,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if risk == RiskCategory::High {
        recommendations.push(
            "Priority: Focus on building financial stability and digital payment history",
        );
    }
    if input.income_variance >= 0.3 {
        recommendations.push("Try to stabilize your income sources or maintain emergency savings");
    }
    if input.upi_txn_count <= 30 {
        recommendations.push("Increase digital payment usage through UPI for daily transactions");
    }
    if input.bill_payment_score <= 7 {
        recommendations.push("Set up automatic bill payments to improve payment consistency");
    }
    if input.withdrawal_ratio > 0.7 {
        recommendations.push("Reduce cash withdrawals and use digital payments more frequently");
    }
    if score < 70 {
        recommendations
            .push("Continue working in your current role to build a stronger work history");
    }

    recommendations.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(variance: f64, upi: i64, bill: i64, withdrawal: f64, income: f64) -> ScoringInput {
        ScoringInput {
            avg_income: income,
            income_variance: variance,
            upi_txn_count: upi,
            bill_payment_score: bill,
            withdrawal_ratio: withdrawal,
        }
    }

    #[test]
    fn test_best_profile_scores_ninety() {
        let result = calculate_digital_trust_score(&input(0.2, 45, 9, 0.4, 28000.0), 18);
        assert_eq!(result.score, 90);
        assert_eq!(result.risk, RiskCategory::Low);
        assert_eq!(result.explanations.len(), 6);
        assert_eq!(
            result.explanations[0],
            "Stable income pattern detected with low variance"
        );
        assert_eq!(result.explanations[5], "Moderate income level observed");
    }

    #[test]
    fn test_middle_tiers() {
        let result = calculate_digital_trust_score(&input(0.45, 20, 5, 0.6, 16000.0), 8);
        // 10 (upi) + 10 (bill) + 15 (months)
        assert_eq!(result.score, 35);
        assert_eq!(result.risk, RiskCategory::High);
        assert_eq!(result.explanations[4], "Moderate cash withdrawal ratio detected");
    }

    #[test]
    fn test_score_never_negative() {
        let result = calculate_digital_trust_score(&input(0.9, 0, 0, 0.95, 1000.0), 0);
        assert_eq!(result.score, 0);
        assert_eq!(result.risk, RiskCategory::High);
    }

    #[test]
    fn test_classify_risk_boundaries() {
        assert_eq!(classify_risk(70), RiskCategory::Low);
        assert_eq!(classify_risk(69), RiskCategory::Medium);
        assert_eq!(classify_risk(40), RiskCategory::Medium);
        assert_eq!(classify_risk(39), RiskCategory::High);
        assert_eq!(RiskCategory::Medium.to_string(), "Medium Risk");
    }

    #[test]
    fn test_recommendations_for_weak_profile() {
        let weak = input(0.5, 10, 3, 0.8, 9000.0);
        let recs = generate_recommendations(0, RiskCategory::High, &weak);
        assert_eq!(recs.len(), 6);
        assert!(recs[0].starts_with("Priority:"));
    }

    #[test]
    fn test_recommendations_for_strong_profile() {
        let strong = input(0.1, 50, 10, 0.2, 40000.0);
        assert!(generate_recommendations(90, RiskCategory::Low, &strong).is_empty());
    }
}
