/// Property-based tests using proptest
/// Tests invariants that should hold for all form inputs and scoring inputs
use proptest::prelude::*;
use rust_credit_portal::domain::scoring::{
    calculate_digital_trust_score, classify_risk, ScoringInput,
};
use rust_credit_portal::forms::{parse_float, parse_int, ScoreForm};
use rust_credit_portal::render::escape_html;

// Property: form parsing never panics and reads back what was typed
proptest! {
    #[test]
    fn int_parsing_never_panics(raw in "\\PC*") {
        let _ = parse_int(&raw);
    }

    #[test]
    fn float_parsing_never_panics(raw in "\\PC*") {
        let _ = parse_float(&raw);
    }

    #[test]
    fn int_parsing_reads_typed_integers(value in -1_000_000_000i64..1_000_000_000i64) {
        prop_assert_eq!(parse_int(&value.to_string()), Some(value));
    }

    #[test]
    fn int_parsing_ignores_trailing_text(value in 0i64..100_000, suffix in "[g-w ]{0,8}") {
        prop_assert_eq!(parse_int(&format!("{}{}", value, suffix)), Some(value));
    }

    #[test]
    fn float_parsing_reads_typed_floats(value in -1.0e9f64..1.0e9f64) {
        prop_assert_eq!(parse_float(&value.to_string()), Some(value));
    }

    #[test]
    fn float_parsing_never_yields_non_finite(raw in "\\PC*") {
        if let Some(v) = parse_float(&raw) {
            prop_assert!(v.is_finite());
        }
    }
}

// Property: the score payload carries exactly the parsed form values
proptest! {
    #[test]
    fn score_request_matches_parsed_form(
        income in 0i64..1_000_000,
        variance in 0.0f64..=1.0,
        upi in 0i64..10_000,
        bill in 0i64..=10,
        withdrawal in 0.0f64..=1.0,
        user_id in "[a-f0-9]{24}",
    ) {
        let form = ScoreForm {
            income: income.to_string(),
            variance: variance.to_string(),
            upi: upi.to_string(),
            bill: bill.to_string(),
            withdrawal: withdrawal.to_string(),
        };

        let req = form.to_request(Some(&user_id));
        prop_assert_eq!(req.user_id.as_deref(), Some(user_id.as_str()));
        prop_assert_eq!(req.avg_income, Some(income as f64));
        prop_assert_eq!(req.income_variance, Some(variance));
        prop_assert_eq!(req.upi_txn_count, Some(upi));
        prop_assert_eq!(req.bill_payment_score, Some(bill));
        prop_assert_eq!(req.withdrawal_ratio, Some(withdrawal));

        let wire = serde_json::to_value(&req).unwrap();
        prop_assert_eq!(wire["upi_txn_count"].as_i64(), Some(upi));
        prop_assert_eq!(wire["withdrawal_ratio"].as_f64(), Some(withdrawal));
    }
}

// Property: scores stay in range and the label agrees with the score
proptest! {
    #[test]
    fn score_is_bounded_and_explained(
        avg_income in 0.0f64..200_000.0,
        income_variance in 0.0f64..=1.0,
        upi_txn_count in 0i64..500,
        bill_payment_score in 0i64..=10,
        withdrawal_ratio in 0.0f64..=1.0,
        months_active in 0i64..240,
    ) {
        let input = ScoringInput {
            avg_income,
            income_variance,
            upi_txn_count,
            bill_payment_score,
            withdrawal_ratio,
        };
        let result = calculate_digital_trust_score(&input, months_active);

        prop_assert!((0..=100).contains(&result.score));
        prop_assert_eq!(result.risk, classify_risk(result.score));
        prop_assert_eq!(result.explanations.len(), 6);
    }
}

// Property: escaped text never contains markup characters
proptest! {
    #[test]
    fn escaped_html_has_no_raw_markup(text in "\\PC*") {
        let escaped = escape_html(&text);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
    }
}
