/// Integration tests with a mocked scoring API
/// Exercises the transport client and page controllers without a real backend
use rust_credit_portal::controllers::{self, Navigation};
use rust_credit_portal::errors::{ApiError, PortalError};
use rust_credit_portal::forms::{RegistrationForm, ScoreForm};
use rust_credit_portal::integrations::api_client::ApiClient;
use rust_credit_portal::models::ScoreResult;
use rust_credit_portal::session::Session;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), None).unwrap()
}

fn sample_result() -> ScoreResult {
    ScoreResult {
        digital_trust_score: 82,
        risk_category: "Low".to_string(),
        explanation: vec!["stable income".to_string(), "low variance".to_string()],
        user_id: None,
        credit_profile_id: None,
        recommendations: vec![],
    }
}

#[tokio::test]
async fn test_post_json_sends_json_body_and_parses_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"hello": "world"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let reply: serde_json::Value = client
        .post_json("/echo", &json!({"hello": "world"}))
        .await
        .unwrap();

    assert_eq!(reply, json!({"ok": true}));
}

#[tokio::test]
async fn test_get_json_parses_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let status = client.health().await.unwrap();
    assert_eq!(status["status"], "healthy");
}

#[tokio::test]
async fn test_error_status_surfaces_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "User not found"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get_user("missing").await.unwrap_err();

    match err {
        ApiError::Status { status, detail } => {
            assert_eq!(status, 404);
            assert_eq!(detail, "User not found");
        }
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/calculate-score"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = Session::default();
    let err = controllers::calculate(&client, &mut session, &ScoreForm::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PortalError::Api(ApiError::Decode(_))));
    assert!(session.score_result().is_none());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = ApiClient::new("http://127.0.0.1:9", None).unwrap();
    let err = client.health().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn test_register_persists_exactly_the_returned_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({
            "name": "Rajesh Kumar",
            "email": "rajesh.kumar@example.com",
            "job_type": "Delivery Driver",
            "months_active": 18
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "60d5ec49f1b2c8b1f8e4e1a1",
            "name": "Rajesh Kumar",
            "email": "rajesh.kumar@example.com",
            "job_type": "Delivery Driver",
            "months_active": 18,
            "created_at": "2024-02-16T10:30:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = Session::default();
    session.store_score_result(sample_result());

    let form = RegistrationForm {
        name: "Rajesh Kumar".to_string(),
        email: "rajesh.kumar@example.com".to_string(),
        job: "Delivery Driver".to_string(),
        months: "18".to_string(),
    };
    let next = controllers::register(&client, &mut session, &form)
        .await
        .unwrap();

    assert_eq!(next, Navigation::Dashboard);
    assert_eq!(session.user_id(), Some("60d5ec49f1b2c8b1f8e4e1a1"));
    assert_eq!(session.score_result(), Some(&sample_result()));
}

#[tokio::test]
async fn test_register_failure_leaves_session_untouched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "User with this email already exists"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = Session::default();
    let err = controllers::register(&client, &mut session, &RegistrationForm::default())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("already exists"));
    assert_eq!(session, Session::default());
}

#[tokio::test]
async fn test_calculate_sends_parsed_fields_and_stores_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/calculate-score"))
        .and(body_json(json!({
            "user_id": "u-1",
            "avg_income": 28000.0,
            "income_variance": 0.2,
            "upi_txn_count": 45,
            "bill_payment_score": 9,
            "withdrawal_ratio": 0.4
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "u-1",
            "digital_trust_score": 82,
            "risk_category": "Low",
            "explanation": ["stable income", "low variance"],
            "credit_profile_id": "cp-1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = Session::default();
    session.set_user_id("u-1");

    let form = ScoreForm {
        income: "28000".to_string(),
        variance: "0.2".to_string(),
        upi: "45".to_string(),
        bill: "9".to_string(),
        withdrawal: "0.4".to_string(),
    };
    let next = controllers::calculate(&client, &mut session, &form)
        .await
        .unwrap();

    assert_eq!(next, Navigation::Result);
    let stored = session.score_result().unwrap();
    assert_eq!(stored.digital_trust_score, 82);
    assert_eq!(stored.credit_profile_id.as_deref(), Some("cp-1"));
}

#[tokio::test]
async fn test_calculate_forwards_unparseable_fields_as_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/calculate-score"))
        .and(body_json(json!({
            "user_id": null,
            "avg_income": null,
            "income_variance": 0.2,
            "upi_txn_count": 45,
            "bill_payment_score": null,
            "withdrawal_ratio": null
        })))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": "user_id: field required"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = Session::default();
    let form = ScoreForm {
        income: "a lot".to_string(),
        variance: "0.2".to_string(),
        upi: "45".to_string(),
        bill: "".to_string(),
        withdrawal: "n/a".to_string(),
    };

    let err = controllers::calculate(&client, &mut session, &form)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PortalError::Api(ApiError::Status { status: 422, .. })
    ));
}

#[tokio::test]
async fn test_profile_without_credit_profile_shows_na() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/u-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "A",
            "email": "b@x.com",
            "job_type": "salaried"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = Session::default();
    session.set_user_id("u-1");

    let view = controllers::load_profile(&client, &session).await.unwrap();
    assert_eq!(view.score, "N/A");

    let html = view.to_html();
    assert!(html.contains("<p>Name: A</p>"));
    assert!(html.contains("<p>Email: b@x.com</p>"));
    assert!(html.contains("<p>Job: salaried</p>"));
    assert!(html.contains("<p>Score: N/A</p>"));
}

#[tokio::test]
async fn test_profile_with_credit_profile_shows_score() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/u-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u-2",
            "name": "Priya Sharma",
            "email": "priya@example.com",
            "job_type": "Freelance Designer",
            "months_active": 8,
            "created_at": "2024-02-16T10:30:00Z",
            "credit_profile": {
                "id": "cp-9",
                "digital_trust_score": 55,
                "risk_category": "Medium Risk",
                "explanation": []
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = Session::default();
    session.set_user_id("u-2");

    let view = controllers::load_profile(&client, &session).await.unwrap();
    assert_eq!(view.score, "55");
    assert_eq!(view.job, "Freelance Designer");
}
