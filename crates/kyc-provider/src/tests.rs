//! Integration tests for the provider against a mock HTTP server.

use wiremock::matchers::{body_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::error::{HttpErrorKind, KycError};
use crate::provider::{KycClient, KycProvider, SumsubProvider};
use crate::types::{ApplicantInfo, GenerateLinkRequest, KycConfig, KycResult, KycStatus};
use crate::webhook::{DigestStatus, WebhookVerification, PAYLOAD_DIGEST_HEADER};

fn test_config(base_url: &str) -> KycConfig {
    KycConfig {
        base_url: base_url.to_string(),
        app_token: "test-app-token".to_string(),
        secret_key: "test-signing-secret".to_string(),
        webhook_secret: "test-webhook-secret".to_string(),
        timeout_secs: 5,
    }
}

fn applicant_body() -> serde_json::Value {
    serde_json::json!({
        "id": "applicant-1",
        "externalUserId": "user-1",
        "review": {
            "reviewStatus": "completed",
            "reviewResult": { "reviewAnswer": "GREEN" }
        }
    })
}

#[tokio::test]
async fn test_create_applicant_maps_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/resources/applicants"))
        .and(body_json(serde_json::json!({ "externalUserId": "user-1" })))
        .and(header_exists("X-App-Token"))
        .and(header_exists("X-App-Access-Ts"))
        .and(header_exists("X-App-Access-Sig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(applicant_body()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = SumsubProvider::new(test_config(&server.uri())).unwrap();
    let info = provider.create_applicant("user-1").await.unwrap();

    assert_eq!(
        info,
        ApplicantInfo {
            user_id: "user-1".to_string(),
            applicant_id: "applicant-1".to_string(),
            status: KycStatus::Reviewed,
            result: KycResult::Green,
            provider: "sumsub".to_string(),
        }
    );
}

#[tokio::test]
async fn test_request_signature_covers_transmitted_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/resources/applicants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(applicant_body()))
        .mount(&server)
        .await;

    let provider = SumsubProvider::new(test_config(&server.uri())).unwrap();
    provider.create_applicant("user-1").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    let timestamp = request.headers.get("X-App-Access-Ts").unwrap().to_str().unwrap();
    let signature = request.headers.get("X-App-Access-Sig").unwrap().to_str().unwrap();

    let mut canonical = Vec::new();
    canonical.extend_from_slice(timestamp.as_bytes());
    canonical.extend_from_slice(b"POST/resources/applicants");
    canonical.extend_from_slice(&request.body);

    assert_eq!(
        signature,
        kyc_auth::hex_digest(b"test-signing-secret", &canonical)
    );
}

#[tokio::test]
async fn test_get_applicant_maps_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resources/applicants/applicant-1"))
        .and(header_exists("X-App-Access-Sig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(applicant_body()))
        .mount(&server)
        .await;

    let provider = SumsubProvider::new(test_config(&server.uri())).unwrap();
    let info = provider.get_applicant("applicant-1").await.unwrap();

    assert_eq!(info.applicant_id, "applicant-1");
    assert_eq!(info.status, KycStatus::Reviewed);
}

#[tokio::test]
async fn test_unauthorized_is_classified_with_captured_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resources/applicants/applicant-1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("  unauthorized  "))
        .mount(&server)
        .await;

    let provider = SumsubProvider::new(test_config(&server.uri())).unwrap();
    let err = provider.get_applicant("applicant-1").await.unwrap_err();

    match err {
        KycError::Http { kind, status, body } => {
            assert_eq!(kind, HttpErrorKind::Unauthorized);
            assert_eq!(status, 401);
            assert_eq!(body, "unauthorized");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limited_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/resources/applicants"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let provider = SumsubProvider::new(test_config(&server.uri())).unwrap();
    let err = provider.create_applicant("user-1").await.unwrap_err();

    assert_eq!(err.http_kind(), Some(HttpErrorKind::RateLimited));
}

#[tokio::test]
async fn test_oversized_error_body_is_truncated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/resources/applicants"))
        .respond_with(ResponseTemplate::new(500).set_body_string("x".repeat(64 * 1024)))
        .mount(&server)
        .await;

    let provider = SumsubProvider::new(test_config(&server.uri())).unwrap();
    let err = provider.create_applicant("user-1").await.unwrap_err();

    match err {
        KycError::Http { kind, body, .. } => {
            assert_eq!(kind, HttpErrorKind::ServerInternal);
            assert_eq!(body.len(), 16 * 1024);
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_no_content_is_tolerated_as_absent_value() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resources/applicants/applicant-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let provider = SumsubProvider::new(test_config(&server.uri())).unwrap();
    let info = provider.get_applicant("applicant-1").await.unwrap();

    assert_eq!(info.applicant_id, "");
    assert_eq!(info.status, KycStatus::Unknown);
    assert_eq!(info.result, KycResult::None);
}

#[tokio::test]
async fn test_empty_200_body_is_tolerated_as_absent_value() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resources/applicants/applicant-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let provider = SumsubProvider::new(test_config(&server.uri())).unwrap();
    let info = provider.get_applicant("applicant-1").await.unwrap();

    assert_eq!(info.status, KycStatus::Unknown);
}

#[tokio::test]
async fn test_malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resources/applicants/applicant-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{invalid"))
        .mount(&server)
        .await;

    let provider = SumsubProvider::new(test_config(&server.uri())).unwrap();
    let err = provider.get_applicant("applicant-1").await.unwrap_err();

    assert!(matches!(err, KycError::Decode(_)));
}

#[tokio::test]
async fn test_generate_link_sends_full_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/resources/sdkIntegrations/levels/-/websdkLink"))
        .and(body_json(serde_json::json!({
            "levelName": "level-1",
            "externalUserId": "user-1",
            "ttlInSecs": 100,
            "applicantIdentifiers": { "email": "a@b.com" },
            "redirect": { "successUrl": "https://ok" }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "url": "https://link" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = SumsubProvider::new(test_config(&server.uri())).unwrap();
    let url = provider
        .generate_link(GenerateLinkRequest {
            user_id: "user-1".into(),
            level_name: "level-1".into(),
            ttl_secs: 100,
            email: Some("a@b.com".into()),
            success_url: Some("https://ok".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(url, "https://link");
}

#[tokio::test]
async fn test_generate_link_defaults_non_positive_ttl() {
    for ttl_secs in [0, -5] {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/resources/sdkIntegrations/levels/-/websdkLink"))
            .and(body_json(serde_json::json!({
                "levelName": "level-1",
                "externalUserId": "user-1",
                "ttlInSecs": 1800
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "url": "https://link" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let provider = SumsubProvider::new(test_config(&server.uri())).unwrap();
        provider
            .generate_link(GenerateLinkRequest {
                user_id: "user-1".into(),
                level_name: "level-1".into(),
                ttl_secs,
                ..Default::default()
            })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_generate_link_validation_precedes_transport() {
    let server = MockServer::start().await;
    let provider = SumsubProvider::new(test_config(&server.uri())).unwrap();

    let err = provider
        .generate_link(GenerateLinkRequest {
            user_id: "  ".into(),
            level_name: "level-1".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, KycError::Validation(_)));

    let err = provider
        .generate_link(GenerateLinkRequest {
            user_id: "user-1".into(),
            level_name: String::new(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, KycError::Validation(_)));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_generate_link_rejects_empty_url_in_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/resources/sdkIntegrations/levels/-/websdkLink"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "url": "" })),
        )
        .mount(&server)
        .await;

    let provider = SumsubProvider::new(test_config(&server.uri())).unwrap();
    let err = provider
        .generate_link(GenerateLinkRequest {
            user_id: "user-1".into(),
            level_name: "level-1".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, KycError::EmptyLink));
}

#[tokio::test]
async fn test_client_facade_verifies_webhook_end_to_end() {
    let raw = br#"{"type":"applicantReviewed","applicantId":"a1","externalUserId":"u1","inspectionId":"i1","reviewStatus":"completed","reviewResult":{"reviewAnswer":"GREEN"}}"#;
    let digest = kyc_auth::hex_digest(b"test-webhook-secret", raw);

    let client = KycClient::new(test_config("https://api.example.com")).unwrap();

    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        PAYLOAD_DIGEST_HEADER,
        reqwest::header::HeaderValue::from_str(&digest).unwrap(),
    );

    let outcome = client.verify_webhook(&headers, raw).unwrap();
    assert!(outcome.is_verified());
    assert_eq!(outcome.payload.external_user_id, "u1");
    assert_eq!(outcome.payload.review_result.review_answer, KycResult::Green);
}

#[tokio::test]
async fn test_client_facade_reports_missing_digest_as_outcome() {
    let raw = br#"{"type":"applicantPending","externalUserId":"u1"}"#;
    let client = KycClient::new(test_config("https://api.example.com")).unwrap();

    let outcome = client
        .verify_webhook(&reqwest::header::HeaderMap::new(), raw)
        .unwrap();
    assert_eq!(outcome.digest, DigestStatus::Missing);
    assert_eq!(outcome.payload.external_user_id, "u1");
}

struct CannedProvider;

impl KycProvider for CannedProvider {
    async fn create_applicant(&self, user_id: &str) -> Result<ApplicantInfo, KycError> {
        Ok(ApplicantInfo {
            user_id: user_id.to_string(),
            applicant_id: "canned".to_string(),
            status: KycStatus::Pending,
            result: KycResult::None,
            provider: "canned".to_string(),
        })
    }

    async fn get_applicant(&self, _applicant_id: &str) -> Result<ApplicantInfo, KycError> {
        Err(KycError::EmptyLink)
    }

    async fn generate_link(&self, _request: GenerateLinkRequest) -> Result<String, KycError> {
        Ok("https://canned".to_string())
    }

    fn verify_webhook(
        &self,
        _headers: &reqwest::header::HeaderMap,
        _raw_body: &[u8],
    ) -> Result<WebhookVerification, KycError> {
        Err(KycError::EmptyLink)
    }
}

#[tokio::test]
async fn test_client_accepts_a_substitute_provider() {
    let client = KycClient::with_provider(CannedProvider);

    let info = client.create_applicant("user-9").await.unwrap();
    assert_eq!(info.applicant_id, "canned");
    assert_eq!(client.generate_link(GenerateLinkRequest::default()).await.unwrap(), "https://canned");
}
