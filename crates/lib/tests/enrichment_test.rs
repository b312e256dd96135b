//! # Problem Enrichment Tests

mod common;

use common::setup_tracing;
use revscope::enrichment::{ProblemCategory, ProblemClassifier};
use revscope::providers::ai::LocalAiProvider;
use revscope_test_utils::MockAiProvider;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_failed_batches_degrade_to_empty() {
    setup_tracing();
    let provider = MockAiProvider::new();
    provider.add_response("alpha", r#"[["TECHNICAL"], ["PERFORMANCE", "UNKNOWN"]]"#);
    provider.add_response("gamma", r#"[["PRICING"]]"#);

    let classifier = ProblemClassifier::new(Some(Box::new(provider.clone())))
        .with_batch_size(2)
        .with_max_concurrency(2);
    let texts = [
        "alpha crashes on start",
        "beta is slow",
        "gamma costs too much",
        "delta is fine",
        "epsilon looks ugly",
    ];

    let categories = classifier.classify(&texts).await;

    assert_eq!(
        categories,
        vec![
            vec![ProblemCategory::Technical],
            vec![ProblemCategory::Performance],
            vec![],
            vec![],
            vec![],
        ]
    );
    assert_eq!(provider.get_calls().len(), 3);
}

#[tokio::test]
async fn test_batches_are_numbered_in_input_order() {
    let provider = MockAiProvider::new();
    provider.push_response(r#"[[], ["DESIGN"]]"#);

    let classifier = ProblemClassifier::new(Some(Box::new(provider.clone())));
    let categories = classifier
        .classify(&["Love it", "The menu is confusing"])
        .await;

    assert_eq!(categories, vec![vec![], vec![ProblemCategory::Design]]);
    let (_, user_prompt) = &provider.get_calls()[0];
    assert!(user_prompt.contains("1. Love it\n2. The menu is confusing"));
}

#[tokio::test]
async fn test_missing_provider_yields_empty_lists() {
    let classifier = ProblemClassifier::new(None);
    assert!(!classifier.is_enabled());
    let categories = classifier.classify(&["a", "b", "c"]).await;
    assert_eq!(categories, vec![Vec::<ProblemCategory>::new(); 3]);
}

#[tokio::test]
async fn test_openai_compatible_provider_round_trip() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "[[\"CUSTOMER_EXPERIENCE\"]]" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = LocalAiProvider::new(
        format!("{}/v1/chat/completions", server.uri()),
        Some("test-key".to_string()),
        Some("small-model".to_string()),
    )
    .unwrap();
    let classifier = ProblemClassifier::new(Some(Box::new(provider)));

    let categories = classifier
        .classify(&["Support never answered my ticket"])
        .await;
    assert_eq!(categories, vec![vec![ProblemCategory::CustomerExperience]]);
}

#[tokio::test]
async fn test_provider_http_error_degrades() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let provider = LocalAiProvider::new(server.uri(), None, None).unwrap();
    let classifier = ProblemClassifier::new(Some(Box::new(provider)));

    let categories = classifier.classify(&["it crashes", "too slow"]).await;
    assert_eq!(categories, vec![Vec::<ProblemCategory>::new(); 2]);
}
