//! # Analysis and Comparison Endpoint Tests

mod common;

use anyhow::Result;
use common::{feed_path, TestApp, CHAT_PATH};
use revscope::Review;
use revscope_test_utils::{appstore_feed, review_at, review_days_ago};
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

async fn post(app: &TestApp, endpoint: &str, body: Value) -> Result<(u16, Value)> {
    let response = app.client.post(app.url(endpoint)).json(&body).send().await?;
    let status = response.status().as_u16();
    Ok((status, response.json().await?))
}

fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    }))
}

#[tokio::test]
async fn test_sentiment_endpoint() -> Result<()> {
    let app = TestApp::spawn().await?;

    let (status, body) = post(
        &app,
        "/api/analysis/sentiment",
        json!({ "texts": ["Great app, I love it", "the login is bad"] }),
    )
    .await?;

    assert_eq!(status, 200);
    assert_eq!(body["label"], "Positive");
    assert_eq!(body["score"], 0.33);
    assert_eq!(body["positive"], 2);
    assert_eq!(body["negative"], 1);
    assert_eq!(body["total_words"], 6);
    Ok(())
}

#[tokio::test]
async fn test_keywords_endpoint_respects_top_n() -> Result<()> {
    let app = TestApp::spawn().await?;

    let (status, body) = post(
        &app,
        "/api/analysis/keywords",
        json!({
            "texts": ["crash crash login", "login crash", "slow"],
            "top_n": 2
        }),
    )
    .await?;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!([{ "word": "crash", "count": 3 }, { "word": "login", "count": 2 }])
    );
    Ok(())
}

#[tokio::test]
async fn test_themes_endpoint() -> Result<()> {
    let app = TestApp::spawn().await?;
    let reviews = vec![
        review_days_ago(1, 1, "app crashes on login"),
        review_days_ago(2, 2, "app crashes after update"),
        review_days_ago(3, 5, "lovely app"),
    ];

    let (status, body) = post(
        &app,
        "/api/analysis/themes",
        json!({ "reviews": reviews, "top_n": 3 }),
    )
    .await?;

    assert_eq!(status, 200);
    let themes = body.as_array().expect("array of themes");
    assert_eq!(themes[0]["phrase"], "app crashes");
    assert_eq!(themes[0]["example"]["review"], "app crashes on login");

    let (status, body) = post(
        &app,
        "/api/analysis/themes",
        json!({ "reviews": [], "rating_min": 4, "rating_max": 2 }),
    )
    .await?;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("rating band")));

    let (status, body) = post(
        &app,
        "/api/analysis/themes",
        json!({ "reviews": reviews, "top_n": u64::MAX }),
    )
    .await?;
    assert_eq!(status, 200);
    assert_eq!(body[0]["phrase"], "app crashes");
    Ok(())
}

#[tokio::test]
async fn test_adjusted_metrics_endpoint() -> Result<()> {
    let app = TestApp::spawn().await?;
    let mut reviews: Vec<Review> = (0..3)
        .map(|_| review_days_ago(1, 1, "price subscription refund"))
        .collect();
    for rating in [5, 5, 4, 4, 5, 4, 5] {
        reviews.push(review_days_ago(1, rating, "the app works"));
    }

    let (status, body) = post(&app, "/api/analysis/adjusted-metrics", json!({ "reviews": reviews })).await?;

    assert_eq!(status, 200);
    assert_eq!(body["original_count"], 10);
    assert_eq!(body["adjusted_count"], 7);
    assert_eq!(body["excluded_pct"], 30.0);
    assert_eq!(
        body["category_breakdown"],
        json!([{ "category": "pricing", "count": 3 }])
    );

    let (_, empty) = post(&app, "/api/analysis/adjusted-metrics", json!({ "reviews": [] })).await?;
    assert_eq!(empty["original_count"], 0);
    assert_eq!(empty["rating_delta"], 0.0);
    Ok(())
}

#[tokio::test]
async fn test_versions_endpoint() -> Result<()> {
    let app = TestApp::spawn().await?;
    let reviews = vec![
        review_at("2024-03-01T00:00:00Z", 2, "", "meh").with_version("2.1"),
        review_at("2024-01-10T00:00:00Z", 4, "", "ok").with_version("2.0"),
        review_at("2024-02-01T00:00:00Z", 5, "", "good").with_version("2.0"),
        review_at("2024-01-01T00:00:00Z", 1, "", "no version"),
    ];

    let (status, body) = post(&app, "/api/analysis/versions", json!({ "reviews": reviews })).await?;

    assert_eq!(status, 200);
    let versions = body.as_array().expect("array of versions");
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0]["version"], "2.0");
    assert_eq!(versions[0]["count"], 2);
    assert_eq!(versions[0]["avg_rating"], 4.5);
    assert_eq!(versions[1]["version"], "2.1");
    Ok(())
}

#[tokio::test]
async fn test_problems_disabled_without_credentials() -> Result<()> {
    let app = TestApp::spawn().await?;
    Mock::given(method("POST"))
        .respond_with(chat_reply("[]"))
        .expect(0)
        .mount(&app.ai)
        .await;

    let reviews = vec![review_days_ago(1, 1, "crash"), review_days_ago(1, 2, "slow")];
    let (status, body) = post(&app, "/api/analysis/problems", json!({ "reviews": reviews })).await?;

    assert_eq!(status, 200);
    assert_eq!(body["enabled"], false);
    assert_eq!(body["categories"], json!([[], []]));
    assert_eq!(body["tally"], json!({}));
    Ok(())
}

#[tokio::test]
async fn test_problems_classified_in_batches() -> Result<()> {
    let app = TestApp::spawn_with_enrichment().await?;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_string_contains("crash one"))
        .respond_with(chat_reply(r#"[["TECHNICAL"], ["TECHNICAL", "PERFORMANCE"]]"#))
        .expect(1)
        .mount(&app.ai)
        .await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_string_contains("price too high"))
        .respond_with(chat_reply(r#"[["PRICING"]]"#))
        .expect(1)
        .mount(&app.ai)
        .await;

    let reviews = vec![
        review_days_ago(1, 1, "crash one"),
        review_days_ago(1, 1, "crash two and slow"),
        review_days_ago(1, 2, "price too high"),
    ];
    let (status, body) = post(&app, "/api/analysis/problems", json!({ "reviews": reviews })).await?;

    assert_eq!(status, 200);
    assert_eq!(body["enabled"], true);
    assert_eq!(
        body["categories"],
        json!([["TECHNICAL"], ["TECHNICAL", "PERFORMANCE"], ["PRICING"]])
    );
    assert_eq!(body["tally"]["TECHNICAL"], 2);
    assert_eq!(body["tally"]["PRICING"], 1);
    Ok(())
}

#[tokio::test]
async fn test_problems_degrade_on_provider_failure() -> Result<()> {
    let app = TestApp::spawn_with_enrichment().await?;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&app.ai)
        .await;

    let reviews = vec![review_days_ago(1, 1, "crash")];
    let (status, body) = post(&app, "/api/analysis/problems", json!({ "reviews": reviews })).await?;

    assert_eq!(status, 200);
    assert_eq!(body["enabled"], true);
    assert_eq!(body["categories"], json!([[]]));
    Ok(())
}

#[tokio::test]
async fn test_compare_reports_each_app_in_order() -> Result<()> {
    let app = TestApp::spawn().await?;
    Mock::given(method("GET"))
        .and(path(feed_path("1", 1)))
        .respond_with(ResponseTemplate::new(200).set_body_json(appstore_feed(
            &[
                review_days_ago(1, 5, "great app"),
                review_days_ago(2, 1, "app crashes on login"),
            ],
            true,
        )))
        .mount(&app.appstore)
        .await;
    Mock::given(method("GET"))
        .and(path(feed_path("1", 2)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "feed": {} })))
        .mount(&app.appstore)
        .await;
    Mock::given(method("GET"))
        .and(path(feed_path("2", 1)))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.appstore)
        .await;
    Mock::given(method("GET"))
        .and(path("/lookup"))
        .and(query_param("id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "trackName": "First App" }]
        })))
        .mount(&app.appstore)
        .await;

    let (status, body) = post(&app, "/api/compare", json!({ "app_ids": ["1", "2"] })).await?;

    assert_eq!(status, 200);
    let reports = body.as_array().expect("array of reports");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["name"], "First App");
    assert_eq!(reports[0]["total"], 2);
    assert_eq!(reports[0]["avg_rating"], 3.0);
    assert_eq!(reports[0]["rating_distribution"], json!([1, 0, 0, 0, 1]));
    assert_eq!(reports[1]["name"], "App 2");
    assert_eq!(reports[1]["total"], 0);
    assert_eq!(reports[1]["stop_reason"]["kind"], "failed");
    Ok(())
}

#[tokio::test]
async fn test_compare_requires_app_ids() -> Result<()> {
    let app = TestApp::spawn().await?;

    let (status, _) = post(&app, "/api/compare", json!({ "app_ids": [" "] })).await?;
    assert_eq!(status, 400);

    let too_many: Vec<String> = (0..11).map(|i| i.to_string()).collect();
    let (status, _) = post(&app, "/api/compare", json!({ "app_ids": too_many })).await?;
    assert_eq!(status, 400);
    Ok(())
}
