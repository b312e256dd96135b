//! # Paginator Tests
//!
//! Drives the cutoff paginator over scripted sources and checks what it keeps
//! and where it stops.

mod common;

use common::setup_tracing;
use revscope::fetch::{collect_all, FetchRequest, StopReason};
use revscope::source::SourcePage;
use revscope_test_utils::{review_at, review_days_ago, sample_business, ScriptedPage, ScriptedSource};
use std::sync::Arc;

fn request(max_pages: u32) -> FetchRequest {
    FetchRequest::from_days(max_pages, 365)
}

#[tokio::test]
async fn test_retains_recent_and_stops_on_first_stale_page() {
    setup_tracing();
    let source = Arc::new(ScriptedSource::new(
        "app",
        vec![
            ScriptedPage::reviews(vec![
                review_days_ago(1, 5, "fresh one"),
                review_days_ago(400, 1, "stale one"),
            ]),
            ScriptedPage::reviews(vec![
                review_days_ago(400, 2, "stale two"),
                review_days_ago(5, 4, "fresh two"),
            ]),
            ScriptedPage::reviews(vec![
                review_days_ago(500, 3, "stale three"),
                review_days_ago(600, 3, "stale four"),
            ]),
            ScriptedPage::reviews(vec![review_days_ago(2, 5, "never reached")]),
        ],
    ));

    let outcome = collect_all(source.clone(), request(10)).await;

    let texts: Vec<&str> = outcome.reviews.iter().map(|r| r.review.as_str()).collect();
    assert_eq!(texts, vec!["fresh one", "fresh two"]);
    assert_eq!(outcome.stop_reason, StopReason::AllTooOld);
    assert_eq!(outcome.pages_fetched, 3);
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn test_stale_first_page_does_not_stop_the_run() {
    setup_tracing();
    let source = Arc::new(ScriptedSource::new(
        "app",
        vec![
            ScriptedPage::reviews(vec![review_days_ago(900, 5, "pinned")]),
            ScriptedPage::reviews(vec![review_days_ago(3, 4, "recent")]),
        ],
    ));

    let outcome = collect_all(source.clone(), request(10)).await;

    assert_eq!(outcome.reviews.len(), 1);
    assert_eq!(outcome.reviews[0].review, "recent");
    assert_eq!(outcome.stop_reason, StopReason::EmptyPage);
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn test_page_budget_is_respected() {
    setup_tracing();
    let page = || ScriptedPage::reviews(vec![review_days_ago(1, 5, "ok")]);
    let source = Arc::new(ScriptedSource::new("app", vec![page(), page(), page(), page()]));

    let outcome = collect_all(source.clone(), request(2)).await;

    assert_eq!(outcome.reviews.len(), 2);
    assert_eq!(outcome.stop_reason, StopReason::BudgetExhausted);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_failure_keeps_partial_result() {
    setup_tracing();
    let source = Arc::new(ScriptedSource::new(
        "app",
        vec![
            ScriptedPage::reviews(vec![review_days_ago(1, 5, "kept")]),
            ScriptedPage::Fail("boom".to_string()),
            ScriptedPage::reviews(vec![review_days_ago(1, 5, "never reached")]),
        ],
    ));

    let outcome = collect_all(source.clone(), request(10)).await;

    assert_eq!(outcome.reviews.len(), 1);
    assert!(outcome.stop_reason.is_failure());
    assert_eq!(
        outcome.stop_reason,
        StopReason::Failed("Page 2: Invalid response: boom".to_string())
    );
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_upstream_page_count_clamps_budget() {
    setup_tracing();
    let first = ScriptedPage::Page(SourcePage {
        entries: vec![review_days_ago(1, 4, "only page")],
        is_last: false,
        business_info: Some(sample_business()),
        total_pages: Some(1),
    });
    let source = Arc::new(ScriptedSource::new(
        "shop.example",
        vec![first, ScriptedPage::reviews(vec![review_days_ago(1, 4, "hidden")])],
    ));

    let outcome = collect_all(source.clone(), request(10)).await;

    assert_eq!(outcome.reviews.len(), 1);
    assert_eq!(outcome.business_info, Some(sample_business()));
    assert_eq!(outcome.stop_reason, StopReason::BudgetExhausted);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_last_page_flag_ends_the_run() {
    setup_tracing();
    let source = Arc::new(ScriptedSource::new(
        "app",
        vec![
            ScriptedPage::reviews(vec![review_days_ago(1, 5, "a")]),
            ScriptedPage::last(vec![review_days_ago(2, 3, "b")]),
        ],
    ));

    let outcome = collect_all(source.clone(), request(10)).await;

    assert_eq!(outcome.reviews.len(), 2);
    assert_eq!(outcome.stop_reason, StopReason::LastPage);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_empty_first_page_yields_empty_result() {
    setup_tracing();
    let source = Arc::new(ScriptedSource::new("app", vec![]));

    let outcome = collect_all(source.clone(), request(10)).await;

    assert!(outcome.reviews.is_empty());
    assert_eq!(outcome.stop_reason, StopReason::EmptyPage);
    assert_eq!(outcome.pages_fetched, 1);
}

#[tokio::test]
async fn test_review_dated_exactly_at_cutoff_is_retained() {
    setup_tracing();
    let boundary = review_at("2024-06-01T00:00:00Z", 4, "", "on the boundary");
    let just_before = review_at("2024-05-31T23:59:59Z", 2, "", "one second too old");
    let source = Arc::new(ScriptedSource::new(
        "app",
        vec![ScriptedPage::reviews(vec![boundary.clone(), just_before])],
    ));

    let outcome = collect_all(source, FetchRequest::new(5, boundary.date)).await;

    assert_eq!(outcome.reviews.len(), 1);
    assert_eq!(outcome.reviews[0].review, "on the boundary");
}
