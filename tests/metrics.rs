// tests/metrics.rs
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serial_test::serial;
use tower::ServiceExt;

async fn build_app() -> Router {
    std::env::set_var("FEEDBACK_TEST_MODE", "mock");
    interview_feedback::app()
        .await
        .expect("app() should build Router in tests")
}

async fn scrape(app: Router) -> String {
    let resp = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    // axum::body::to_bytes requires an explicit limit
    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap(); // 1 MiB
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn scoring_and_reports_show_up_in_exposition() {
    let app = build_app().await;

    let r = app
        .clone()
        .oneshot(
            Request::post("/score")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"transcript":"great answer","elapsed_secs":2}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(r.status(), StatusCode::OK);

    let r = app
        .clone()
        .oneshot(
            Request::post("/report")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"transcript":"great answer"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(r.status(), StatusCode::OK);

    let text = scrape(app).await;
    for needle in [
        "interview_scores_total",
        "interview_reports_total",
        "interview_confidence_score",
        "interview_sentiment_score",
        "interview_lexicon_entries",
    ] {
        assert!(
            text.contains(needle),
            "metrics exposition missing '{needle}'\n{text}"
        );
    }
}

#[tokio::test]
async fn app_can_be_built_twice() {
    // Recorder is process-wide; a second app() must reuse it.
    let a = build_app().await;
    let b = build_app().await;
    scrape(a).await;
    scrape(b).await;
}

async fn get_status(app: Router, uri: &str) -> StatusCode {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
        .status()
}

#[tokio::test]
#[serial]
async fn debug_routes_follow_env_gate() {
    std::env::remove_var("DEBUG_ROUTES");
    let app = build_app().await;
    assert_eq!(get_status(app, "/debug/lexicon").await, StatusCode::NOT_FOUND);

    std::env::set_var("DEBUG_ROUTES", "1");
    let app = build_app().await;
    assert_eq!(get_status(app.clone(), "/debug/lexicon").await, StatusCode::OK);
    assert_eq!(
        get_status(app, "/debug/breakdown?text=um%20great&elapsed=2").await,
        StatusCode::OK
    );
    std::env::remove_var("DEBUG_ROUTES");
}

#[tokio::test]
#[serial]
async fn feedback_requests_are_counted() {
    let app = build_app().await;
    let r = app
        .clone()
        .oneshot(
            Request::post("/feedback")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"question_index":0,"answer":"Mongo, Express, React, Node"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(r.status(), StatusCode::OK);

    let text = scrape(app).await;
    let line = text
        .lines()
        .find(|l| l.starts_with("interview_feedback_requests_total{"))
        .unwrap_or_else(|| panic!("feedback counter missing\n{text}"));
    assert!(line.contains(r#"provider="mock""#), "{line}");
    assert!(line.contains(r#"outcome="ok""#), "{line}");
}
