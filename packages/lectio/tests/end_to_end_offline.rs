//! Offline end-to-end tests: fixture document in, booklet/PDF out, with no
//! network access anywhere.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::util::ServiceExt;

use lectio::config::Config;
use lectio::providers::FakeProvider;
use lectio::server::{build_app, AppState};
use lectio::testing::{FixtureSource, ScriptedProvider, StubPdf};

fn fixture_html() -> String {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/usccb/sample_1.html");
    std::fs::read_to_string(path).expect("fixture present")
}

fn app_state(provider: Arc<dyn lectio::providers::LlmProvider>) -> AppState {
    AppState {
        provider,
        fetcher: Arc::new(FixtureSource::new(
            fixture_html(),
            "https://bible.usccb.org/bible/readings/20250809.cfm",
        )),
        pdf: Arc::new(StubPdf),
        config: Arc::new(Config::default()),
        default_date: None,
    }
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn run_route_renders_booklet_from_fixture() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        "Love of God asks for the whole heart.",
        r#"{"title": "The Sower", "artist": "Jean-Francois Millet", "year": "1850",
            "image_url": "https://upload.wikimedia.org/wikipedia/commons/0/05/Sower.jpg"}"#,
    ]));
    let app = build_app(app_state(provider));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/run")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from("date=2025-08-09"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("Deuteronomy 6:4-13"));
    assert!(body.contains("Hear, O Israel!"));
    assert!(body.contains("Love of God asks for the whole heart."));
    assert!(body.contains("The Sower"));
    assert!(body.contains("20250809.cfm"));
}

#[tokio::test]
async fn run_route_works_with_the_fake_provider() {
    let app = build_app(app_state(Arc::new(FakeProvider)));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/run")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from("date=2025-08-09"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("stub reflection"));
    assert!(body.contains("Test Art"));
    assert!(body.contains("Matthew 17:14-20"));
}

#[tokio::test]
async fn run_route_defaults_the_date_when_omitted() {
    let app = build_app(app_state(Arc::new(FakeProvider)));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/run")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn pdf_route_returns_a_pdf_document() {
    let app = build_app(app_state(Arc::new(FakeProvider)));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/pdf")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from("date=2024-05-04"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let body = body_bytes(response).await;
    assert!(body.starts_with(b"%PDF"));
    assert!(body.len() > 10);
}

#[tokio::test]
async fn index_serves_the_date_form() {
    let mut state = app_state(Arc::new(FakeProvider));
    state.default_date = Some("2025-08-09".to_string());
    let app = build_app(state);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("<form method='post' action='/run'>"));
    assert!(body.contains("value='2025-08-09'"));
}

#[tokio::test]
async fn health_route_is_ok() {
    let app = build_app(app_state(Arc::new(FakeProvider)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"OK");
}

#[tokio::test]
async fn provider_exhaustion_maps_to_bad_gateway() {
    // One scripted output, but the pipeline needs two model calls.
    let provider = Arc::new(ScriptedProvider::new(vec!["only a reflection"]));
    let app = build_app(app_state(provider));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/run")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from("date=2025-08-09"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
