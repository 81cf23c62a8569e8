use std::collections::HashMap;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::Query;
use axum::http::{Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use slackin_viewer::client::fetch_photo_set;
use slackin_viewer::config::{UpstreamConfig, ViewerConfig};
use slackin_viewer::events::{Target, ViewerInput};
use slackin_viewer::source::FlickrSource;
use slackin_viewer::viewer::{Overlay, SharedPresentation, Viewer};
use slackin_viewer::{PhotoItem, tasks, web};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

const FULL_SET: &str = r#"{
    "photoset": {
        "id": "full", "primary": "1", "owner": "someone", "page": 1, "total": 3,
        "photo": [
            {"id": "1", "secret": "x", "server": "1", "farm": 1, "title": "Harbour", "isprimary": "1",
             "url_o": "https://farm.example/1_o.jpg", "height_o": "2000", "width_o": "3000"},
            {"id": "2", "secret": "y", "server": "1", "farm": 1, "title": "", "isprimary": "0",
             "url_o": "https://farm.example/2_o.jpg"},
            {"id": "3", "secret": "z", "server": "1", "farm": 1, "title": "Dunes", "isprimary": "0",
             "url_o": "https://farm.example/3_o.jpg"}
        ]
    },
    "stat": "ok"
}"#;

async fn fake_flickr(Query(params): Query<HashMap<String, String>>) -> Response {
    let expected = [
        ("api_key", "test-key"),
        ("method", "flickr.photosets.getPhotos"),
        ("format", "json"),
        ("nojsoncallback", "1"),
        ("extras", "url_o"),
    ];
    for (key, value) in expected {
        if params.get(key).map(String::as_str) != Some(value) {
            return (StatusCode::BAD_REQUEST, format!("bad {key}")).into_response();
        }
    }
    let json = |body: &'static str| ([(header::CONTENT_TYPE, "application/json")], body);
    match params.get("photoset_id").map(String::as_str) {
        Some("full") => json(FULL_SET).into_response(),
        Some("empty") => json(r#"{"photoset": {"id": "empty", "photo": []}, "stat": "ok"}"#)
            .into_response(),
        Some("missing") => {
            json(r#"{"stat": "fail", "code": 1, "message": "Photoset not found"}"#).into_response()
        }
        Some("broken") => json("<html>maintenance</html>").into_response(),
        _ => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_fake_flickr() -> String {
    let base = serve(Router::new().route("/services/rest/", get(fake_flickr))).await;
    format!("{base}/services/rest/")
}

fn adapter(endpoint: &str, photoset_id: &str) -> Router {
    let upstream = UpstreamConfig {
        endpoint: endpoint.to_string(),
        api_key: "test-key".to_string(),
        photoset_id: photoset_id.to_string(),
        ..UpstreamConfig::default()
    };
    web::router(FlickrSource::new(reqwest::Client::new(), upstream), "/photos")
}

async fn get_photos(router: Router) -> (StatusCode, Option<String>, String) {
    let response = router
        .oneshot(Request::builder().uri("/photos").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn adapter_reshapes_upstream_photos() {
    let endpoint = spawn_fake_flickr().await;
    let (status, content_type, body) = get_photos(adapter(&endpoint, "full")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"src": "https://farm.example/1_o.jpg", "title": "Harbour"},
            {"src": "https://farm.example/2_o.jpg", "title": ""},
            {"src": "https://farm.example/3_o.jpg", "title": "Dunes"}
        ])
    );
}

#[tokio::test]
async fn adapter_emits_empty_object_for_empty_set() {
    let endpoint = spawn_fake_flickr().await;
    let (status, _, body) = get_photos(adapter(&endpoint, "empty")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "{}");
}

#[tokio::test]
async fn adapter_reports_upstream_failures_as_bad_gateway() {
    let endpoint = spawn_fake_flickr().await;
    for photoset_id in ["missing", "broken", "down"] {
        let (status, _, _) = get_photos(adapter(&endpoint, photoset_id)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY, "photoset {photoset_id}");
    }
}

#[tokio::test]
async fn adapter_ignores_client_query_parameters() {
    let endpoint = spawn_fake_flickr().await;
    let response = adapter(&endpoint, "full")
        .oneshot(
            Request::builder()
                .uri("/photos?photoset_id=empty")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let photos: slackin_viewer::PhotoSet = serde_json::from_slice(&body).unwrap();
    assert_eq!(photos.len(), 3);
}

#[tokio::test]
async fn client_accepts_every_response_shape() {
    let base = serve(
        Router::new()
            .route("/array", get(|| async { r#"[{"src": "a.jpg", "title": "A"}]"# }))
            .route("/empty", get(|| async { "{}" }))
            .route(
                "/indexed",
                get(|| async { r#"{"1": {"src": "b.jpg", "title": "B"}, "0": {"src": "a.jpg", "title": "A"}}"# }),
            )
            .route("/gone", get(|| async { StatusCode::NOT_FOUND })),
    )
    .await;
    let client = reqwest::Client::new();

    let array = fetch_photo_set(&client, &format!("{base}/array")).await.unwrap();
    assert_eq!(array.get(0), Some(&PhotoItem::new("a.jpg", "A")));

    let empty = fetch_photo_set(&client, &format!("{base}/empty")).await.unwrap();
    assert!(empty.is_empty());

    let indexed = fetch_photo_set(&client, &format!("{base}/indexed")).await.unwrap();
    let srcs: Vec<&str> = indexed.iter().map(|item| item.src.as_str()).collect();
    assert_eq!(srcs, vec!["a.jpg", "b.jpg"]);

    assert!(fetch_photo_set(&client, &format!("{base}/gone")).await.is_err());
}

async fn run_viewer_against(
    source_url: String,
) -> (SharedPresentation, mpsc::Sender<ViewerInput>, CancellationToken) {
    let (tx, rx) = mpsc::channel(16);
    let presentation = SharedPresentation::new();
    let cancel = CancellationToken::new();
    let viewer = Viewer::new(presentation.clone(), &ViewerConfig::default());
    tokio::spawn(tasks::viewer::run(viewer, rx, cancel.clone()));
    tasks::fetch::run(reqwest::Client::new(), source_url, tx.clone(), cancel.clone())
        .await
        .unwrap();
    (presentation, tx, cancel)
}

async fn wait_for<F: Fn() -> bool>(check: F) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}

#[tokio::test]
async fn viewer_loads_through_adapter_and_opens() {
    let endpoint = spawn_fake_flickr().await;
    let base = serve(adapter(&endpoint, "full")).await;

    let (presentation, tx, cancel) = run_viewer_against(format!("{base}/photos")).await;
    assert!(wait_for(|| !presentation.snapshot().fetching).await);
    let snapshot = presentation.snapshot();
    assert_eq!(snapshot.thumbnail.src.as_deref(), Some("https://farm.example/1_o.jpg"));
    assert_eq!(snapshot.thumbnail.alt.as_deref(), Some("Harbour"));

    tx.send(ViewerInput::Click(Target::Thumbnail)).await.unwrap();
    tx.send(ViewerInput::Click(Target::Next)).await.unwrap();
    let on_second = || {
        presentation.snapshot().image.src.as_deref() == Some("https://farm.example/2_o.jpg")
    };
    assert!(wait_for(on_second).await);
    let snapshot = presentation.snapshot();
    assert_eq!(snapshot.overlay, Overlay::Open);
    assert!(!snapshot.previous_disabled);
    assert!(!snapshot.next_disabled);
    assert_eq!(snapshot.description, "Open in a new tab");
    assert_eq!(snapshot.preloaded.as_deref(), Some("https://farm.example/3_o.jpg"));
    cancel.cancel();
}

#[tokio::test]
async fn failed_fetch_leaves_viewer_fetching() {
    let endpoint = spawn_fake_flickr().await;
    let base = serve(adapter(&endpoint, "down")).await;

    let (presentation, tx, cancel) = run_viewer_against(format!("{base}/photos")).await;
    tx.send(ViewerInput::Click(Target::Thumbnail)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let snapshot = presentation.snapshot();
    assert!(snapshot.fetching);
    assert_eq!(snapshot.overlay, Overlay::Closed);
    cancel.cancel();
}

#[tokio::test]
async fn empty_set_through_adapter_keeps_viewer_unopenable() {
    let endpoint = spawn_fake_flickr().await;
    let base = serve(adapter(&endpoint, "empty")).await;

    let (presentation, tx, cancel) = run_viewer_against(format!("{base}/photos")).await;
    tx.send(ViewerInput::Click(Target::Thumbnail)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let snapshot = presentation.snapshot();
    assert!(snapshot.fetching);
    assert_eq!(snapshot.overlay, Overlay::Closed);
    cancel.cancel();
}
