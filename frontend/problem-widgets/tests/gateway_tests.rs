use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

mod common;

use common::{create_test_app, spawn_platform, MockResponse, CSRF_TOKEN};

async fn post_json(
    app: &Router,
    uri: &str,
    body: Value,
    csrf_token: Option<&str>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("cookie", "sessionid=student-1; csrftoken=abc");
    if let Some(token) = csrf_token {
        builder = builder.header("x-csrftoken", token);
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_health_check() {
    let platform = spawn_platform(vec![]).await;
    let app = create_test_app(&platform);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "problem-widgets");
}

#[tokio::test]
async fn test_render_widget_accepts_string_encoded_spec() {
    let platform = spawn_platform(vec![]).await;
    let app = create_test_app(&platform);

    let answer = json!({
        "type": "Multiple Choice Checkbox",
        "options": [{"id": "x", "text": "<i>first</i>"}, {"id": "y", "text": "second"}]
    });
    let (status, body) = post_json(
        &app,
        "/widgets/render",
        json!({"answer": answer.to_string(), "correct_answers": {"is_correct": ["y"]}}),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.starts_with(r#"<div id="answer" data-kind="Multiple Choice Checkbox">"#));
    assert!(html.contains(r#"<label for="x"><i>first</i></label>"#));
    assert!(html.contains(r#"id="y" value="y" name="option" checked disabled"#));
}

#[tokio::test]
async fn test_render_widget_unknown_kind() {
    let platform = spawn_platform(vec![]).await;
    let app = create_test_app(&platform);

    let (status, body) = post_json(
        &app,
        "/widgets/render",
        json!({"answer": {"type": "Essay"}}),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Unknown type 'Essay'");
}

#[tokio::test]
async fn test_proxy_requires_csrf_header() {
    let platform = spawn_platform(vec![]).await;
    let app = create_test_app(&platform);
    let problem_id = Uuid::new_v4();

    let (status, _) = post_json(
        &app,
        &format!(
            "/semesters/{}/problems/{}/validate_answer/",
            Uuid::new_v4(),
            problem_id
        ),
        json!({"type": "Code", "code": "", "problem_id": problem_id}),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(platform.requests().is_empty());
}

#[tokio::test]
async fn test_validate_answer_proxy_returns_single_encoded_json() {
    let semester_id = Uuid::new_v4();
    let problem_id = Uuid::new_v4();
    let path = format!(
        "/semesters/{}/problems/{}/validate_answer/",
        semester_id, problem_id
    );
    let platform = spawn_platform(vec![(
        path.as_str(),
        MockResponse::double_encoded(json!({
            "coefficient": 0,
            "answer": [["4"], "expected 4"],
            "is_answered": false
        })),
    )])
    .await;
    let app = create_test_app(&platform);

    let (status, body) = post_json(
        &app,
        &path,
        json!({
            "type": "Fill In Single Blank",
            "value": "5",
            "problem_id": problem_id,
            "time_elapsed_in_seconds": 12
        }),
        Some(CSRF_TOKEN),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json.is_object());
    assert_eq!(json["coefficient"], 0.0);
    assert_eq!(json["answer"][1], "expected 4");

    let request = platform.last_request();
    assert_eq!(request.path, path);
    assert_eq!(request.csrf_token.as_deref(), Some(CSRF_TOKEN));
    assert_eq!(
        request.cookie.as_deref(),
        Some("sessionid=student-1; csrftoken=abc")
    );
    assert_eq!(request.body["value"], "5");
    assert_eq!(request.body["time_elapsed_in_seconds"], 12);
}

#[tokio::test]
async fn test_run_stdin_proxy() {
    let semester_id = Uuid::new_v4();
    let problem_id = Uuid::new_v4();
    let path = format!("/semesters/{}/problems/{}/run_stdin/", semester_id, problem_id);
    let platform = spawn_platform(vec![(
        path.as_str(),
        MockResponse::double_encoded(json!({"code": 0, "stdout": "3\n", "stderr": ""})),
    )])
    .await;
    let app = create_test_app(&platform);

    let (status, body) = post_json(
        &app,
        &path,
        json!({
            "type": "Code",
            "code": "print(1 + 2)",
            "problem_id": problem_id,
            "stdin": ""
        }),
        Some(CSRF_TOKEN),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({"code": 0, "stdout": "3\n", "stderr": ""}));
}

#[tokio::test]
async fn test_mismatched_problem_id_is_rejected() {
    let platform = spawn_platform(vec![]).await;
    let app = create_test_app(&platform);

    let (status, _) = post_json(
        &app,
        &format!(
            "/semesters/{}/problems/{}/validate_answer/",
            Uuid::new_v4(),
            Uuid::new_v4()
        ),
        json!({"type": "Code", "code": "", "problem_id": Uuid::new_v4()}),
        Some(CSRF_TOKEN),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(platform.requests().is_empty());
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let semester_id = Uuid::new_v4();
    let problem_id = Uuid::new_v4();
    let path = format!(
        "/semesters/{}/problems/{}/validate_answer/",
        semester_id, problem_id
    );
    let platform = spawn_platform(vec![(
        path.as_str(),
        MockResponse::raw(StatusCode::INTERNAL_SERVER_ERROR, "<h1>Server Error (500)</h1>"),
    )])
    .await;
    let app = create_test_app(&platform);

    let (status, body) = post_json(
        &app,
        &path,
        json!({"type": "Multiple Choice Radio", "answer_id": "a", "problem_id": problem_id}),
        Some(CSRF_TOKEN),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn test_enroll_proxy() {
    let semester_id = Uuid::new_v4();
    let path = format!("/semesters/{}/enroll/", semester_id);
    let platform = spawn_platform(vec![(
        path.as_str(),
        MockResponse::double_encoded(json!({"error": "Invalid code"})),
    )])
    .await;
    let app = create_test_app(&platform);

    let (status, body) = post_json(&app, &path, json!({"code": "ZZZ"}), Some(CSRF_TOKEN)).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({"status": "rejected", "error": "Invalid code"}));
}

#[tokio::test]
async fn test_generate_code_accepts_expiration_with_seconds() {
    let semester_id = Uuid::new_v4();
    let path = format!("/semesters/{}/generate_semester_code/", semester_id);
    let platform = spawn_platform(vec![(
        path.as_str(),
        MockResponse::json(json!({"code": "K3Q9", "is_code_expired": false})),
    )])
    .await;
    let app = create_test_app(&platform);

    let (status, body) = post_json(
        &app,
        &path,
        json!({"expiration_time": "2026-09-01T18:30:00"}),
        Some(CSRF_TOKEN),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["message"], "Join code: K3Q9");
    assert_eq!(
        platform.last_request().body,
        json!({"expiration_time": "2026-09-01T18:30"})
    );

    let (status, _) = post_json(
        &app,
        &path,
        json!({"expiration_time": "tomorrow"}),
        Some(CSRF_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metrics_endpoint_reports_requests() {
    let platform = spawn_platform(vec![]).await;
    let app = create_test_app(&platform);

    let _ = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("http_requests_total"));
}
