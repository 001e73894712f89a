use super::*;
use std::sync::atomic::{AtomicBool, Ordering};

use pathprogress_shared::TaskStatus;
use pathprogress_shared::protocol::DEFAULT_REGISTER_MESSAGE;
use serde_json::json;

use crate::seed::SEED_PATHS;
use crate::web::http::MockHttpClient;
use crate::web::storage::MemoryStore;

const BASE: &str = "http://localhost:9090/api";

fn api_with(
    client: Arc<MockHttpClient>,
    session: Arc<ApiSession>,
    store: MemoryStore,
) -> PathApi<MockHttpClient, MemoryStore> {
    PathApi::with_parts(BASE, client, session, DemoStore::new(store))
}

fn mock_api() -> (
    Arc<MockHttpClient>,
    Arc<ApiSession>,
    PathApi<MockHttpClient, MemoryStore>,
) {
    let client = Arc::new(MockHttpClient::new());
    let session = Arc::new(ApiSession::new());
    let api = api_with(
        Arc::clone(&client),
        Arc::clone(&session),
        MemoryStore::default(),
    );
    (client, session, api)
}

// ===== 认证 =====

#[tokio::test]
async fn test_demo_login_skips_network() {
    let (client, _, api) = mock_api();

    let token = api.login("demo", "demo123").await.unwrap();

    assert_eq!(token, "demo-token-learner");
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn test_demo_login_trims_username() {
    let (client, _, api) = mock_api();

    let token = api.login("  mentor  ", "mentor123").await.unwrap();

    assert_eq!(token, "demo-token-mentor");
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn test_login_posts_credentials_and_accepts_flat_token() {
    let (client, _, api) = mock_api();
    client.mock_response(
        "http://localhost:9090/api/auth/login",
        200,
        json!({"token": "flat-token"}),
    );

    let token = api.login("alice", "secret").await.unwrap();

    assert_eq!(token, "flat-token");
    let requests = client.requests.borrow();
    assert_eq!(requests[0].1, "Post");
    assert_eq!(
        requests[0].2.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
    let body: serde_json::Value = serde_json::from_str(requests[0].3.as_deref().unwrap()).unwrap();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["password"], "secret");
}

#[tokio::test]
async fn test_login_prefers_structured_token() {
    let (client, _, api) = mock_api();
    client.mock_response(
        "http://localhost:9090/api/auth/login",
        200,
        json!({"accessToken": "structured", "tokenType": "Bearer", "expiresIn": 3600}),
    );

    let token = api.login("alice", "secret").await.unwrap();

    assert_eq!(token, "structured");
}

#[tokio::test]
async fn test_login_error_carries_server_message() {
    let (client, _, api) = mock_api();
    client.mock_response(
        "http://localhost:9090/api/auth/login",
        400,
        json!({"message": "Invalid credentials"}),
    );

    let err = api.login("alice", "wrong").await.unwrap_err();

    assert!(matches!(err, ApiError::Server { status: 400, .. }));
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn test_register_normalizes_response_shapes() {
    let (client, _, api) = mock_api();
    let url = "http://localhost:9090/api/auth/register";

    client.mock_text_response(url, 200, "Welcome aboard");
    assert_eq!(api.register("bob", "pw").await.unwrap(), "Welcome aboard");

    client.mock_response(url, 200, json!({"message": "Account created"}));
    assert_eq!(api.register("bob", "pw").await.unwrap(), "Account created");

    client.mock_text_response(url, 201, "");
    assert_eq!(
        api.register("bob", "pw").await.unwrap(),
        DEFAULT_REGISTER_MESSAGE
    );

    client.mock_response(url, 409, json!({"message": "Username taken"}));
    let err = api.register("bob", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Username taken");
}

// ===== 路径列表与降级 =====

#[tokio::test]
async fn test_fetch_paths_accepts_bare_array() {
    let (client, _, api) = mock_api();
    client.mock_response(
        "http://localhost:9090/api/paths",
        200,
        json!([{"id": 1, "title": "Rust"}]),
    );

    let collection = api.fetch_paths().await.unwrap();

    assert_eq!(collection.paths.len(), 1);
    assert_eq!(collection.paths[0].base.title, "Rust");
    assert!(collection.analytics.is_none());
}

#[tokio::test]
async fn test_fetch_paths_accepts_dashboard_wrapper() {
    let (client, _, api) = mock_api();
    client.mock_response(
        "http://localhost:9090/api/paths",
        200,
        json!({
            "learningPaths": [{"id": 1, "title": "Rust"}],
            "totalPaths": "4",
            "averageProgress": "61%"
        }),
    );

    let collection = api.fetch_paths().await.unwrap();

    assert_eq!(collection.paths.len(), 1);
    let analytics = collection.analytics.unwrap();
    assert_eq!(analytics.total_paths.as_deref(), Some("4"));
    assert_eq!(analytics.average_progress.as_deref(), Some("61%"));
}

#[tokio::test]
async fn test_fetch_paths_rejects_unknown_shape() {
    let (client, _, api) = mock_api();
    client.mock_response("http://localhost:9090/api/paths", 200, json!({"items": []}));

    let err = api.fetch_paths().await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_paths_falls_back_on_connectivity_failure() {
    let (client, _, api) = mock_api();
    client.mock_network_failure("http://localhost:9090/api/paths");

    let collection = api.fetch_paths().await.unwrap();

    assert_eq!(collection.paths.len(), SEED_PATHS.len());
    assert!(collection.analytics.is_none());
}

#[tokio::test]
async fn test_fetch_paths_does_not_mask_server_errors() {
    let (client, _, api) = mock_api();
    client.mock_response(
        "http://localhost:9090/api/paths",
        500,
        json!({"message": "boom"}),
    );

    let err = api.fetch_paths().await.unwrap_err();

    assert!(matches!(err, ApiError::Server { status: 500, .. }));
}

#[tokio::test]
async fn test_create_path_falls_back_to_demo_store() {
    let store = MemoryStore::default();
    let client = Arc::new(MockHttpClient::new());
    let api = api_with(
        Arc::clone(&client),
        Arc::new(ApiSession::new()),
        store.clone(),
    );
    client.mock_network_failure("http://localhost:9090/api/paths");

    let payload = PathPayload {
        title: "Offline path".to_string(),
        description: None,
        start_date: None,
        target_end_date: None,
    };
    let created = api.create_path(&payload).await.unwrap();

    assert!(created.id.unwrap().canonical().starts_with("demo-"));
    let stored = DemoStore::new(store).get_all();
    assert!(stored.iter().any(|path| path.base.title == "Offline path"));
}

#[tokio::test]
async fn test_create_path_propagates_validation_errors() {
    let (client, _, api) = mock_api();
    client.mock_response(
        "http://localhost:9090/api/paths",
        422,
        json!({"message": "title must not be blank"}),
    );

    let payload = PathPayload {
        title: String::new(),
        description: None,
        start_date: None,
        target_end_date: None,
    };
    let err = api.create_path(&payload).await.unwrap_err();

    assert!(matches!(err, ApiError::Server { status: 422, .. }));
    assert_eq!(err.to_string(), "title must not be blank");
}

// ===== 会话与请求头 =====

#[tokio::test]
async fn test_unauthorized_notifies_session_handler() {
    let (client, session, api) = mock_api();
    let fired = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&fired);
    session.set_unauthorized_handler(move || flag.store(true, Ordering::Relaxed));
    client.mock_response(
        "http://localhost:9090/api/paths/7",
        401,
        json!({"message": "expired"}),
    );

    let err = api.get_path(&Identifier::Num(7)).await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized));
    assert!(fired.load(Ordering::Relaxed));
}

#[tokio::test]
async fn test_bearer_token_attached_when_present() {
    let (client, session, api) = mock_api();
    client.mock_response("http://localhost:9090/api/paths", 200, json!([]));

    api.fetch_paths().await.unwrap();
    session.set_token(Some("token-9".to_string()));
    api.fetch_paths().await.unwrap();
    session.set_token(None);
    api.fetch_paths().await.unwrap();

    let requests = client.requests.borrow();
    assert!(requests[0].2.get("Authorization").is_none());
    assert_eq!(
        requests[1].2.get("Authorization").map(String::as_str),
        Some("Bearer token-9")
    );
    assert!(requests[2].2.get("Authorization").is_none());
}

// ===== 子资源 =====

#[tokio::test]
async fn test_create_section_posts_payload() {
    let (client, _, api) = mock_api();
    client.mock_response(
        "http://localhost:9090/api/paths/7/sections",
        201,
        json!({"id": 11, "title": "Basics", "orderIndex": 1}),
    );

    let payload = SectionPayload {
        title: "Basics".to_string(),
        description: Some("Syntax and tooling".to_string()),
        order_index: Some(1),
        estimated_days: Some(7),
    };
    let created = api.create_section(&Identifier::Num(7), &payload).await.unwrap();

    assert_eq!(created.id, Identifier::Num(11));
    let requests = client.requests.borrow();
    assert_eq!(requests[0].1, "Post");
    let body: serde_json::Value = serde_json::from_str(requests[0].3.as_deref().unwrap()).unwrap();
    assert_eq!(body["orderIndex"], 1);
    assert_eq!(body["estimatedDays"], 7);
    assert_eq!(body["description"], "Syntax and tooling");
}

#[tokio::test]
async fn test_nested_resource_urls_compose() {
    let (client, _, api) = mock_api();
    client.mock_response(
        "http://localhost:9090/api/paths/7/sections/3/tasks/9",
        200,
        json!({"id": 9, "title": "Write tests", "status": "COMPLETED"}),
    );

    let payload = TaskPayload {
        title: "Write tests".to_string(),
        description: None,
        r#type: Some(TaskStatus::Completed),
        status: Some(TaskStatus::Completed),
        estimated_minutes: None,
    };
    let updated = api
        .update_task(
            &Identifier::Num(7),
            &Identifier::Num(3),
            &Identifier::Num(9),
            &payload,
        )
        .await
        .unwrap();

    assert_eq!(updated.status(), TaskStatus::Completed);
    let requests = client.requests.borrow();
    assert_eq!(requests[0].0, "http://localhost:9090/api/paths/7/sections/3/tasks/9");
    assert_eq!(requests[0].1, "Put");
}

#[tokio::test]
async fn test_delete_returns_unit_and_maps_errors() {
    let (client, _, api) = mock_api();
    client.mock_text_response("http://localhost:9090/api/paths/7/sections/3/tasks/9", 204, "");

    api.delete_task(&Identifier::Num(7), &Identifier::Num(3), &Identifier::Num(9))
        .await
        .unwrap();

    client.mock_response(
        "http://localhost:9090/api/paths/7/sections/3",
        500,
        json!({"message": "cannot delete"}),
    );
    let err = api
        .delete_section(&Identifier::Num(7), &Identifier::Num(3))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "cannot delete");
    let requests = client.requests.borrow();
    assert_eq!(requests[0].1, "Delete");
    assert_eq!(requests[1].1, "Delete");
}

// ===== 对真实后端的冒烟测试 =====

/// 原生环境下跑真实 HTTP 的执行器，只给冒烟测试用
struct ReqwestHttpClient {
    client: reqwest::Client,
}

#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, crate::web::http::HttpError> {
        use crate::web::http::HttpError;

        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, req.url.as_str());
        for (key, value) in &req.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = &req.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|err| HttpError::NetworkError(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| HttpError::ResponseParseFailed(err.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

#[tokio::test]
#[ignore = "requires the backend running on localhost:9090"]
async fn test_live_backend_smoke() {
    let api = PathApi::with_parts(
        BASE,
        Arc::new(ReqwestHttpClient {
            client: reqwest::Client::new(),
        }),
        Arc::new(ApiSession::new()),
        DemoStore::new(MemoryStore::default()),
    );

    // 不管后端怎么答复，都必须落进已知的错误分类，不能是解码失败
    match api.get_path(&Identifier::from("smoke-test-missing")).await {
        Ok(path) => println!("unexpectedly found a path: {:?}", path.id),
        Err(err) => assert!(matches!(
            err,
            ApiError::Server { .. } | ApiError::Unauthorized | ApiError::Network(_)
        )),
    }
}
