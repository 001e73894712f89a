//! API 客户端
//!
//! 面向学习路径后端的 REST 客户端。会话状态（令牌、401 回调）集中在
//! 注入的 `ApiSession` 里，不放模块级全局。连接层失败时，列表读取和
//! 路径创建两个操作降级到演示数据；服务端明确拒绝的请求（4xx / 5xx）
//! 原样上抛，不做降级。

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use leptos::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;

use pathprogress_shared::{
    API_BASE_URL, DEMO_LATENCY_MS, HEADER_AUTHORIZATION, Identifier, PathPayload, PathResponse,
    SectionPayload, SectionResponse, TaskPayload, TaskResponse,
    protocol::{LoginRequest, LoginResponse, PathCollection, PathCollectionResponse,
        RegisterRequest, register_message},
};

use crate::demo::DemoStore;
use crate::error::ApiError;
use crate::seed;
use crate::web::http::{FetchHttpClient, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::web::storage::{KeyValueStore, LocalStorage};
use crate::web::timer;
use crate::{log_info, log_warn};

// ===== 会话状态 =====

/// 跨请求共享的会话状态
///
/// 持有当前令牌和收到 401 时要触发的回调。整个对象通过 `Arc`
/// 注入到需要它的地方。
#[derive(Default)]
pub struct ApiSession {
    token: RwLock<Option<String>>,
    on_unauthorized: RwLock<Option<Arc<dyn Fn() + Send + Sync>>>,
}

impl ApiSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_token(&self, token: Option<String>) {
        *lock_write(&self.token) = token;
    }

    pub fn token(&self) -> Option<String> {
        lock_read(&self.token).clone()
    }

    /// 注册 401 回调，覆盖之前的注册
    pub fn set_unauthorized_handler(&self, handler: impl Fn() + Send + Sync + 'static) {
        *lock_write(&self.on_unauthorized) = Some(Arc::new(handler));
    }

    fn notify_unauthorized(&self) {
        let handler = lock_read(&self.on_unauthorized).clone();
        if let Some(handler) = handler {
            handler();
        }
    }
}

fn lock_read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn lock_write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

// ===== REST 客户端 =====

/// REST 客户端
///
/// 泛型于 HTTP 执行器与演示存储的键值后端，测试里替换成脚本化实现。
pub struct PathApi<C: HttpClient, S: KeyValueStore> {
    base_url: String,
    client: Arc<C>,
    session: Arc<ApiSession>,
    demo: DemoStore<S>,
}

/// 生产环境用的具体客户端类型
pub type AppApi = PathApi<FetchHttpClient, LocalStorage>;

impl<C: HttpClient, S: KeyValueStore + Clone> Clone for PathApi<C, S> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: Arc::clone(&self.client),
            session: Arc::clone(&self.session),
            demo: self.demo.clone(),
        }
    }
}

impl AppApi {
    pub fn new() -> Self {
        PathApi::with_parts(
            API_BASE_URL,
            Arc::new(FetchHttpClient),
            Arc::new(ApiSession::new()),
            DemoStore::new(LocalStorage),
        )
    }
}

impl Default for AppApi {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> AppApi {
    use_context::<AppApi>().expect("AppApi should be provided")
}

impl<C: HttpClient, S: KeyValueStore + Clone> PathApi<C, S> {
    pub fn with_parts(
        base_url: &str,
        client: Arc<C>,
        session: Arc<ApiSession>,
        demo: DemoStore<S>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session,
            demo,
        }
    }

    pub fn session(&self) -> Arc<ApiSession> {
        Arc::clone(&self.session)
    }

    // ===== 认证 =====

    /// 登录，返回令牌
    ///
    /// 演示账号在本地短路，不发任何网络请求。
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let username = username.trim();
        if let Some(account) = seed::find_demo_account(username, password) {
            log_info!("[Api] Demo account '{}' signed in locally.", username);
            timer::sleep(DEMO_LATENCY_MS).await;
            return Ok(account.token.to_string());
        }

        let body = to_body(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        let response: LoginResponse = self
            .request_json(HttpMethod::Post, "auth/login", Some(body))
            .await?;
        Ok(response.into_token())
    }

    /// 注册，返回一条可以直接展示的确认文案
    pub async fn register(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let body = to_body(&RegisterRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        })?;
        let response = self
            .send_request(HttpMethod::Post, "auth/register", Some(body))
            .await?;
        if !response.ok() {
            return Err(ApiError::server(
                response.status,
                extract_message(&response.body),
            ));
        }
        Ok(register_message(&response.body))
    }

    // ===== 路径 =====

    /// 拉取全部路径，可能附带服务端算好的统计
    ///
    /// 后端不可达时降级到演示数据，其余错误原样上抛。
    pub async fn fetch_paths(&self) -> Result<PathCollection, ApiError> {
        match self
            .request_json::<PathCollectionResponse>(HttpMethod::Get, "paths", None)
            .await
        {
            Ok(response) => Ok(response.normalize()),
            Err(err) if err.is_connectivity() => {
                log_warn!("[Api] Backend unreachable, serving demo paths: {:?}", err);
                timer::sleep(DEMO_LATENCY_MS).await;
                Ok(PathCollection {
                    paths: self.demo.get_all(),
                    analytics: None,
                })
            }
            Err(err) => Err(err),
        }
    }

    /// 创建路径，后端不可达时写入演示存储
    pub async fn create_path(&self, payload: &PathPayload) -> Result<PathResponse, ApiError> {
        let body = to_body(payload)?;
        match self
            .request_json::<PathResponse>(HttpMethod::Post, "paths", Some(body))
            .await
        {
            Ok(path) => Ok(path),
            Err(err) if err.is_connectivity() => {
                log_warn!("[Api] Backend unreachable, saving path to demo store: {:?}", err);
                timer::sleep(DEMO_LATENCY_MS).await;
                Ok(self.demo.append(payload.clone()))
            }
            Err(err) => Err(err),
        }
    }

    /// 单条路径详情，这里不做演示降级
    pub async fn get_path(&self, id: &Identifier) -> Result<PathResponse, ApiError> {
        self.request_json(HttpMethod::Get, &path_url(id), None).await
    }

    pub async fn update_path(
        &self,
        id: &Identifier,
        payload: &PathPayload,
    ) -> Result<PathResponse, ApiError> {
        let body = to_body(payload)?;
        self.request_json(HttpMethod::Put, &path_url(id), Some(body))
            .await
    }

    pub async fn delete_path(&self, id: &Identifier) -> Result<(), ApiError> {
        self.request_empty(HttpMethod::Delete, &path_url(id)).await
    }

    // ===== 小节 =====

    pub async fn create_section(
        &self,
        path_id: &Identifier,
        payload: &SectionPayload,
    ) -> Result<SectionResponse, ApiError> {
        let body = to_body(payload)?;
        self.request_json(
            HttpMethod::Post,
            &format!("{}/sections", path_url(path_id)),
            Some(body),
        )
        .await
    }

    pub async fn update_section(
        &self,
        path_id: &Identifier,
        section_id: &Identifier,
        payload: &SectionPayload,
    ) -> Result<SectionResponse, ApiError> {
        let body = to_body(payload)?;
        self.request_json(
            HttpMethod::Put,
            &section_url(path_id, section_id),
            Some(body),
        )
        .await
    }

    pub async fn delete_section(
        &self,
        path_id: &Identifier,
        section_id: &Identifier,
    ) -> Result<(), ApiError> {
        self.request_empty(HttpMethod::Delete, &section_url(path_id, section_id))
            .await
    }

    // ===== 任务 =====

    pub async fn create_task(
        &self,
        path_id: &Identifier,
        section_id: &Identifier,
        payload: &TaskPayload,
    ) -> Result<TaskResponse, ApiError> {
        let body = to_body(payload)?;
        self.request_json(
            HttpMethod::Post,
            &format!("{}/tasks", section_url(path_id, section_id)),
            Some(body),
        )
        .await
    }

    pub async fn update_task(
        &self,
        path_id: &Identifier,
        section_id: &Identifier,
        task_id: &Identifier,
        payload: &TaskPayload,
    ) -> Result<TaskResponse, ApiError> {
        let body = to_body(payload)?;
        self.request_json(
            HttpMethod::Put,
            &task_url(path_id, section_id, task_id),
            Some(body),
        )
        .await
    }

    pub async fn delete_task(
        &self,
        path_id: &Identifier,
        section_id: &Identifier,
        task_id: &Identifier,
    ) -> Result<(), ApiError> {
        self.request_empty(HttpMethod::Delete, &task_url(path_id, section_id, task_id))
            .await
    }

    // ===== 请求组装 =====

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发出请求：挂上令牌，统一拦截 401
    async fn send_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, ApiError> {
        let mut request = HttpRequest::new(&self.url(path), method);
        if let Some(body) = body {
            request = request
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }
        if let Some(token) = self.session.token() {
            request = request.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        let response = self.client.send(request).await?;
        if response.status == 401 {
            log_warn!("[Api] Received 401, notifying session handler.");
            self.session.notify_unauthorized();
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let response = self.send_request(method, path, body).await?;
        if !response.ok() {
            return Err(ApiError::server(
                response.status,
                extract_message(&response.body),
            ));
        }
        response
            .json()
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn request_empty(&self, method: HttpMethod, path: &str) -> Result<(), ApiError> {
        let response = self.send_request(method, path, None).await?;
        if !response.ok() {
            return Err(ApiError::server(
                response.status,
                extract_message(&response.body),
            ));
        }
        Ok(())
    }
}

fn path_url(id: &Identifier) -> String {
    format!("paths/{}", id.canonical())
}

fn section_url(path_id: &Identifier, section_id: &Identifier) -> String {
    format!(
        "paths/{}/sections/{}",
        path_id.canonical(),
        section_id.canonical()
    )
}

fn task_url(path_id: &Identifier, section_id: &Identifier, task_id: &Identifier) -> String {
    format!(
        "paths/{}/sections/{}/tasks/{}",
        path_id.canonical(),
        section_id.canonical(),
        task_id.canonical()
    )
}

fn to_body<T: Serialize>(payload: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(payload).map_err(|err| ApiError::Decode(err.to_string()))
}

/// 从错误响应体里捞服务端给的说明文字
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests;
