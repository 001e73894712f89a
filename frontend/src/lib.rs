//! PathProgress 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route` / `web::router`: 路由定义与路由服务（自带认证守卫）
//! - `auth`: 认证状态管理
//! - `api`: 远端 REST 客户端与演示模式兜底
//! - `store`: 跨页面共享的路径缓存
//! - `components`: 页面与 UI 组件层

use leptos::prelude::*;

mod api;
mod auth;
mod demo;
mod error;
mod seed;
mod store;

mod components {
    pub mod app_header;
    pub mod create_path;
    pub mod create_section;
    pub mod create_task;
    pub mod dashboard;
    pub mod home;
    pub mod login;
    pub mod path_detail;
    pub mod register;
    pub mod register_success;
    pub mod status;
}

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web;

use api::AppApi;
use auth::{AuthContext, init_auth};
use components::create_path::CreatePathPage;
use components::create_section::CreateSectionPage;
use components::create_task::CreateTaskPage;
use components::dashboard::DashboardPage;
use components::home::HomePage;
use components::login::LoginPage;
use components::path_detail::PathDetailPage;
use components::register::RegisterPage;
use components::register_success::RegistrationSuccessPage;
use store::PathsContext;
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 日志宏：wasm 下走浏览器控制台，原生测试下走标准输出
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(&format!($($arg)*)));
        #[cfg(not(target_arch = "wasm32"))]
        println!($($arg)*);
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(&format!($($arg)*)));
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!($($arg)*);
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(&format!($($arg)*)));
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!($($arg)*);
    }};
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
/// 受保护路由的准入已由 RouterService 把关，这里只负责实例化页面。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::RegisterSuccess => view! { <RegistrationSuccessPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::CreatePath => view! { <CreatePathPage /> }.into_any(),
        AppRoute::PathDetail(id) => view! { <PathDetailPage id=id /> }.into_any(),
        AppRoute::CreateSection(path_id) => {
            view! { <CreateSectionPage path_id=path_id /> }.into_any()
        }
        AppRoute::CreateTask(path_id, section_id) => {
            view! { <CreateTaskPage path_id=path_id section_id=section_id /> }.into_any()
        }
        // RouterService 已把未知路径替换回首页，这里兜底
        AppRoute::NotFound => view! { <HomePage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. API 客户端（含会话令牌槽），全局唯一
    let api = AppApi::new();
    let session = api.session();
    provide_context(api);

    // 2. 认证上下文与共享路径缓存
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    let paths_ctx = PathsContext::new();
    provide_context(paths_ctx);

    // 3. 从 LocalStorage 恢复会话，并接好会话过期回调
    init_auth(auth_ctx, session);

    // 4. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 5. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
