//! 应用顶栏与页脚
//!
//! 登录后的页面共用：品牌区 + 当前页标签 + 用户缩写徽标 + 登出。
//! 登出会清空路径缓存并留下一条原因，跳转由路由服务的认证监听完成。

use leptos::prelude::*;
use pathprogress_shared::date;

use crate::auth::use_auth;
use crate::store::use_paths;
use crate::web::router::Link;

#[component]
pub fn AppHeader(#[prop(into)] chip_label: String) -> impl IntoView {
    let auth = use_auth();
    let paths = use_paths();

    // 用户名前两个字母，没有用户时退回占位缩写
    let initials = move || {
        auth.user
            .get()
            .map(|user| user.username.chars().take(2).collect::<String>().to_uppercase())
            .filter(|chip| !chip.is_empty())
            .unwrap_or_else(|| "JD".to_string())
    };

    let on_logout = move |_| {
        paths.clear();
        auth.logout(Some("You have been logged out."));
    };

    view! {
        <header class="app-bar">
            <div class="brand-block">
                <Link to="/dashboard" class="brand-link">"Path Progress"</Link>
                <span class="brand-chip-muted">{chip_label}</span>
            </div>
            <div class="bar-actions">
                <div class="user-chip">{initials}</div>
                <button class="ghost-button logout-button" on:click=on_logout>
                    "Logout"
                </button>
            </div>
        </header>
    }
}

#[component]
pub fn AppFooter() -> impl IntoView {
    view! {
        <footer class="dashboard-footer">
            {format!("© {} Path Progress. All rights reserved.", date::current_year())}
        </footer>
    }
}
