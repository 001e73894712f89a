//! 登录页
//!
//! 进入即强制登出并清空路径缓存，保证干净的起点；登出原因或
//! 跨页提示在表单上方展示一次。登录成功后先拉一次路径列表：
//! 列表为空就带提示跳去创建页，否则进仪表盘。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::status::{self, StatusNote};
use crate::seed::DEMO_ACCOUNTS;
use crate::store::use_paths;
use crate::web::router::{Link, use_router};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let paths = use_paths();
    let router = use_router();
    let api = StoredValue::new(use_api());

    // 先取走遗留提示（会话过期原因等），再重置会话与缓存
    let leftover = auth
        .message
        .get_untracked()
        .or_else(|| router.take_notice());
    auth.force_logout();
    paths.clear();

    let (identifier, set_identifier) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (remember, set_remember) = signal(false);
    let (loading, set_loading) = signal(false);
    let status = RwSignal::new(leftover.map(|text| (text, true)));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_loading.set(true);
        status.set(None);

        spawn_local(async move {
            let name = identifier.get_untracked().trim().to_string();
            let result = api.get_value().login(&name, &password.get_untracked()).await;
            match result {
                Ok(token) => {
                    auth.login(token, &name);
                    match api.get_value().fetch_paths().await {
                        Ok(collection) => {
                            let empty = collection.paths.is_empty();
                            paths.set_all(collection.paths);
                            let _ = status.try_set(status::success("Logged in successfully."));
                            if empty {
                                router.navigate_with_notice(
                                    "/paths/create",
                                    "You have no learning paths created. Please create one.",
                                );
                            } else {
                                router.navigate("/dashboard");
                            }
                        }
                        Err(err) => {
                            let _ = status.try_set(status::error(err));
                        }
                    }
                }
                Err(err) => {
                    let _ = status.try_set(status::error(err));
                }
            }
            let _ = set_loading.try_set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-shell">
                <div class="auth-shell-head">
                    <Link to="/" class="back-link">"← Back to Home"</Link>
                </div>
                <h1>"Login"</h1>
                <p>"Enter your credentials to access your learning paths."</p>
                <form on:submit=on_submit>
                    <label>"Email or Username"</label>
                    <input
                        type="text"
                        placeholder="user@example.com"
                        on:input=move |ev| set_identifier.set(event_target_value(&ev))
                        prop:value=identifier
                        required
                    />
                    <div class="field-row">
                        <label>"Password"</label>
                        <span class="inline-link">"Forgot password?"</span>
                    </div>
                    <input
                        type="password"
                        placeholder="••••••••"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                        required
                    />
                    <label class="checkbox-field">
                        <input
                            type="checkbox"
                            on:change=move |ev| set_remember.set(event_target_checked(&ev))
                            prop:checked=remember
                        />
                        <span>"Remember me"</span>
                    </label>
                    <StatusNote status=status />
                    <button type="submit" class="primary-button full-width" disabled=move || loading.get()>
                        "Login"
                    </button>
                </form>
                <p class="auth-footnote">
                    "Don't have an account? "
                    <Link to="/register" class="inline-link">"Register"</Link>
                </p>
                <section class="demo-accounts">
                    <div class="demo-accounts-headline">
                        <h2>"Demo Accounts"</h2>
                        <p>"Use any of these if the backend is offline."</p>
                    </div>
                    <div class="demo-accounts-grid">
                        {DEMO_ACCOUNTS
                            .iter()
                            .map(|account| {
                                view! {
                                    <article class="demo-account-card">
                                        <p class="demo-account-label">{account.label}</p>
                                        <p class="demo-account-username">{account.username}</p>
                                        <p class="demo-account-password">
                                            "Password: " <span>{account.password}</span>
                                        </p>
                                    </article>
                                }
                            })
                            .collect_view()}
                    </div>
                </section>
            </div>
        </div>
    }
}
