//! 注册页
//!
//! 两次密码不一致在本地拦下，不发请求。注册成功后带着用户名
//! 跳到成功页，由成功页渲染个性化欢迎语。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::status::{self, StatusNote};
use crate::web::router::{Link, use_router};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let router = use_router();
    let api = StoredValue::new(use_api());

    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let status = RwSignal::new(Option::<(String, bool)>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if password.get_untracked() != confirm.get_untracked() {
            status.set(status::error("Passwords do not match."));
            return;
        }
        set_loading.set(true);
        status.set(None);

        spawn_local(async move {
            let name = username.get_untracked().trim().to_string();
            let result = api.get_value().register(&name, &password.get_untracked()).await;
            match result {
                Ok(_) => {
                    router.navigate_with_notice("/register/success", &name);
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
                <div class="brand-chip">"Path Progress"</div>
                <h1>"Create Your Account"</h1>
                <p>"Start your journey with PathProgress."</p>
                <form on:submit=on_submit>
                    <label>"Username"</label>
                    <input
                        placeholder="Enter your username"
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                        prop:value=username
                        required
                    />
                    <label>"Email"</label>
                    <input
                        type="email"
                        placeholder="your@email.com"
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        prop:value=email
                        required
                    />
                    <label>"Password"</label>
                    <input
                        type="password"
                        placeholder="••••••••"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                        required
                    />
                    <label>"Confirm Password"</label>
                    <input
                        type="password"
                        placeholder="••••••••"
                        on:input=move |ev| set_confirm.set(event_target_value(&ev))
                        prop:value=confirm
                        required
                    />
                    <StatusNote status=status />
                    <button type="submit" class="primary-button full-width" disabled=move || loading.get()>
                        "Create Account"
                    </button>
                </form>
                <p class="auth-footnote">
                    "Already have an account? "
                    <Link to="/login" class="inline-link">"Login"</Link>
                </p>
            </div>
        </div>
    }
}
