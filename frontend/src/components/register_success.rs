//! 注册成功页
//!
//! 从路由的一次性提示槽里取注册用户名；直接刷新进入时没有
//! 用户名，退回通用欢迎语。

use leptos::prelude::*;

use crate::web::router::{Link, use_router};

#[component]
pub fn RegistrationSuccessPage() -> impl IntoView {
    let username = use_router().take_notice();

    let welcome = match &username {
        Some(name) => format!(
            "Welcome, {}! Your account is now active. Please proceed to login to \
             personalize your profile and start exploring.",
            name
        ),
        None => "Thank you for joining our community! Your account is now active. Please \
                 proceed to login to personalize your profile and start exploring."
            .to_string(),
    };

    view! {
        <div class="success-page">
            <div class="success-card">
                <CelebrationArt />
                <h1>"Registration Successful!"</h1>
                <p>{welcome}</p>

                <section class="success-info">
                    <span class="status-pill">"⏳"</span>
                    <p>"Your account setup is almost complete! Some features may take a moment to activate."</p>
                </section>

                <div class="success-actions">
                    <Link to="/login" class="primary-button large link-reset">"Go to Login"</Link>
                    <Link to="/" class="inline-link">"Explore Homepage"</Link>
                </div>
            </div>
        </div>
    }
}

#[component]
fn CelebrationArt() -> impl IntoView {
    view! {
        <svg class="celebration-art" viewBox="0 0 260 180" xmlns="http://www.w3.org/2000/svg" role="img">
            <rect width="260" height="180" rx="24" fill="#FFF6EC" />
            <path
                d="M65 120C55 95 65 60 90 45C115 30 145 35 165 52C185 69 190 95 175 110C160 125 135 130 110 130C85 130 70 145 65 120Z"
                fill="#FDB5A2"
            />
            <circle cx="188" cy="125" r="32" fill="#F78B38" />
            <circle cx="85" cy="125" r="22" fill="#FCD4BF" />
            <path d="M120 65C132 60 150 62 164 75" stroke="#fff" stroke-width="6" stroke-linecap="round" fill="none" />
            <g fill="#F78B38">
                <circle cx="40" cy="45" r="4" />
                <circle cx="210" cy="45" r="4" />
                <circle cx="230" cy="75" r="3" />
                <circle cx="30" cy="80" r="3" />
            </g>
        </svg>
    }
}
