//! 新建路径页
//!
//! 两个日期都是必填，缺一个就在本地拦下。创建成功后并入共享
//! 缓存：有服务端 id 就进详情页，没有（演示降级）就回仪表盘。

use leptos::prelude::*;
use leptos::task::spawn_local;
use pathprogress_shared::PathPayload;

use crate::api::use_api;
use crate::components::app_header::{AppFooter, AppHeader};
use crate::components::status::{self, StatusNote};
use crate::store::use_paths;
use crate::web::router::{Link, use_router};

#[component]
pub fn CreatePathPage() -> impl IntoView {
    let paths = use_paths();
    let router = use_router();
    let api = StoredValue::new(use_api());

    // 登录页在列表为空时带过来的引导文案
    let notice = router.take_notice();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (difficulty, set_difficulty) = signal("Beginner".to_string());
    let (start_date, set_start_date) = signal(String::new());
    let (target_date, set_target_date) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let status = RwSignal::new(Option::<(String, bool)>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if start_date.get_untracked().is_empty() || target_date.get_untracked().is_empty() {
            status.set(status::error("Please provide both start and target dates."));
            return;
        }
        set_loading.set(true);
        status.set(None);

        spawn_local(async move {
            let payload = PathPayload {
                title: title.get_untracked().trim().to_string(),
                description: Some(description.get_untracked().trim().to_string()),
                start_date: Some(start_date.get_untracked()),
                target_end_date: Some(target_date.get_untracked()),
            };
            match api.get_value().create_path(&payload).await {
                Ok(created) => {
                    match &created.id {
                        Some(id) => {
                            let target = format!("/paths/{}", id.canonical());
                            paths.upsert(&created);
                            let _ = status.try_set(status::success("Path created successfully!"));
                            router.navigate(&target);
                        }
                        None => {
                            // 服务端没回 id 时仍然留在缓存里，只是没有详情可进
                            paths.paths.update(|list| list.push(created));
                            let _ = status.try_set(status::success("Path created successfully!"));
                            router.navigate("/dashboard");
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
        <div class="dashboard-shell">
            <AppHeader chip_label="Create Path" />

            <main class="dashboard-body">
                <section class="create-path-card">
                    {notice.map(|text| view! { <div class="notice-banner">{text}</div> })}
                    <div class="create-header">
                        <h1>"Create New Path"</h1>
                        <p>"Define the core details of your learning or project path."</p>
                    </div>
                    <form id="create-path-form" class="create-form" on:submit=on_submit>
                        <label>
                            "Path Name " <span class="required">"*"</span>
                            <input
                                placeholder="e.g., Learn React Basics"
                                on:input=move |ev| set_title.set(event_target_value(&ev))
                                prop:value=title
                                required
                            />
                        </label>
                        <label>
                            "Short Description"
                            <input
                                placeholder="A concise summary of what this path covers."
                                on:input=move |ev| set_description.set(event_target_value(&ev))
                                prop:value=description
                            />
                        </label>
                        <div class="field-row">
                            <label>
                                "Difficulty Level " <span class="optional">"(Optional)"</span>
                                <select
                                    on:change=move |ev| set_difficulty.set(event_target_value(&ev))
                                    prop:value=difficulty
                                >
                                    <option value="Beginner">"Beginner"</option>
                                    <option value="Intermediate">"Intermediate"</option>
                                    <option value="Advanced">"Advanced"</option>
                                </select>
                            </label>
                            <label>
                                "Start Date"
                                <input
                                    type="date"
                                    on:input=move |ev| set_start_date.set(event_target_value(&ev))
                                    prop:value=start_date
                                />
                            </label>
                            <label>
                                "Target Date"
                                <input
                                    type="date"
                                    on:input=move |ev| set_target_date.set(event_target_value(&ev))
                                    prop:value=target_date
                                />
                            </label>
                        </div>
                        <StatusNote status=status />
                    </form>

                    <div class="create-actions">
                        <Link to="/dashboard" class="ghost-button">"Cancel"</Link>
                        <button
                            class="primary-button large"
                            type="submit"
                            form="create-path-form"
                            disabled=move || loading.get()
                        >
                            {move || if loading.get() { "Creating..." } else { "Create Path" }}
                        </button>
                    </div>
                </section>
            </main>

            <AppFooter />
        </div>
    }
}
