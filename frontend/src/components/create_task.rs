//! 新建任务页
//!
//! 状态下拉用展示文案，提交前映射成 API 枚举并同步镜像的
//! `type` 字段；预计小时换算成分钟。成功后把任务并入共享缓存
//! 并回到详情页。

use leptos::prelude::*;
use leptos::task::spawn_local;
use pathprogress_shared::{Identifier, TaskPayload, TaskStatus};

use crate::api::use_api;
use crate::components::app_header::{AppFooter, AppHeader};
use crate::components::status::{self, StatusNote};
use crate::store::{PathPatch, use_paths};
use crate::web::router::{Link, use_router};

#[component]
pub fn CreateTaskPage(path_id: String, section_id: String) -> impl IntoView {
    let paths = use_paths();
    let router = use_router();
    let api = StoredValue::new(use_api());
    let path_id = StoredValue::new(Identifier::from(path_id));
    let section_id = StoredValue::new(Identifier::from(section_id));
    let back_url = format!("/paths/{}", path_id.get_value().canonical());

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (status_label, set_status_label) = signal("To Do".to_string());
    let (day, set_day) = signal(String::new());
    let (hours, set_hours) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let status = RwSignal::new(Option::<(String, bool)>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_loading.set(true);
        status.set(None);

        spawn_local(async move {
            let task_status =
                TaskStatus::from_label(&status_label.get_untracked()).unwrap_or_default();
            let estimated_minutes = hours
                .get_untracked()
                .trim()
                .parse::<f64>()
                .ok()
                .map(|value| (value * 60.0).round() as i64);
            let payload = TaskPayload {
                title: title.get_untracked().trim().to_string(),
                description: Some(description.get_untracked().trim().to_string())
                    .filter(|text| !text.is_empty()),
                r#type: Some(task_status),
                status: Some(task_status),
                estimated_minutes,
            };
            let result = api
                .get_value()
                .create_task(&path_id.get_value(), &section_id.get_value(), &payload)
                .await;
            match result {
                Ok(created) => {
                    paths.patch(
                        &path_id.get_value(),
                        &PathPatch::Task {
                            section_id: section_id.get_value(),
                            task: created,
                        },
                    );
                    router.navigate(&format!("/paths/{}", path_id.get_value().canonical()));
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
            <AppHeader chip_label="Create Task" />

            <main class="dashboard-body">
                <section class="create-path-card">
                    <div class="create-header">
                        <h1>"Create Task"</h1>
                        <p>"Add a new task to this section."</p>
                    </div>
                    <form id="create-task-form" class="create-form" on:submit=on_submit>
                        <label>
                            "Task Title " <span class="required">"*"</span>
                            <input
                                placeholder="e.g., Setup development environment"
                                on:input=move |ev| set_title.set(event_target_value(&ev))
                                prop:value=title
                                required
                            />
                        </label>
                        <label>
                            "Description"
                            <input
                                placeholder="What should happen in this task?"
                                on:input=move |ev| set_description.set(event_target_value(&ev))
                                prop:value=description
                            />
                        </label>
                        <div class="field-row">
                            <label>
                                "Day #"
                                <input
                                    type="number"
                                    placeholder="e.g., 2"
                                    on:input=move |ev| set_day.set(event_target_value(&ev))
                                    prop:value=day
                                />
                            </label>
                            <label>
                                "Estimated Hours"
                                <input
                                    type="number"
                                    placeholder="e.g., 1.5"
                                    on:input=move |ev| set_hours.set(event_target_value(&ev))
                                    prop:value=hours
                                />
                            </label>
                        </div>
                        <label>
                            "Status"
                            <select
                                on:change=move |ev| set_status_label.set(event_target_value(&ev))
                                prop:value=status_label
                            >
                                <option>"To Do"</option>
                                <option>"In Progress"</option>
                                <option>"Done"</option>
                            </select>
                        </label>
                        <StatusNote status=status />
                    </form>
                    <div class="create-actions">
                        <Link to=back_url class="ghost-button">"Cancel"</Link>
                        <button
                            class="primary-button large"
                            type="submit"
                            form="create-task-form"
                            disabled=move || loading.get()
                        >
                            {move || if loading.get() { "Saving..." } else { "Create Task" }}
                        </button>
                    </div>
                </section>
            </main>

            <AppFooter />
        </div>
    }
}
