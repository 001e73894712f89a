//! 新建小节页
//!
//! 在指定路径下创建小节。成功后把返回的小节并入共享缓存里的
//! 宿主路径，再回到详情页。

use leptos::prelude::*;
use leptos::task::spawn_local;
use pathprogress_shared::{Identifier, SectionPayload};

use crate::api::use_api;
use crate::components::app_header::{AppFooter, AppHeader};
use crate::components::status::{self, StatusNote};
use crate::store::{PathPatch, use_paths};
use crate::web::router::{Link, use_router};

#[component]
pub fn CreateSectionPage(path_id: String) -> impl IntoView {
    let paths = use_paths();
    let router = use_router();
    let api = StoredValue::new(use_api());
    let path_id = StoredValue::new(Identifier::from(path_id));
    let back_url = format!("/paths/{}", path_id.get_value().canonical());

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (target_days, set_target_days) = signal(String::new());
    let (planned_hours, set_planned_hours) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let status = RwSignal::new(Option::<(String, bool)>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_loading.set(true);
        status.set(None);

        spawn_local(async move {
            let payload = SectionPayload {
                title: title.get_untracked().trim().to_string(),
                description: Some(description.get_untracked().trim().to_string())
                    .filter(|text| !text.is_empty()),
                order_index: planned_hours.get_untracked().trim().parse().ok(),
                estimated_days: target_days.get_untracked().trim().parse().ok(),
            };
            match api.get_value().create_section(&path_id.get_value(), &payload).await {
                Ok(created) => {
                    paths.patch(&path_id.get_value(), &PathPatch::Section(created));
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
            <AppHeader chip_label="Create Section" />

            <main class="dashboard-body">
                <section class="create-path-card">
                    <div class="create-header">
                        <h1>"Create Section"</h1>
                        <p>"Add a new section to this path."</p>
                    </div>
                    <form id="create-section-form" class="create-form" on:submit=on_submit>
                        <label>
                            "Section Name " <span class="required">"*"</span>
                            <input
                                placeholder="e.g., React Fundamentals"
                                on:input=move |ev| set_title.set(event_target_value(&ev))
                                prop:value=title
                                required
                            />
                        </label>
                        <label>
                            "Description"
                            <input
                                placeholder="What will this section cover?"
                                on:input=move |ev| set_description.set(event_target_value(&ev))
                                prop:value=description
                            />
                        </label>
                        <div class="field-row">
                            <label>
                                "Target Days"
                                <input
                                    type="number"
                                    placeholder="e.g., 4"
                                    on:input=move |ev| set_target_days.set(event_target_value(&ev))
                                    prop:value=target_days
                                />
                            </label>
                            <label>
                                "Planned Hours"
                                <input
                                    type="number"
                                    placeholder="e.g., 8"
                                    on:input=move |ev| set_planned_hours.set(event_target_value(&ev))
                                    prop:value=planned_hours
                                />
                            </label>
                        </div>
                        <StatusNote status=status />
                    </form>
                    <div class="create-actions">
                        <Link to=back_url class="ghost-button">"Cancel"</Link>
                        <button
                            class="primary-button large"
                            type="submit"
                            form="create-section-form"
                            disabled=move || loading.get()
                        >
                            {move || if loading.get() { "Saving..." } else { "Create Section" }}
                        </button>
                    </div>
                </section>
            </main>

            <AppFooter />
        </div>
    }
}
