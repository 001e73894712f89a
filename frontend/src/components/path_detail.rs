//! 路径详情页
//!
//! 本仓库里最讲究的一块状态同步：进入时先用列表缓存里的副本
//! 立即渲染，同时向服务端要完整详情（列表接口往往不带子级），
//! 拿到后按字符串化 id 并回详情信号和共享缓存两处。之后的每次
//! 改动都是"先服务端、成功了再改本地"：两份缓存要么一起更新，
//! 要么都不动，失败只留一条错误提示。
//!
//! 两边都没有任何小节时，用种子数据顶一套只读小节进来撑页面；
//! 这套替补永远不落缓存。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos::task::spawn_local;
use pathprogress_shared::{
    Identifier, PathPayload, SectionPayload, SectionResponse, TaskPayload, TaskResponse,
    TaskStatus, progress,
};

use crate::api::use_api;
use crate::components::app_header::{AppFooter, AppHeader};
use crate::components::status::{self, StatusNote};
use crate::seed;
use crate::store::{PathPatch, apply_patch, ensure_tasks_loaded, find_path, use_paths};
use crate::web::router::{Link, use_router};

/// 正在进行的写操作，同一时刻最多一个
///
/// 按实体定位，界面上只禁用命中的那一个按钮组。
#[derive(Debug, Clone, PartialEq)]
enum PendingOp {
    DeletePath,
    UpdatePath,
    UpdateSection(Identifier),
    DeleteSection(Identifier),
    UpdateTask(Identifier, Identifier),
    DeleteTask(Identifier, Identifier),
}

#[component]
pub fn PathDetailPage(id: String) -> impl IntoView {
    let paths = use_paths();
    let router = use_router();
    let api = StoredValue::new(use_api());
    let route_id = StoredValue::new(Identifier::from(id));

    // 详情缓存（与共享列表缓存互相独立的那份副本）
    let detail = RwSignal::new(
        find_path(&paths.paths.get_untracked(), &route_id.get_value()).cloned(),
    );
    let (loading, set_loading) = signal(false);
    let status = RwSignal::new(Option::<(String, bool)>::None);
    let pending = RwSignal::new(Option::<PendingOp>::None);

    // 挂载后拉完整详情；卸载后迟到的响应直接丢弃
    let cancelled = Arc::new(AtomicBool::new(false));
    on_cleanup({
        let cancelled = Arc::clone(&cancelled);
        move || cancelled.store(true, Ordering::Relaxed)
    });
    set_loading.set(true);
    spawn_local({
        let cancelled = Arc::clone(&cancelled);
        async move {
            // 直接刷新进入时列表缓存是空的，先补一次列表
            if find_path(&paths.paths.get_untracked(), &route_id.get_value()).is_none() {
                if let Ok(collection) = api.get_value().fetch_paths().await {
                    if cancelled.load(Ordering::Relaxed) {
                        return;
                    }
                    paths.set_all(collection.paths);
                }
            }
            let result = api.get_value().get_path(&route_id.get_value()).await;
            if cancelled.load(Ordering::Relaxed) {
                return;
            }
            match result {
                Ok(mut latest) => {
                    // 个别版本的服务端不回 id，补上路由里的
                    if latest.id.is_none() {
                        latest.id = Some(route_id.get_value());
                    }
                    detail.set(Some(latest.clone()));
                    paths.upsert(&latest);
                }
                Err(err) => status.set(status::error(err)),
            }
            set_loading.set(false);
        }
    });

    // 每次成功的改动都同时写详情缓存和共享缓存
    let apply_both = move |patch: &PathPatch| {
        let _ = detail.try_update(|slot| {
            if let Some(path) = slot {
                *path = apply_patch(path, patch);
            }
        });
        paths.patch(&route_id.get_value(), patch);
    };

    let display_path = Signal::derive(move || {
        detail
            .get()
            .or_else(|| find_path(&paths.paths.get(), &route_id.get_value()).cloned())
    });

    // 两边都没有小节时用种子替补，只读展示
    let resolved_sections = Signal::derive(move || {
        display_path
            .get()
            .and_then(|path| path.sections)
            .filter(|sections| !sections.is_empty())
            .unwrap_or_else(|| seed::fallback_sections(&route_id.get_value().canonical()))
    });

    let path_percent = Signal::derive(move || match display_path.get() {
        Some(path) => {
            progress::percent(progress::path_progress(&path, &resolved_sections.get()))
        }
        None => 0,
    });

    // ===== 路径级操作 =====

    let on_delete_path = move |_| {
        if !confirm("Delete this learning path? This cannot be undone.") {
            return;
        }
        pending.set(Some(PendingOp::DeletePath));
        status.set(None);
        spawn_local(async move {
            match api.get_value().delete_path(&route_id.get_value()).await {
                Ok(()) => {
                    paths.remove(&route_id.get_value());
                    router.navigate_with_notice("/dashboard", "Path deleted successfully.");
                }
                Err(err) => {
                    let _ = status.try_set(status::error(err));
                }
            }
            let _ = pending.try_set(None);
        });
    };

    let on_edit_path = move |_| {
        let Some(current) = display_path.get_untracked() else {
            return;
        };
        let Some(title) = prompt("Update path title", &current.base.title) else {
            return;
        };
        let title = title.trim().to_string();
        if title.is_empty() {
            return;
        }
        let description = prompt(
            "Update path description",
            current.base.description.as_deref().unwrap_or(""),
        );
        let start = prompt(
            "Update start date (YYYY-MM-DD)",
            current.base.start_date.as_deref().unwrap_or(""),
        );
        let target = prompt(
            "Update target date (YYYY-MM-DD)",
            current.base.target_end_date.as_deref().unwrap_or(""),
        );
        let payload = PathPayload {
            title,
            description: non_empty(description),
            start_date: non_empty(start).or_else(|| current.base.start_date.clone()),
            target_end_date: non_empty(target).or_else(|| current.base.target_end_date.clone()),
        };
        pending.set(Some(PendingOp::UpdatePath));
        status.set(None);
        spawn_local(async move {
            match api.get_value().update_path(&route_id.get_value(), &payload).await {
                Ok(updated) => {
                    apply_both(&PathPatch::Fields(updated));
                    let _ = status.try_set(status::success("Path updated."));
                }
                Err(err) => {
                    let _ = status.try_set(status::error(err));
                }
            }
            let _ = pending.try_set(None);
        });
    };

    // ===== 小节级操作 =====

    let on_edit_section = move |section: SectionResponse| {
        let Some(title) = prompt("Update section title", &section.base.title) else {
            return;
        };
        let title = title.trim().to_string();
        if title.is_empty() {
            return;
        }
        let description = prompt(
            "Update section description",
            section.base.description.as_deref().unwrap_or(""),
        );
        let order = prompt(
            "Order index",
            &section
                .base
                .order_index
                .map(|value| value.to_string())
                .unwrap_or_default(),
        );
        let days = prompt(
            "Estimated days",
            &section
                .base
                .estimated_days
                .map(|value| value.to_string())
                .unwrap_or_default(),
        );
        let payload = SectionPayload {
            title,
            description: non_empty(description),
            order_index: parse_number(order).or(section.base.order_index),
            estimated_days: parse_number(days).or(section.base.estimated_days),
        };
        pending.set(Some(PendingOp::UpdateSection(section.id.clone())));
        status.set(None);
        spawn_local(async move {
            let result = api
                .get_value()
                .update_section(&route_id.get_value(), &section.id, &payload)
                .await;
            match result {
                Ok(updated) => {
                    apply_both(&PathPatch::Section(updated));
                    let _ = status.try_set(status::success("Section updated."));
                }
                Err(err) => {
                    let _ = status.try_set(status::error(err));
                }
            }
            let _ = pending.try_set(None);
        });
    };

    let on_delete_section = move |section_id: Identifier| {
        if !confirm("Delete this section? All tasks in it will be removed.") {
            return;
        }
        pending.set(Some(PendingOp::DeleteSection(section_id.clone())));
        status.set(None);
        spawn_local(async move {
            let result = api
                .get_value()
                .delete_section(&route_id.get_value(), &section_id)
                .await;
            match result {
                Ok(()) => {
                    apply_both(&PathPatch::RemoveSection(section_id));
                    let _ = status.try_set(status::success("Section deleted."));
                }
                Err(err) => {
                    let _ = status.try_set(status::error(err));
                }
            }
            let _ = pending.try_set(None);
        });
    };

    // ===== 任务级操作 =====

    let on_edit_task = move |section: SectionResponse, task: TaskResponse| {
        if let Err(err) = ensure_tasks_loaded(&section) {
            status.set(status::error(err));
            return;
        }
        let Some(title) = prompt("Update task title", &task.base.title) else {
            return;
        };
        let title = title.trim().to_string();
        if title.is_empty() {
            return;
        }
        let Some(raw_status) = prompt(
            "Update task status (NOT_STARTED, IN_PROGRESS, COMPLETED, SKIPPED)",
            task.status().as_str(),
        ) else {
            return;
        };
        if raw_status.trim().is_empty() {
            return;
        }
        // 认不出的输入按未开始处理
        let next_status = TaskStatus::from_api(&raw_status).unwrap_or_default();
        let minutes = prompt(
            "Estimated minutes",
            &task
                .base
                .estimated_minutes
                .map(|value| value.to_string())
                .unwrap_or_default(),
        );
        let payload = TaskPayload {
            title,
            description: task.base.description.clone(),
            r#type: Some(next_status),
            status: Some(next_status),
            estimated_minutes: parse_number(minutes).or(task.base.estimated_minutes),
        };
        pending.set(Some(PendingOp::UpdateTask(section.id.clone(), task.id.clone())));
        status.set(None);
        spawn_local(async move {
            let result = api
                .get_value()
                .update_task(&route_id.get_value(), &section.id, &task.id, &payload)
                .await;
            match result {
                Ok(updated) => {
                    apply_both(&PathPatch::Task {
                        section_id: section.id.clone(),
                        task: updated,
                    });
                    let _ = status.try_set(status::success("Task updated."));
                }
                Err(err) => {
                    let _ = status.try_set(status::error(err));
                }
            }
            let _ = pending.try_set(None);
        });
    };

    let on_delete_task = move |section: SectionResponse, task: TaskResponse| {
        if let Err(err) = ensure_tasks_loaded(&section) {
            status.set(status::error(err));
            return;
        }
        if !confirm("Delete this task?") {
            return;
        }
        pending.set(Some(PendingOp::DeleteTask(section.id.clone(), task.id.clone())));
        status.set(None);
        spawn_local(async move {
            let result = api
                .get_value()
                .delete_task(&route_id.get_value(), &section.id, &task.id)
                .await;
            match result {
                Ok(()) => {
                    apply_both(&PathPatch::RemoveTask {
                        section_id: section.id,
                        task_id: task.id,
                    });
                    let _ = status.try_set(status::success("Task deleted."));
                }
                Err(err) => {
                    let _ = status.try_set(status::error(err));
                }
            }
            let _ = pending.try_set(None);
        });
    };

    // "开始 / 完成"按钮：携带现有字段的整条更新，已在目标状态就不发请求
    let on_task_transition = move |section: SectionResponse,
                                   task: TaskResponse,
                                   next_status: TaskStatus| {
        if let Err(err) = ensure_tasks_loaded(&section) {
            status.set(status::error(err));
            return;
        }
        if task.status() == next_status {
            return;
        }
        let payload = TaskPayload {
            title: task.base.title.clone(),
            description: task.base.description.clone(),
            r#type: Some(next_status),
            status: Some(next_status),
            estimated_minutes: task.base.estimated_minutes,
        };
        pending.set(Some(PendingOp::UpdateTask(section.id.clone(), task.id.clone())));
        status.set(None);
        spawn_local(async move {
            let result = api
                .get_value()
                .update_task(&route_id.get_value(), &section.id, &task.id, &payload)
                .await;
            match result {
                Ok(updated) => {
                    apply_both(&PathPatch::Task {
                        section_id: section.id.clone(),
                        task: updated,
                    });
                    let message = if next_status == TaskStatus::Completed {
                        "Task completed."
                    } else {
                        "Task started."
                    };
                    let _ = status.try_set(status::success(message));
                }
                Err(err) => {
                    let _ = status.try_set(status::error(err));
                }
            }
            let _ = pending.try_set(None);
        });
    };

    // ===== 视图 =====

    let hero = move || {
        let Some(path) = display_path.get() else {
            return ().into_any();
        };
        let canonical = route_id.get_value().canonical();
        let updating = move || pending.get() == Some(PendingOp::UpdatePath);
        let deleting = move || pending.get() == Some(PendingOp::DeletePath);
        view! {
            <section class="welcome-card path-hero">
                <div class="path-hero-headline">
                    <div>
                        <h1>{path.base.title.clone()}</h1>
                        <p>{path.base.description.clone().unwrap_or_default()}</p>
                    </div>
                    <div class="hero-actions">
                        <Link
                            to=format!("/paths/{}/sections/create", canonical)
                            class="primary-button soft button-link"
                        >
                            <span>"+"</span> " Add Section"
                        </Link>
                        <button
                            class="outline-button button-link"
                            type="button"
                            on:click=on_edit_path
                            disabled=updating
                        >
                            {move || if updating() { "Saving..." } else { "Edit Path" }}
                        </button>
                        <button class="danger-button pill" on:click=on_delete_path disabled=deleting>
                            {move || if deleting() { "Deleting..." } else { "Delete Path" }}
                        </button>
                    </div>
                </div>
                <div class="progress-bar">
                    <div
                        class="progress-fill"
                        style:width=move || format!("{}%", path_percent.get())
                    ></div>
                </div>
                <div class="progress-footer">
                    <span>" "</span>
                    <span class="progress-label">
                        {move || format!("{}% Complete", path_percent.get())}
                    </span>
                </div>
            </section>
        }
        .into_any()
    };

    let sections_view = move || {
        let canonical = route_id.get_value().canonical();
        resolved_sections
            .get()
            .into_iter()
            .map(|section| {
                let section_pct = progress::percent(progress::section_progress(&section));
                let section_id = section.id.clone();
                let editing_section = {
                    let section_id = section_id.clone();
                    move || pending.get() == Some(PendingOp::UpdateSection(section_id.clone()))
                };
                let deleting_section = {
                    let section_id = section_id.clone();
                    move || pending.get() == Some(PendingOp::DeleteSection(section_id.clone()))
                };
                let section_for_edit = section.clone();
                let section_id_for_delete = section_id.clone();
                let tasks = section.tasks.clone().unwrap_or_default();
                view! {
                    <article class="section-panel">
                        <header class="section-header">
                            <div class="section-title">
                                <h2>{section.base.title.clone()}</h2>
                                <div class="section-progress meter">
                                    <div class="section-progress-track">
                                        <div
                                            class="section-progress-bar"
                                            style:width=format!("{}%", section_pct)
                                        ></div>
                                    </div>
                                    <span>{format!("{}% Complete", section_pct)}</span>
                                </div>
                            </div>
                            <div class="section-actions">
                                <Link
                                    to=format!(
                                        "/paths/{}/sections/{}/tasks/create",
                                        canonical,
                                        section_id.canonical()
                                    )
                                    class="section-action-text button-link"
                                >
                                    <span>"+"</span> " Task"
                                </Link>
                                <button
                                    class="section-icon-button"
                                    on:click=move |_| on_edit_section(section_for_edit.clone())
                                    disabled=editing_section.clone()
                                >
                                    {
                                        let editing_section = editing_section.clone();
                                        move || if editing_section() { "..." } else { "Edit" }
                                    }
                                </button>
                                <button
                                    class="section-icon-button"
                                    on:click=move |_| on_delete_section(section_id_for_delete.clone())
                                    disabled=deleting_section.clone()
                                >
                                    {
                                        let deleting_section = deleting_section.clone();
                                        move || if deleting_section() { "..." } else { "Delete" }
                                    }
                                </button>
                                <button class="section-icon-button">"Reorder"</button>
                                <button class="section-icon-button">"Collapse"</button>
                            </div>
                        </header>

                        <div class="tasks-list">
                            {tasks
                                .into_iter()
                                .map(move |task| task_row(&section, task, pending, on_task_transition, on_edit_task, on_delete_task))
                                .collect_view()}
                        </div>
                    </article>
                }
            })
            .collect_view()
    };

    let body = move || {
        if display_path.get().is_some() {
            view! {
                {hero}
                <section class="sections-stack">{sections_view}</section>
            }
            .into_any()
        } else if loading.get() {
            view! { <p>"Loading..."</p> }.into_any()
        } else {
            view! {
                <p>"Unable to find the requested path."</p>
                <Link to="/dashboard" class="primary-button">"Back to dashboard"</Link>
            }
            .into_any()
        }
    };

    view! {
        <div class="dashboard-shell">
            <AppHeader chip_label="Path Detail" />

            <main class="dashboard-body detail-layout">
                <StatusNote status=status />
                {body}
            </main>

            <AppFooter />
        </div>
    }
}

/// 单行任务：复选框只读展示，状态流转走右侧按钮
fn task_row<FT, FE, FD>(
    section: &SectionResponse,
    task: TaskResponse,
    pending: RwSignal<Option<PendingOp>>,
    on_transition: FT,
    on_edit: FE,
    on_delete: FD,
) -> impl IntoView + use<FT, FE, FD>
where
    FT: Fn(SectionResponse, TaskResponse, TaskStatus) + Copy + 'static,
    FE: Fn(SectionResponse, TaskResponse) + Copy + 'static,
    FD: Fn(SectionResponse, TaskResponse) + Copy + 'static,
{
    let task_status = task.status();
    let friendly = task_status.label();
    let pill_class = format!(
        "status-pill {}",
        friendly.replace(' ', "").to_lowercase()
    );

    let busy_editing = {
        let section_id = section.id.clone();
        let task_id = task.id.clone();
        move || {
            pending.get() == Some(PendingOp::UpdateTask(section_id.clone(), task_id.clone()))
        }
    };
    let busy_deleting = {
        let section_id = section.id.clone();
        let task_id = task.id.clone();
        move || {
            pending.get() == Some(PendingOp::DeleteTask(section_id.clone(), task_id.clone()))
        }
    };

    let start_target = (section.clone(), task.clone());
    let end_target = (section.clone(), task.clone());
    let edit_target = (section.clone(), task.clone());
    let delete_target = (section.clone(), task.clone());

    let start_disabled = {
        let busy_editing = busy_editing.clone();
        move || {
            busy_editing()
                || task_status == TaskStatus::InProgress
                || task_status == TaskStatus::Completed
        }
    };
    let end_disabled = {
        let busy_editing = busy_editing.clone();
        move || busy_editing() || task_status == TaskStatus::Completed
    };

    view! {
        <div class="task-row">
            <div class="task-info">
                <input type="checkbox" prop:checked={task_status == TaskStatus::Completed} disabled=true />
                <div>
                    <p>{task.base.title.clone()}</p>
                    <span class=pill_class>{friendly}</span>
                </div>
            </div>
            <div class="task-controls">
                <button
                    class="task-chip"
                    on:click=move |_| {
                        let (section, task) = start_target.clone();
                        on_transition(section, task, TaskStatus::InProgress);
                    }
                    disabled=start_disabled
                >
                    {
                        let busy_editing = busy_editing.clone();
                        move || if busy_editing() { "..." } else { "Start" }
                    }
                </button>
                <button
                    class="task-chip success"
                    on:click=move |_| {
                        let (section, task) = end_target.clone();
                        on_transition(section, task, TaskStatus::Completed);
                    }
                    disabled=end_disabled
                >
                    {
                        let busy_editing = busy_editing.clone();
                        move || if busy_editing() { "..." } else { "End" }
                    }
                </button>
                <button
                    class="task-icon-button"
                    on:click=move |_| {
                        let (section, task) = edit_target.clone();
                        on_edit(section, task);
                    }
                    disabled=busy_editing.clone()
                >
                    {
                        let busy_editing = busy_editing.clone();
                        move || if busy_editing() { "..." } else { "Edit" }
                    }
                </button>
                <button
                    class="task-icon-button"
                    on:click=move |_| {
                        let (section, task) = delete_target.clone();
                        on_delete(section, task);
                    }
                    disabled=busy_deleting.clone()
                >
                    {
                        let busy_deleting = busy_deleting.clone();
                        move || if busy_deleting() { "..." } else { "Delete" }
                    }
                </button>
            </div>
        </div>
    }
}

// ===== 浏览器对话框 =====

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// 取消对话框返回 None
fn prompt(message: &str, default: &str) -> Option<String> {
    web_sys::window()?
        .prompt_with_message_and_default(message, default)
        .ok()
        .flatten()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn parse_number(value: Option<String>) -> Option<i64> {
    value.and_then(|text| text.trim().parse().ok())
}
