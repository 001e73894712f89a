//! 仪表盘
//!
//! 总览统计优先采用服务端随列表返回的聚合字段，没有就用当前
//! 列表本地计算。路径缓存为空时挂载后拉一次列表；组件卸载后
//! 丢弃迟到的结果。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos::task::spawn_local;
use pathprogress_shared::{DashboardAnalytics, progress};

use crate::api::use_api;
use crate::components::app_header::{AppFooter, AppHeader};
use crate::components::status::{self, StatusNote};
use crate::seed::RECENT_ACTIVITY;
use crate::store::use_paths;
use crate::web::router::{Link, use_router};

/// 学习卡片的封面图，按条目序号轮换
const PATH_VISUALS: &[&str] = &[
    "https://i.imgur.com/ylrC5bN.png",
    "https://images.unsplash.com/photo-1558494949-ef010cbdcc31?auto=format&fit=crop&w=800&q=60",
    "https://i.imgur.com/R1t8jCF.png",
    "https://images.unsplash.com/photo-1517430816045-df4b7de11d1d?auto=format&fit=crop&w=800&q=60",
    "https://images.unsplash.com/photo-1487058792275-0ad4aaf24ca7?auto=format&fit=crop&w=800&q=60",
    "https://i.imgur.com/uP7uYgx.png",
];

const STAT_ICONS: &[&str] = &["▣", "⋯", "⌘", "⌂"];

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = crate::auth::use_auth();
    let paths = use_paths();
    let router = use_router();
    let api = StoredValue::new(use_api());

    let (loading, set_loading) = signal(false);
    let analytics = RwSignal::new(Option::<DashboardAnalytics>::None);
    // 跨页提示（删除确认等）作为成功文案展示一次
    let status = RwSignal::new(router.take_notice().map(|text| (text, false)));

    // 缓存为空才拉取；卸载后迟到的响应直接丢弃
    if paths.paths.get_untracked().is_empty() {
        let cancelled = Arc::new(AtomicBool::new(false));
        on_cleanup({
            let cancelled = Arc::clone(&cancelled);
            move || cancelled.store(true, Ordering::Relaxed)
        });
        set_loading.set(true);
        spawn_local(async move {
            let result = api.get_value().fetch_paths().await;
            if cancelled.load(Ordering::Relaxed) {
                return;
            }
            match result {
                Ok(collection) => {
                    paths.set_all(collection.paths);
                    analytics.set(collection.analytics);
                }
                Err(err) => status.set(status::error(err)),
            }
            set_loading.set(false);
        });
    }

    // 服务端统计字段缺席的位置用本地计算补齐
    let stats = Signal::derive(move || {
        let computed = paths.paths.with(|list| progress::overview_stats(list));
        let served = analytics.get().unwrap_or_default();
        vec![
            (
                "Total Paths",
                served.total_paths.unwrap_or_else(|| computed.total.to_string()),
                "+1 new this month",
            ),
            (
                "Paths in Progress",
                served
                    .paths_in_progress
                    .unwrap_or_else(|| computed.in_progress.to_string()),
                "Currently active",
            ),
            (
                "Completed Paths",
                served
                    .completed_paths
                    .unwrap_or_else(|| computed.completed.to_string()),
                "Great work!",
            ),
            (
                "Average Progress",
                served
                    .average_progress
                    .unwrap_or_else(|| format!("{}%", computed.average_percent)),
                "Across all paths",
            ),
        ]
    });

    let welcome = move || {
        auth.user
            .get()
            .map(|user| format!("Welcome back, {}!", user.username))
            .unwrap_or_else(|| "Welcome back!".to_string())
    };

    view! {
        <div class="dashboard-shell">
            <AppHeader chip_label="Homepage" />

            <main class="dashboard-body">
                <StatusNote status=status />

                <section class="welcome-card">
                    <div>
                        <h1>{welcome}</h1>
                        <p class="welcome-copy">
                            "Continue your learning journey and track your progress across all \
                             your personalized paths."
                        </p>
                        <Link to="/paths/create" class="primary-button large">"Create New Path"</Link>
                    </div>
                </section>

                <section class="stats-section">
                    <h2>"Overview Statistics"</h2>
                    <div class="stats-row">
                        {move || {
                            stats
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(index, (label, value, note))| {
                                    view! {
                                        <article class="stat-card exact">
                                            <div class="stat-card-top">
                                                <p class="stat-label">{label}</p>
                                                <span class="stat-icon">
                                                    {STAT_ICONS.get(index).copied().unwrap_or("•")}
                                                </span>
                                            </div>
                                            <p class="stat-value prominent">{value}</p>
                                            <p class="stat-note subtle">{note}</p>
                                        </article>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </section>

                <section class="paths-and-activity">
                    <div class="path-column">
                        <div class="section-heading stacked">
                            <h2>"Your Learning Paths"</h2>
                            <div class="filter-block">
                                <label>"Filter:"</label>
                                <button class="ghost-button pill">"All ▾"</button>
                            </div>
                        </div>
                        <div class="search-input">
                            <span>"🔍"</span>
                            <input placeholder="Search paths..." />
                        </div>
                        <Show when=move || paths.paths.with(Vec::is_empty) && !loading.get()>
                            <div class="empty-state">
                                <p>"You have no learning paths created. Please create one."</p>
                                <Link to="/paths/create" class="primary-button">"Create Path"</Link>
                            </div>
                        </Show>
                        <div class="path-grid">
                            {move || {
                                paths
                                    .paths
                                    .get()
                                    .into_iter()
                                    .enumerate()
                                    .map(|(index, path)| {
                                        let pct = progress::percent(
                                            progress::status_progress(path.status()),
                                        );
                                        let visual = PATH_VISUALS[index % PATH_VISUALS.len()];
                                        let detail_url = path
                                            .id
                                            .as_ref()
                                            .map(|id| format!("/paths/{}", id.canonical()))
                                            .unwrap_or_else(|| "/dashboard".to_string());
                                        view! {
                                            <article class="learning-card">
                                                <div
                                                    class="learning-image"
                                                    style=format!("background-image: url({})", visual)
                                                ></div>
                                                <div class="learning-copy">
                                                    <h3>{path.base.title.clone()}</h3>
                                                    <p>{path.base.description.clone().unwrap_or_default()}</p>
                                                    <div class="path-progress pill">
                                                        <div
                                                            class="path-progress-fill"
                                                            style:width=format!("{}%", pct)
                                                        ></div>
                                                        <span>{format!("{}%", pct)}</span>
                                                    </div>
                                                </div>
                                                <Link to=detail_url class="ghost-button full-width">
                                                    "View Details"
                                                </Link>
                                            </article>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </div>

                    <aside class="activity-column">
                        <div class="section-heading">
                            <h2>"Recent Activity"</h2>
                        </div>
                        <div class="activity-list card">
                            {RECENT_ACTIVITY
                                .iter()
                                .map(|item| {
                                    view! {
                                        <article class="activity-line">
                                            <div class="activity-text">
                                                <p>{item.description}</p>
                                                <span>{item.time_ago}</span>
                                            </div>
                                        </article>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </aside>
                </section>
            </main>

            <AppFooter />
        </div>
    }
}
