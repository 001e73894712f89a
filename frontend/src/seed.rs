//! 演示种子数据
//!
//! 后端不可达时的替补内容：三条学习路径、最近动态、演示账号。
//! 这里只放静态定义和只读的构造函数；持久化读写在 `demo` 模块。

use pathprogress_shared::{
    Identifier, PathStatus, SectionPayload, SectionResponse, TaskPayload, TaskResponse, TaskStatus,
};

// =========================================================
// 种子结构
// =========================================================

pub struct SeedTask {
    pub id: &'static str,
    pub title: &'static str,
    /// 友好状态文案（"Done" / "In Progress" / "To Do"）
    pub status: &'static str,
    pub day: u32,
    pub estimated_hours: f64,
}

pub struct SeedSection {
    pub id: &'static str,
    pub title: &'static str,
    pub target_days: i64,
    pub planned_hours: i64,
    pub tasks: &'static [SeedTask],
}

pub struct SeedPath {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// 总体完成度（0.0 - 1.0），演示路径的状态由它推导
    pub progress: f64,
    pub sections: &'static [SeedSection],
}

pub struct SeedActivity {
    pub id: &'static str,
    pub description: &'static str,
    pub time_ago: &'static str,
}

/// 演示账号：后端离线时这些账号可以本地登录
pub struct DemoAccount {
    pub label: &'static str,
    pub username: &'static str,
    pub password: &'static str,
    pub token: &'static str,
}

// =========================================================
// 种子内容
// =========================================================

pub const SEED_PATHS: &[SeedPath] = &[
    SeedPath {
        id: "path-1",
        title: "Mastering React Hooks",
        description: "Deep dive into useState, useEffect, useContext, and custom hooks to build robust experiences.",
        progress: 0.75,
        sections: &[
            SeedSection {
                id: "sec-1",
                title: "React Fundamentals",
                target_days: 4,
                planned_hours: 8,
                tasks: &[
                    SeedTask { id: "t1", title: "Setup development environment", status: "Done", day: 1, estimated_hours: 1.0 },
                    SeedTask { id: "t2", title: "Understand JSX", status: "Done", day: 2, estimated_hours: 2.0 },
                    SeedTask { id: "t3", title: "Component basics", status: "In Progress", day: 3, estimated_hours: 2.0 },
                    SeedTask { id: "t4", title: "Handling events", status: "To Do", day: 4, estimated_hours: 1.5 },
                ],
            },
            SeedSection {
                id: "sec-2",
                title: "Hooks & State",
                target_days: 6,
                planned_hours: 12,
                tasks: &[
                    SeedTask { id: "t5", title: "useState Hook", status: "Done", day: 5, estimated_hours: 1.0 },
                    SeedTask { id: "t6", title: "useEffect Hook", status: "In Progress", day: 6, estimated_hours: 2.0 },
                    SeedTask { id: "t7", title: "Context API", status: "To Do", day: 7, estimated_hours: 2.0 },
                    SeedTask { id: "t8", title: "Advanced patterns", status: "To Do", day: 8, estimated_hours: 3.0 },
                ],
            },
        ],
    },
    SeedPath {
        id: "path-2",
        title: "Cybersecurity Fundamentals",
        description: "Understand key cybersecurity concepts, threat modeling, and defense strategies.",
        progress: 0.2,
        sections: &[
            SeedSection {
                id: "sec-3",
                title: "Security Foundations",
                target_days: 5,
                planned_hours: 10,
                tasks: &[
                    SeedTask { id: "t9", title: "Understanding threats", status: "In Progress", day: 3, estimated_hours: 2.5 },
                    SeedTask { id: "t10", title: "Encryption basics", status: "To Do", day: 4, estimated_hours: 2.0 },
                ],
            },
        ],
    },
    SeedPath {
        id: "path-3",
        title: "Data Science with Python",
        description: "Learn Python for analytics, machine learning algorithms, and storytelling with data.",
        progress: 0.9,
        sections: &[
            SeedSection {
                id: "sec-4",
                title: "Data Preparation",
                target_days: 7,
                planned_hours: 14,
                tasks: &[
                    SeedTask { id: "t11", title: "Clean datasets", status: "Done", day: 2, estimated_hours: 3.0 },
                    SeedTask { id: "t12", title: "Feature engineering", status: "Done", day: 3, estimated_hours: 2.5 },
                ],
            },
        ],
    },
];

pub const RECENT_ACTIVITY: &[SeedActivity] = &[
    SeedActivity {
        id: "act-1",
        description: "Started 'Introduction to Cloud Computing with AWS'",
        time_ago: "2 hours ago",
    },
    SeedActivity {
        id: "act-2",
        description: "Completed 'Understanding Closures' task in React Hooks",
        time_ago: "1 day ago",
    },
    SeedActivity {
        id: "act-3",
        description: "Updated progress on 'Data Science with Python' to 90%",
        time_ago: "2 days ago",
    },
    SeedActivity {
        id: "act-4",
        description: "Added new section 'Advanced Styling' to Next.js path",
        time_ago: "3 days ago",
    },
];

pub const DEMO_ACCOUNTS: &[DemoAccount] = &[
    DemoAccount {
        label: "Learner",
        username: "demo",
        password: "demo123",
        token: "demo-token-learner",
    },
    DemoAccount {
        label: "Mentor",
        username: "mentor",
        password: "mentor123",
        token: "demo-token-mentor",
    },
    DemoAccount {
        label: "Explorer",
        username: "guest",
        password: "guest123",
        token: "demo-token-guest",
    },
];

/// 按用户名 + 密码查找演示账号
pub fn find_demo_account(username: &str, password: &str) -> Option<&'static DemoAccount> {
    DEMO_ACCOUNTS
        .iter()
        .find(|account| account.username == username && account.password == password)
}

// =========================================================
// 只读替补构造
// =========================================================

/// 为详情页构造替补小节集合
///
/// 服务端没有给出任何小节时使用；按 id 找不到种子路径就退回
/// 第一条。产出只读展示，不会被持久化。
pub fn fallback_sections(target_id: &str) -> Vec<SectionResponse> {
    let seed = SEED_PATHS
        .iter()
        .find(|path| path.id == target_id)
        .or_else(|| SEED_PATHS.first());

    let Some(seed) = seed else {
        return Vec::new();
    };

    seed.sections
        .iter()
        .map(|section| SectionResponse {
            id: Identifier::from(section.id),
            status: Some(PathStatus::InProgress),
            tasks: Some(
                section
                    .tasks
                    .iter()
                    .map(|task| {
                        let status = TaskStatus::from_label(task.status).unwrap_or_default();
                        TaskResponse {
                            id: Identifier::from(task.id),
                            base: TaskPayload {
                                title: task.title.to_string(),
                                description: None,
                                r#type: Some(status),
                                status: Some(status),
                                estimated_minutes: Some((task.estimated_hours * 60.0).round() as i64),
                            },
                        }
                    })
                    .collect(),
            ),
            base: SectionPayload {
                title: section.title.to_string(),
                description: Some(String::new()),
                order_index: Some(section.planned_hours),
                estimated_days: Some(section.target_days),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_demo_account_requires_both_fields() {
        assert!(find_demo_account("demo", "demo123").is_some());
        assert!(find_demo_account("demo", "wrong").is_none());
        assert!(find_demo_account("nobody", "demo123").is_none());
    }

    #[test]
    fn test_demo_tokens_are_distinct() {
        let mut tokens: Vec<&str> = DEMO_ACCOUNTS.iter().map(|a| a.token).collect();
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), DEMO_ACCOUNTS.len());
    }

    #[test]
    fn test_fallback_sections_match_requested_seed() {
        let sections = fallback_sections("path-2");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].id, Identifier::from("sec-3"));
        assert_eq!(sections[0].base.estimated_days, Some(5));
        assert_eq!(sections[0].base.order_index, Some(10));

        let tasks = sections[0].tasks.as_ref().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].status(), TaskStatus::InProgress);
        // 2.5 小时 -> 150 分钟
        assert_eq!(tasks[0].base.estimated_minutes, Some(150));
    }

    #[test]
    fn test_fallback_sections_default_to_first_seed() {
        let sections = fallback_sections("no-such-path");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].id, Identifier::from("sec-1"));
        assert_eq!(sections[1].id, Identifier::from("sec-2"));
    }
}
