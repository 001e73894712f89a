use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

pub mod date;
pub mod progress;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 后端 REST API 根地址
pub const API_BASE_URL: &str = "http://localhost:9090/api";

/// 单次 HTTP 请求的超时上限（毫秒）
pub const REQUEST_TIMEOUT_MS: i32 = 5_000;

/// 演示数据路径上模拟的网络延迟（毫秒）
pub const DEMO_LATENCY_MS: i32 = 400;

/// localStorage 键名
pub const STORAGE_TOKEN_KEY: &str = "pp_token";
pub const STORAGE_USER_KEY: &str = "pp_user";
pub const STORAGE_DEMO_KEY: &str = "demo_paths";

pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// 标识符 (Identifier)
// =========================================================

/// 服务端的 id 字段有时是整数，有时是字符串。
///
/// 判等按字符串形式进行：`5` 与 `"5"` 指向同一条记录，
/// 而 `"05"` 与 `5` 不同。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Num(i64),
    Text(String),
}

impl Identifier {
    /// 规范化为字符串形式（路由、存储键等场景使用）
    pub fn canonical(&self) -> String {
        match self {
            Identifier::Num(n) => n.to_string(),
            Identifier::Text(t) => t.clone(),
        }
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Identifier::Num(a), Identifier::Num(b)) => a == b,
            (Identifier::Text(a), Identifier::Text(b)) => a == b,
            (Identifier::Num(n), Identifier::Text(t))
            | (Identifier::Text(t), Identifier::Num(n)) => t == &n.to_string(),
        }
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Num(n) => write!(f, "{}", n),
            Identifier::Text(t) => f.write_str(t),
        }
    }
}

impl From<i64> for Identifier {
    fn from(n: i64) -> Self {
        Identifier::Num(n)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::Text(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier::Text(s)
    }
}

// =========================================================
// 状态枚举 (Status)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PathStatus {
    NotStarted,
    InProgress,
    Completed,
    OnHold,
}

impl Default for PathStatus {
    fn default() -> Self {
        PathStatus::NotStarted
    }
}

impl PathStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathStatus::NotStarted => "NOT_STARTED",
            PathStatus::InProgress => "IN_PROGRESS",
            PathStatus::Completed => "COMPLETED",
            PathStatus::OnHold => "ON_HOLD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
    Skipped,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::NotStarted
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "NOT_STARTED",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Skipped => "SKIPPED",
        }
    }

    /// 界面上展示的友好文案
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Done",
            TaskStatus::Skipped => "Skipped",
        }
    }

    /// 解析 API 形式的状态值（大小写与首尾空白不敏感）
    pub fn from_api(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "NOT_STARTED" => Some(TaskStatus::NotStarted),
            "IN_PROGRESS" => Some(TaskStatus::InProgress),
            "COMPLETED" => Some(TaskStatus::Completed),
            "SKIPPED" => Some(TaskStatus::Skipped),
            _ => None,
        }
    }

    /// 解析界面文案形式的状态值
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim() {
            "To Do" => Some(TaskStatus::NotStarted),
            "In Progress" => Some(TaskStatus::InProgress),
            "Done" => Some(TaskStatus::Completed),
            "Skipped" => Some(TaskStatus::Skipped),
            _ => None,
        }
    }
}

// =========================================================
// 数据传输对象 (DTOs)
// =========================================================

/// 创建 / 更新学习路径时提交的字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_end_date: Option<String>,
}

/// 服务端返回的学习路径
///
/// `id` 在服务端分配之前可能缺席；`sections` 缺席与空列表含义不同，
/// 缺席表示服务端没有随响应展开子级。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Identifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PathStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<SectionResponse>>,
    #[serde(flatten)]
    pub base: PathPayload,
}

impl PathResponse {
    pub fn status(&self) -> PathStatus {
        self.status.unwrap_or_default()
    }
}

/// 创建 / 更新小节时提交的字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub id: Identifier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PathStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<TaskResponse>>,
    #[serde(flatten)]
    pub base: SectionPayload,
}

/// 创建 / 更新任务时提交的字段
///
/// `type` 字段是服务端模型里 status 的镜像，提交时保持同步。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Identifier,
    #[serde(flatten)]
    pub base: TaskPayload,
}

impl TaskResponse {
    pub fn status(&self) -> TaskStatus {
        self.base.status.unwrap_or_default()
    }
}

/// 仪表盘聚合统计，服务端已格式化为展示字符串
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAnalytics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_paths: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths_in_progress: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_paths: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_progress: Option<String>,
}
