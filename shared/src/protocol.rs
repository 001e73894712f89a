//! 线上协议的请求 / 响应形状
//!
//! 同一端点在不同后端版本间返回过不同的形状。这里对每种形状做
//! 宽容解析，再归一化成前端内部使用的单一形式；无法识别的形状
//! 一律视为解析错误，不做静默吞掉。

use crate::{DashboardAnalytics, PathResponse};
use serde::{Deserialize, Serialize};

// =========================================================
// 认证 (Auth)
// =========================================================

/// 登录请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 结构化登录响应（较新的后端）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredLogin {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

/// 扁平登录响应（早期后端只回一个 token 字段）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatLogin {
    pub token: String,
}

/// 两种登录响应形状的联合，结构化形状字段更多，先试它
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoginResponse {
    Structured(StructuredLogin),
    Flat(FlatLogin),
}

impl LoginResponse {
    pub fn into_token(self) -> String {
        match self {
            LoginResponse::Structured(body) => body.access_token,
            LoginResponse::Flat(body) => body.token,
        }
    }
}

/// 注册请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

pub const DEFAULT_REGISTER_MESSAGE: &str = "Successfully registered. Please log in.";

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RegisterBody {
    Detailed {
        message: Option<String>,
        response: Option<String>,
    },
    Text(String),
}

/// 把注册响应体归一化成一句给用户看的话
///
/// 后端可能返回纯文本、JSON 字符串、`{"message": …}` 或
/// `{"response": …}`；都没有时使用默认文案。
pub fn register_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return DEFAULT_REGISTER_MESSAGE.to_string();
    }
    match serde_json::from_str::<RegisterBody>(trimmed) {
        Ok(RegisterBody::Detailed { message, response }) => message
            .or(response)
            .unwrap_or_else(|| DEFAULT_REGISTER_MESSAGE.to_string()),
        Ok(RegisterBody::Text(text)) => text,
        Err(_) => trimmed.to_string(),
    }
}

// =========================================================
// 路径集合 (Paths Collection)
// =========================================================

/// 仪表盘形状：`learningPaths` 必须在场，统计字段平铺在同一层
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub learning_paths: Vec<PathResponse>,
    #[serde(flatten)]
    pub analytics: DashboardAnalytics,
}

/// 集合端点的两种线上形状
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathCollectionResponse {
    Dashboard(DashboardResponse),
    Bare(Vec<PathResponse>),
}

/// 归一化后的集合
#[derive(Debug, Clone, PartialEq)]
pub struct PathCollection {
    pub paths: Vec<PathResponse>,
    pub analytics: Option<DashboardAnalytics>,
}

impl PathCollectionResponse {
    pub fn normalize(self) -> PathCollection {
        match self {
            PathCollectionResponse::Dashboard(body) => PathCollection {
                paths: body.learning_paths,
                analytics: Some(body.analytics),
            },
            PathCollectionResponse::Bare(paths) => PathCollection {
                paths,
                analytics: None,
            },
        }
    }
}
