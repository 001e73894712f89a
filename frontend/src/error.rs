//! 面向用户的错误类型
//!
//! 传输层的 `HttpError` 在这里归入领域错误 `ApiError`，
//! `Display` 的输出直接作为页面上的状态文案展示。

use crate::web::http::HttpError;

/// API 层错误
#[derive(Debug)]
pub enum ApiError {
    /// 连接层失败（网络不通、超时等），这一类允许降级到演示数据
    Network(String),
    /// 服务端返回非 2xx
    Server { status: u16, message: Option<String> },
    /// 401，会话已失效
    Unauthorized,
    /// 客户端前置条件不满足，请求根本没有发出
    Precondition(String),
    /// 响应体不符合任何已知形状
    Decode(String),
}

impl ApiError {
    /// 是否属于可以降级到演示数据的连接层失败
    ///
    /// 4xx/5xx 明确不算：服务端在线并给出了答复，降级反而会掩盖问题。
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    pub fn server(status: u16, message: Option<String>) -> Self {
        ApiError::Server { status, message }
    }
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Network(_) => f.write_str("Unable to reach the server right now."),
            ApiError::Server { status, message } => match message {
                Some(msg) => f.write_str(msg),
                None => write!(f, "Request failed with status {}.", status),
            },
            ApiError::Unauthorized => f.write_str("Session expired. Please log in again."),
            ApiError::Precondition(msg) => f.write_str(msg),
            ApiError::Decode(_) => f.write_str("Unexpected response from the server."),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        ApiError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages_are_user_facing() {
        assert_eq!(
            ApiError::Network("tcp refused".to_string()).to_string(),
            "Unable to reach the server right now."
        );
        assert_eq!(
            ApiError::server(500, None).to_string(),
            "Request failed with status 500."
        );
        assert_eq!(
            ApiError::server(409, Some("Path already exists".to_string())).to_string(),
            "Path already exists"
        );
        assert_eq!(
            ApiError::Unauthorized.to_string(),
            "Session expired. Please log in again."
        );
        assert_eq!(
            ApiError::Precondition("Missing fields.".to_string()).to_string(),
            "Missing fields."
        );
        assert_eq!(
            ApiError::Decode("expected array".to_string()).to_string(),
            "Unexpected response from the server."
        );
    }

    #[test]
    fn test_only_network_counts_as_connectivity() {
        assert!(ApiError::Network("x".to_string()).is_connectivity());
        assert!(!ApiError::server(500, None).is_connectivity());
        assert!(!ApiError::server(404, None).is_connectivity());
        assert!(!ApiError::Unauthorized.is_connectivity());
        assert!(!ApiError::Decode("x".to_string()).is_connectivity());
        assert!(!ApiError::Precondition("x".to_string()).is_connectivity());
    }

    #[test]
    fn test_transport_errors_map_to_network() {
        let timeout: ApiError = HttpError::Timeout.into();
        assert!(timeout.is_connectivity());
        let refused: ApiError = HttpError::NetworkError("refused".to_string()).into();
        assert!(refused.is_connectivity());
        let build: ApiError = HttpError::RequestBuildFailed("bad".to_string()).into();
        assert!(build.is_connectivity());
    }
}
