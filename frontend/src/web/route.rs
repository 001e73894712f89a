//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、URL 往返和认证属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 宣传首页 (默认路由)
    #[default]
    Home,
    /// 登录页面
    Login,
    /// 注册页面
    Register,
    /// 注册成功页面
    RegisterSuccess,
    /// 控制面板 (需要认证)
    Dashboard,
    /// 新建学习路径 (需要认证)
    CreatePath,
    /// 路径详情 (需要认证)
    PathDetail(String),
    /// 在指定路径下新建小节 (需要认证)
    CreateSection(String),
    /// 在指定小节下新建任务 (需要认证)
    CreateTask(String, String),
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Self::Home;
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        match segments.as_slice() {
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["register", "success"] => Self::RegisterSuccess,
            ["dashboard"] => Self::Dashboard,
            // "create" 是保留字，必须排在参数化的详情路由之前
            ["paths", "create"] => Self::CreatePath,
            ["paths", id] => Self::PathDetail((*id).to_string()),
            ["paths", id, "sections", "create"] => Self::CreateSection((*id).to_string()),
            ["paths", id, "sections", section_id, "tasks", "create"] => {
                Self::CreateTask((*id).to_string(), (*section_id).to_string())
            }
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::RegisterSuccess => "/register/success".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::CreatePath => "/paths/create".to_string(),
            Self::PathDetail(id) => format!("/paths/{}", id),
            Self::CreateSection(id) => format!("/paths/{}/sections/create", id),
            Self::CreateTask(id, section_id) => {
                format!("/paths/{}/sections/{}/tasks/create", id, section_id)
            }
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard
                | Self::CreatePath
                | Self::PathDetail(_)
                | Self::CreateSection(_)
                | Self::CreateTask(_, _)
        )
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_for_every_route() {
        let routes = vec![
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::RegisterSuccess,
            AppRoute::Dashboard,
            AppRoute::CreatePath,
            AppRoute::PathDetail("42".to_string()),
            AppRoute::CreateSection("demo-17".to_string()),
            AppRoute::CreateTask("42".to_string(), "7".to_string()),
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn test_create_wins_over_path_detail() {
        assert_eq!(AppRoute::from_path("/paths/create"), AppRoute::CreatePath);
        assert_eq!(
            AppRoute::from_path("/paths/42"),
            AppRoute::PathDetail("42".to_string())
        );
    }

    #[test]
    fn test_nested_create_routes_capture_ids() {
        assert_eq!(
            AppRoute::from_path("/paths/demo-123/sections/create"),
            AppRoute::CreateSection("demo-123".to_string())
        );
        assert_eq!(
            AppRoute::from_path("/paths/1/sections/2/tasks/create"),
            AppRoute::CreateTask("1".to_string(), "2".to_string())
        );
    }

    #[test]
    fn test_trailing_slashes_are_tolerated() {
        assert_eq!(AppRoute::from_path("/dashboard/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path(""), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        assert_eq!(AppRoute::from_path("/paths"), AppRoute::NotFound);
        assert_eq!(
            AppRoute::from_path("/paths/1/sections/2"),
            AppRoute::NotFound
        );
        assert_eq!(AppRoute::from_path("/definitely/not/here"), AppRoute::NotFound);
    }

    #[test]
    fn test_requires_auth_guards_workspace_routes() {
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(AppRoute::CreatePath.requires_auth());
        assert!(AppRoute::PathDetail("1".to_string()).requires_auth());
        assert!(AppRoute::CreateSection("1".to_string()).requires_auth());
        assert!(AppRoute::CreateTask("1".to_string(), "2".to_string()).requires_auth());

        assert!(!AppRoute::Home.requires_auth());
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::Register.requires_auth());
        assert!(!AppRoute::RegisterSuccess.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
    }
}
