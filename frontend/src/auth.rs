//! 认证模块
//!
//! 管理登录态，与路由系统解耦。令牌和用户信息落在浏览器本地存储里,
//! 启动时恢复，变化时同步；请求层收到 401 时通过回调把这里登出,
//! 并留下一条提示等登录页展示。

use std::sync::Arc;

use leptos::prelude::*;
use pathprogress_shared::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY};
use serde::{Deserialize, Serialize};

use crate::api::ApiSession;
use crate::log_info;
use crate::web::storage::{KeyValueStore, LocalStorage};

/// 会话里展示用的用户信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub username: String,
}

// ===== 会话持久化 =====

/// 令牌与用户信息的存取，泛型于键值存储以便测试
#[derive(Debug, Clone, Copy)]
pub struct SessionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 恢复存储里的会话，用户信息损坏时按未登录处理
    pub fn load(&self) -> (Option<String>, Option<AuthUser>) {
        let token = self.store.get(STORAGE_TOKEN_KEY);
        let user = self
            .store
            .get(STORAGE_USER_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok());
        (token, user)
    }

    pub fn save_token(&self, token: &str) {
        self.store.set(STORAGE_TOKEN_KEY, token);
    }

    pub fn clear_token(&self) {
        self.store.delete(STORAGE_TOKEN_KEY);
    }

    pub fn save_user(&self, user: &AuthUser) {
        if let Ok(json) = serde_json::to_string(user) {
            self.store.set(STORAGE_USER_KEY, &json);
        }
    }

    pub fn clear_user(&self) {
        self.store.delete(STORAGE_USER_KEY);
    }
}

// ===== 登录态上下文 =====

/// 认证上下文
///
/// 通过 Context 在组件间共享。`message` 只存活在内存里,
/// 用来在登录页解释"为什么回到了这里"。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub token: RwSignal<Option<String>>,
    pub user: RwSignal<Option<AuthUser>>,
    pub message: RwSignal<Option<String>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self {
            token: RwSignal::new(None),
            user: RwSignal::new(None),
            message: RwSignal::new(None),
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let token = self.token;
        Signal::derive(move || token.get().is_some())
    }

    /// 登录成功后写入会话并清掉遗留提示
    pub fn login(&self, token: String, username: &str) {
        self.token.set(Some(token));
        self.user.set(Some(AuthUser {
            username: username.to_string(),
        }));
        self.message.set(None);
    }

    /// 登出，可附带一条要在登录页展示的原因
    ///
    /// 导航由路由服务的认证状态监听自动处理。
    pub fn logout(&self, reason: Option<&str>) {
        self.token.set(None);
        self.user.set(None);
        self.message.set(reason.map(str::to_string));
    }

    /// 静默登出，不留提示
    pub fn force_logout(&self) {
        self.logout(None);
    }

    pub fn clear_message(&self) {
        self.message.set(None);
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

// ===== 启动装配 =====

/// 恢复会话并接好三条同步链路:
/// 令牌 -> 请求头与存储，用户 -> 存储，401 -> 登出并留言。
pub fn init_auth(auth: AuthContext, session: Arc<ApiSession>) {
    let store = SessionStore::new(LocalStorage);

    let (token, user) = store.load();
    if let Some(user) = &user {
        log_info!("[Auth] Restored session for '{}'.", user.username);
    }
    session.set_token(token.clone());
    auth.token.set(token);
    auth.user.set(user);

    let token_session = Arc::clone(&session);
    Effect::new(move |_| {
        let token = auth.token.get();
        token_session.set_token(token.clone());
        match &token {
            Some(token) => store.save_token(token),
            None => store.clear_token(),
        }
    });

    Effect::new(move |_| match auth.user.get() {
        Some(user) => store.save_user(&user),
        None => store.clear_user(),
    });

    session.set_unauthorized_handler(move || {
        auth.logout(Some("Session expired. Please log in again."));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::storage::MemoryStore;

    #[test]
    fn test_session_store_round_trip() {
        let store = SessionStore::new(MemoryStore::default());

        store.save_token("token-123");
        store.save_user(&AuthUser {
            username: "demo".to_string(),
        });
        let (token, user) = store.load();

        assert_eq!(token.as_deref(), Some("token-123"));
        assert_eq!(user.map(|user| user.username), Some("demo".to_string()));
    }

    #[test]
    fn test_session_store_clear() {
        let store = SessionStore::new(MemoryStore::default());

        store.save_token("token-123");
        store.save_user(&AuthUser {
            username: "demo".to_string(),
        });
        store.clear_token();
        store.clear_user();

        assert_eq!(store.load(), (None, None));
    }

    #[test]
    fn test_corrupt_user_record_reads_as_logged_out() {
        let backing = MemoryStore::default();
        backing.set(STORAGE_TOKEN_KEY, "token-123");
        backing.set(STORAGE_USER_KEY, "{not valid json");

        let (token, user) = SessionStore::new(backing).load();

        assert_eq!(token.as_deref(), Some("token-123"));
        assert_eq!(user, None);
    }
}
