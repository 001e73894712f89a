//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供本地存储实现，并通过 `KeyValueStore`
//! trait 抽象出接口，测试里替换成内存实现。
//! 存储不可用（隐私模式等）时所有操作安静降级，不会抛出。

/// 键值存储特性 (Trait)
pub trait KeyValueStore {
    /// 读取字符串值，键不存在或存储不可用时返回 None
    fn get(&self, key: &str) -> Option<String>;

    /// 写入值，返回是否成功
    fn set(&self, key: &str, value: &str) -> bool;

    /// 删除键值对，返回是否成功
    fn delete(&self, key: &str) -> bool;
}

/// 浏览器 LocalStorage 实现
#[derive(Debug, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

// =========================================================
// 测试工具: 内存存储 / 不可用存储
// =========================================================

/// 内存键值存储，克隆后共享同一份数据
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key).is_some()
    }
}

/// 模拟浏览器禁用存储的场景
#[cfg(test)]
#[derive(Clone, Copy, Default)]
pub struct UnavailableStore;

#[cfg(test)]
impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> bool {
        false
    }

    fn delete(&self, _key: &str) -> bool {
        false
    }
}
