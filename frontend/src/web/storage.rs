//! 键值存储模块
//!
//! [`KeyValueStore`] 抽象出 get/set/delete 三个操作：
//! 浏览器中使用 `web_sys::Storage`（LocalStorage），
//! 测试或 LocalStorage 不可用（如隐私模式）时使用内存实现。

use std::collections::HashMap;
use std::sync::Mutex;

/// 键值持久化能力
pub trait KeyValueStore: Send + Sync {
    /// 获取存储的字符串值，键不存在或出错时返回 `None`
    fn get(&self, key: &str) -> Option<String>;

    /// 设置存储值，返回是否成功
    fn set(&self, key: &str, value: &str) -> bool;

    /// 删除存储的键值对，返回是否成功
    fn delete(&self, key: &str) -> bool;
}

/// 浏览器 LocalStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 当前环境是否可以使用 LocalStorage
    pub fn is_available() -> bool {
        Self::storage().is_some()
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

/// 内存存储，生命周期与页面相同
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), value.to_string());
                true
            }
            Err(_) => false,
        }
    }

    fn delete(&self, key: &str) -> bool {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.remove(key);
                true
            }
            Err(_) => false,
        }
    }
}
