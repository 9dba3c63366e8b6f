//! 凭据存储
//!
//! 在键值存储中以固定键保存唯一一个 Bearer Token。

use std::sync::Arc;

use tracklytics_shared::STORAGE_TOKEN_KEY;

use crate::web::KeyValueStore;

#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// 保存 token，覆盖之前的值（不校验格式）
    pub fn save(&self, token: &str) {
        if !self.backend.set(STORAGE_TOKEN_KEY, token) {
            log_warn!("[Auth] Failed to persist credential");
        }
    }

    /// 读取 token，空字符串视为不存在
    pub fn read(&self) -> Option<String> {
        self.backend
            .get(STORAGE_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    pub fn clear(&self) {
        if !self.backend.delete(STORAGE_TOKEN_KEY) {
            log_warn!("[Auth] Failed to clear credential");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::MemoryStorage;

    #[test]
    fn holds_at_most_one_credential() {
        let backend = Arc::new(MemoryStorage::new());
        let store = CredentialStore::new(backend.clone());
        assert_eq!(store.read(), None);

        store.save("first");
        store.save("second");
        assert_eq!(store.read().as_deref(), Some("second"));
        assert_eq!(backend.get("jwt_token").as_deref(), Some("second"));

        store.clear();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn empty_token_reads_as_absent() {
        let store = CredentialStore::new(Arc::new(MemoryStorage::new()));
        store.save("");
        assert_eq!(store.read(), None);
    }
}
