use std::sync::{Arc, RwLock};

/// 持久化 token 时使用的固定键名
pub const TOKEN_KEY: &str = "authToken";

/// 会话 token 存储。
///
/// 只有 `get` / `set` 两个操作：`set(Some(..))` 持久化，`set(None)` 删除。
/// 没有过期、刷新或加密，token 对客户端是不透明字符串。
/// 空字符串视同缺失。
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: Option<&str>);

    fn clear(&self) {
        self.set(None);
    }

    /// 仅当当前 token 仍是发出请求时的 `sent` 才清除，返回是否清除
    fn clear_if_current(&self, sent: Option<&str>) -> bool {
        if self.get().as_deref() != sent {
            return false;
        }
        self.clear();
        true
    }
}

pub type SharedSession = Arc<dyn SessionStore>;

/// 进程内存储，不落盘
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set(Some(token));
        store
    }

    pub fn shared(self) -> SharedSession {
        Arc::new(self)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        self.token.read().map(|g| g.clone()).unwrap_or_default()
    }

    fn set(&self, token: Option<&str>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = normalize(token);
        }
    }
}

/// 空 token 等同于无 token
pub fn normalize(token: Option<&str>) -> Option<String> {
    token.filter(|t| !t.is_empty()).map(str::to_string)
}
