use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use moviedash_core::session::{SessionStore, normalize};

use super::paths;

/// `auth.json` 的内容
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AuthData {
    #[serde(rename = "authToken", default)]
    pub auth_token: Option<String>,
}

/// 落盘的会话存储：`auth.json` 中保存 `{"authToken": "..."}`。
///
/// 内存里保留一份副本，写盘失败只记日志，不影响当前进程内的状态。
pub struct FileSessionStore {
    path: PathBuf,
    token: RwLock<Option<String>>,
}

impl FileSessionStore {
    pub fn open(path: PathBuf) -> Self {
        let token = load(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "unreadable session file, ignoring");
            None
        });
        Self {
            path,
            token: RwLock::new(token),
        }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::open(paths::auth_file()?))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<String> {
        self.token.read().map(|g| g.clone()).unwrap_or_default()
    }

    fn set(&self, token: Option<&str>) {
        let token = normalize(token);
        let result = match &token {
            Some(t) => save(&self.path, t),
            None => clear(&self.path),
        };
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist session");
        }
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }
}

fn load(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let data: AuthData = serde_json::from_str(&content)?;
    Ok(normalize(data.auth_token.as_deref()))
}

fn save(path: &Path, token: &str) -> Result<()> {
    let data = AuthData {
        auth_token: Some(token.to_string()),
    };
    let content = serde_json::to_string_pretty(&data)?;
    std::fs::write(path, content)?;

    // 设置文件权限为 600
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

fn clear(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}
