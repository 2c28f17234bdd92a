use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use moviedash_core::client::DEFAULT_BASE_URL;

use super::paths;

/// 覆盖 `server.base_url` 的环境变量
pub const BASE_URL_ENV: &str = "MOVIEDASH_BASE_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// 自动刷新间隔（秒）
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    /// 短暂状态提示的显示时长（毫秒）
    #[serde(default = "default_status_ttl")]
    pub status_ttl_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_refresh_interval() -> u64 {
    5 * 60
}
fn default_status_ttl() -> u64 {
    3500
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            status_ttl_ms: default_status_ttl(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_from(&paths::config_file()?)?;
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            settings.apply_base_url_override(&url);
        }
        Ok(settings)
    }

    /// 文件不存在时写入默认配置
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            let settings = Self::default();
            settings.save_to(path)?;
            Ok(settings)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_base_url_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.server.base_url = url.to_string();
        }
    }

    pub fn base_url(&self) -> &str {
        &self.server.base_url
    }

    /// 至少 1 秒，避免 0 导致 interval panic
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.dashboard.refresh_interval_secs.max(1))
    }

    pub fn status_ttl(&self) -> Duration {
        Duration::from_millis(self.dashboard.status_ttl_ms)
    }
}
