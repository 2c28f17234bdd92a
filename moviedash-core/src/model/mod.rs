pub mod auth;
pub mod movie;

use serde::Deserialize;

/// 后端错误响应体，只关心 message 字段
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// 解析失败时按空对象处理
    pub fn parse_lenient(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}
