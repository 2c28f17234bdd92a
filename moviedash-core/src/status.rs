use std::time::{Duration, Instant};

/// 默认的短暂提示显示时长
pub const DEFAULT_STATUS_TTL: Duration = Duration::from_millis(3500);

/// 状态栏文字：短暂提示到期自动隐藏，常驻提示直到被替换
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    text: Option<String>,
    expires_at: Option<Instant>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_transient(&mut self, msg: impl Into<String>, now: Instant, ttl: Duration) {
        self.text = Some(msg.into());
        self.expires_at = Some(now + ttl);
    }

    pub fn show_persistent(&mut self, msg: impl Into<String>) {
        self.text = Some(msg.into());
        self.expires_at = None;
    }

    pub fn hide(&mut self) {
        self.text = None;
        self.expires_at = None;
    }

    /// 到期则隐藏，返回是否发生了变化
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(at) if now >= at => {
                self.hide();
                true
            }
            _ => false,
        }
    }

    pub fn visible_text(&self, now: Instant) -> Option<&str> {
        match self.expires_at {
            Some(at) if now >= at => None,
            _ => self.text.as_deref(),
        }
    }
}
