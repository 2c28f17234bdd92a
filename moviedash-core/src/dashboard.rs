use std::time::{Duration, Instant};

use crate::card::Card;
use crate::controller::{FETCH_FAILED, FetchOutcome, Route};
use crate::status::{DEFAULT_STATUS_TTL, StatusLine};

pub const UPDATING: &str = "Updating...";

/// 仪表盘的界面状态：卡片列表、空列表提示、状态栏、选中项
#[derive(Debug, Clone)]
pub struct Dashboard {
    cards: Vec<Card>,
    empty_visible: bool,
    list_visible: bool,
    /// 最近一次拉取失败，且还没有成功加载过卡片
    load_failed: bool,
    selected: usize,
    status: StatusLine,
    status_ttl: Duration,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_TTL)
    }
}

impl Dashboard {
    pub fn new(status_ttl: Duration) -> Self {
        Self {
            cards: Vec::new(),
            empty_visible: false,
            list_visible: true,
            load_failed: false,
            selected: 0,
            status: StatusLine::new(),
            status_ttl,
        }
    }

    /// 应用一次拉取结果。返回 `Some(route)` 表示需要跳转。
    pub fn apply(&mut self, outcome: FetchOutcome, now: Instant) -> Option<Route> {
        match outcome {
            FetchOutcome::Unauthorized => Some(Route::Login),
            FetchOutcome::Failed(_) => {
                self.load_failed = true;
                self.status
                    .show_transient(FETCH_FAILED, now, self.status_ttl);
                None
            }
            FetchOutcome::Loaded(cards) => {
                let count = cards.len();
                self.load_failed = false;
                self.cards.clear();
                self.selected = 0;
                if cards.is_empty() {
                    self.empty_visible = true;
                    self.list_visible = false;
                } else {
                    self.empty_visible = false;
                    self.list_visible = true;
                    self.cards = cards;
                }
                self.status
                    .show_transient(format!("Loaded top {count}"), now, self.status_ttl);
                None
            }
        }
    }

    /// 手动刷新开始：常驻提示，等拉取结果替换
    pub fn begin_refresh(&mut self) {
        self.status.show_persistent(UPDATING);
    }

    pub fn show_status(&mut self, msg: impl Into<String>, now: Instant) {
        self.status.show_transient(msg, now, self.status_ttl);
    }

    /// 到期隐藏状态栏，返回是否需要重绘
    pub fn tick(&mut self, now: Instant) -> bool {
        self.status.expire(now)
    }

    pub fn status_text(&self, now: Instant) -> Option<&str> {
        self.status.visible_text(now)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_empty_visible(&self) -> bool {
        self.empty_visible
    }

    pub fn is_list_visible(&self) -> bool {
        self.list_visible
    }

    /// 拉取失败且没有可显示的内容，界面应显示失败提示而不是加载中
    pub fn is_failed(&self) -> bool {
        self.load_failed && self.cards.is_empty() && !self.empty_visible
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.cards.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.cards.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.cards.len().saturating_sub(1);
    }
}
