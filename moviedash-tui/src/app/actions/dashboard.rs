use std::time::Instant;

use moviedash_core::{FetchOutcome, card};

use crate::config::paths;
use crate::ui::log_view::LogLevel;

use super::super::{App, AppMessage};

impl App {
    // — 榜单 —

    pub(crate) fn start_fetch(&mut self) {
        let page = self.page;
        let tx = self.msg_tx.clone();
        let controller = self.controller.clone();

        tokio::spawn(async move {
            let outcome = controller.fetch_movies().await;
            let _ = tx.send(AppMessage::MoviesFetched { page, outcome });
        });
    }

    /// 手动刷新：常驻 "Updating..."，触发后端更新后无论成败都重新拉取
    pub(crate) fn refresh(&mut self) {
        self.dashboard.begin_refresh();

        let page = self.page;
        let tx = self.msg_tx.clone();
        let controller = self.controller.clone();

        tokio::spawn(async move {
            let outcome = controller.refresh().await;
            let _ = tx.send(AppMessage::MoviesFetched { page, outcome });
        });
    }

    /// 每隔 `refresh_interval` 重新拉取一次，首次拉取已在鉴权通过后完成
    pub(crate) fn start_refresh_timer(&mut self) {
        if let Some(timer) = self.refresh_timer.take() {
            timer.abort();
        }

        let page = self.page;
        let tx = self.msg_tx.clone();
        let period = self.settings.refresh_interval();
        let first = tokio::time::Instant::now() + period;

        self.refresh_timer = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(first, period);
            loop {
                interval.tick().await;
                if tx.send(AppMessage::AutoRefresh { page }).is_err() {
                    break;
                }
            }
        }));
    }

    pub(crate) fn on_movies_fetched(&mut self, outcome: FetchOutcome) {
        if let FetchOutcome::Failed(err) = &outcome {
            self.logs.push(LogLevel::Error, format!("Failed to load movies: {err}"));
        }
        if let Some(route) = self.dashboard.apply(outcome, Instant::now()) {
            self.navigate(route);
        }
    }

    // — 卡片操作 —

    /// 用系统默认程序打开选中卡片的链接
    pub(crate) fn open_selected(&mut self) {
        let Some(card) = self.dashboard.selected_card() else {
            return;
        };
        if !card.has_link() {
            return;
        }
        let link = card.link.clone();
        if let Err(e) = open::that(&link) {
            self.logs.push(LogLevel::Warn, format!("Cannot open {link}: {e}"));
        }
    }

    /// 把当前卡片导出为静态 HTML 页面
    pub(crate) fn export_html(&mut self) {
        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let result = card::render_document(self.dashboard.cards(), &generated_at).and_then(|doc| {
            let path = paths::export_file()?;
            std::fs::write(&path, doc)?;
            Ok(path)
        });

        let now = Instant::now();
        match result {
            Ok(path) => {
                self.logs.push(LogLevel::Info, format!("Exported to {}", path.display()));
                self.dashboard
                    .show_status(format!("Exported to {}", path.display()), now);
            }
            Err(e) => {
                self.logs.push(LogLevel::Error, format!("Export failed: {e}"));
                self.dashboard.show_status("Export failed", now);
            }
        }
    }
}
