use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use moviedash_core::Route;

use super::{App, AppMessage};

impl App {
    pub(crate) fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::TermEvent(ev) => {
                self.handle_event(ev);
            }
            AppMessage::Tick => {
                self.dashboard.tick(Instant::now());
            }
            AppMessage::LoginResult { page, result } => {
                if self.is_current(page) {
                    self.on_login_result(result);
                }
            }
            AppMessage::AuthChecked { page, ok } => {
                if self.is_current(page) {
                    self.on_auth_checked(ok);
                }
            }
            AppMessage::MoviesFetched { page, outcome } => {
                if self.is_current(page) {
                    self.on_movies_fetched(outcome);
                }
            }
            AppMessage::AutoRefresh { page } => {
                if self.is_current(page) {
                    tracing::debug!("auto refresh");
                    self.start_fetch();
                }
            }
            AppMessage::LoggedOut { page } => {
                if self.is_current(page) {
                    self.navigate(Route::Login);
                }
            }
        }
    }

    pub(crate) fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        // 帮助浮层打开时，只响应滚动和关闭
        if self.show_help {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc => {
                    self.show_help = false;
                    self.help_scroll = 0;
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    self.help_scroll = self.help_scroll.saturating_add(1);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.help_scroll = self.help_scroll.saturating_sub(1);
                }
                _ => {}
            }
            return;
        }

        // 日志浮层打开时，只响应滚动和关闭
        if self.show_logs {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('!') | KeyCode::Esc => {
                    self.show_logs = false;
                }
                KeyCode::Char('j') | KeyCode::Down => self.logs.scroll_down(),
                KeyCode::Char('k') | KeyCode::Up => self.logs.scroll_up(),
                _ => {}
            }
            return;
        }

        match self.route {
            Route::Dashboard => self.handle_dashboard_key(key),
            Route::Login => self.handle_login_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            // 全局
            (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                self.running = false;
            }
            (_, KeyCode::Char('?')) => {
                self.show_help = true;
            }
            (_, KeyCode::Char('!')) => {
                self.show_logs = true;
                self.logs.mark_read();
            }
            // 鉴权完成前不响应仪表盘操作
            _ if self.checking_auth => {}
            (_, KeyCode::Char('r')) => self.refresh(),
            (_, KeyCode::Char('L')) => self.logout(),
            (_, KeyCode::Char('j') | KeyCode::Down) => self.dashboard.select_next(),
            (_, KeyCode::Char('k') | KeyCode::Up) => self.dashboard.select_prev(),
            (_, KeyCode::Char('g') | KeyCode::Home) => self.dashboard.select_first(),
            (_, KeyCode::Char('G') | KeyCode::End) => self.dashboard.select_last(),
            (_, KeyCode::Char('o') | KeyCode::Enter) => self.open_selected(),
            (_, KeyCode::Char('e')) => self.export_html(),
            _ => {}
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        if let (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) =
            (key.modifiers, key.code)
        {
            self.running = false;
            return;
        }
        if self.login.submitting {
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.toggle_field();
            }
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => self.login.delete_before_cursor(),
            KeyCode::Left => self.login.move_cursor_left(),
            KeyCode::Right => self.login.move_cursor_right(),
            KeyCode::Char(c) => self.login.insert_char(c),
            _ => {}
        }
    }
}
