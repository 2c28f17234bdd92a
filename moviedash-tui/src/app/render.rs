use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use moviedash_core::Route;
use moviedash_core::controller::FETCH_FAILED;

use crate::ui::theme::Theme;

use super::App;

impl App {
    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);

        match self.route {
            Route::Login => {
                crate::ui::login::render(frame, chunks[2], &self.login);
            }
            Route::Dashboard => {
                crate::ui::dashboard::render(
                    frame,
                    chunks[2],
                    &self.dashboard,
                    self.checking_auth,
                );
            }
        }

        self.render_footer(frame, chunks[3]);

        if self.show_logs {
            crate::ui::log_view::render(frame, frame.area(), &self.logs);
        }

        if self.show_help {
            crate::ui::help::render(frame, frame.area(), self.help_scroll);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title_span = Span::styled("  MOVIEDASH", Theme::title());
        let page_span = match self.route {
            Route::Login => Span::styled("  sign in", Theme::secondary()),
            Route::Dashboard => Span::styled("  top 10", Theme::secondary()),
        };

        // 右侧：服务器地址 + 未读日志数
        let mut right = vec![Span::styled(
            format!("{} ", self.controller.client().base_url()),
            Theme::secondary(),
        )];
        if self.logs.unread_count > 0 {
            right.push(Span::styled(
                format!(" ! {} ", self.logs.unread_count),
                Style::default().bg(Color::Red).fg(Color::White),
            ));
            right.push(Span::raw(" "));
        }

        let left_w = title_span.content.width() + page_span.content.width();
        let right_w: usize = right.iter().map(|s| s.content.width()).sum();
        let gap = (area.width as usize).saturating_sub(left_w + right_w);

        let mut spans = vec![title_span, page_span, Span::raw(" ".repeat(gap))];
        spans.extend(right);
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// 底部：左侧状态栏文字，右侧按键提示
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hint = match self.route {
            Route::Dashboard => "r update  o open  L logout  ? help  ",
            Route::Login => "Tab switch  Enter sign in  ",
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(hint.width() as u16)])
            .split(area);

        let status = match self.route {
            Route::Dashboard => self.dashboard.status_text(Instant::now()),
            Route::Login => None,
        };
        if let Some(text) = status {
            let style = if text == FETCH_FAILED {
                Theme::error()
            } else {
                Theme::success()
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!("  {text}"), style)),
                cols[0],
            );
        }

        frame.render_widget(
            Paragraph::new(Span::styled(hint, Theme::secondary())).alignment(Alignment::Right),
            cols[1],
        );
    }
}
