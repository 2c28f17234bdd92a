use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use moviedash_core::{Card, Dashboard};

use super::theme::Theme;
use super::util::{padded_rect, sanitize, truncate_with_dots};

/// 每张卡片占用的行数（三行内容 + 一行间隔）
const CARD_HEIGHT: u16 = 4;

/// 渲染仪表盘主体：鉴权中 / 空列表 / 卡片列表
pub fn render(frame: &mut Frame, area: Rect, dash: &Dashboard, checking: bool) {
    let area = padded_rect(area, 2);

    if checking {
        render_placeholder(frame, area, "Checking session...", true);
        return;
    }
    if dash.is_empty_visible() {
        render_placeholder(frame, area, "No movies to show. Press r to update.", false);
        return;
    }
    if dash.is_failed() {
        render_placeholder(frame, area, "Failed to load movies. Press r to retry.", false);
        return;
    }
    if !dash.is_list_visible() || dash.cards().is_empty() {
        render_placeholder(frame, area, "Loading...", true);
        return;
    }

    // 保证选中项在可见范围内
    let visible = (area.height / CARD_HEIGHT).max(1) as usize;
    let offset = dash.selected().saturating_sub(visible - 1);

    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (i, card) in dash.cards().iter().enumerate().skip(offset).take(visible) {
        lines.extend(card_lines(card, i == dash.selected(), width));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_placeholder(frame: &mut Frame, area: Rect, text: &str, is_loading: bool) {
    let style = if is_loading {
        Theme::active()
    } else {
        Theme::secondary()
    };
    frame.render_widget(Paragraph::new(Span::styled(format!("  {text}"), style)), area);
}

/// 一张卡片：排名 + 标题 / 评分与年份 / 演员
fn card_lines(card: &Card, selected: bool, width: usize) -> Vec<Line<'static>> {
    let marker = if selected { "> " } else { "  " };
    let rank = format!(" {} ", card.rank);
    let title_width = width.saturating_sub(marker.width() + rank.width() + 1);
    let title = truncate_with_dots(&sanitize(&card.title), title_width);

    let mut title_style = Theme::title();
    if selected {
        title_style = title_style.add_modifier(Modifier::UNDERLINED);
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled(marker, Theme::active()),
            Span::styled(rank, Theme::rank_badge()),
            Span::raw(" "),
            Span::styled(title, title_style),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(sanitize(&card.details()), Theme::rating()),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                truncate_with_dots(&sanitize(&card.cast), width.saturating_sub(2)),
                Theme::secondary(),
            ),
        ]),
        Line::from(""),
    ];

    if selected {
        for line in lines.iter_mut().take(3) {
            line.style = Theme::selected_row();
        }
    }
    lines
}
