use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 左右各留 `h_pad` 列边距
pub fn padded_rect(area: Rect, h_pad: u16) -> Rect {
    let pad = h_pad.min(area.width / 2);
    Rect {
        x: area.x + pad,
        width: area.width.saturating_sub(pad * 2),
        ..area
    }
}

/// 渲染居中浮层面板骨架（清除背景 + 边框 + 标题），
/// 返回 `(content_area, hint_area)`：content 可滚动，hint 钉在底部不受滚动影响。
pub fn overlay_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    max_w: u16,
    max_h: u16,
) -> (Rect, Rect) {
    let panel_w = max_w.min(area.width.saturating_sub(4));
    let panel_h = max_h.min(area.height.saturating_sub(4));

    let x = area.x + (area.width.saturating_sub(panel_w)) / 2;
    let y = area.y + (area.height.saturating_sub(panel_h)) / 2;
    let panel_area = Rect::new(x, y, panel_w, panel_h);

    frame.render_widget(Clear, panel_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(panel_area);
    frame.render_widget(block, panel_area);

    // 底部 1 行留给固定提示，其余给可滚动内容
    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    (chunks[0], chunks[1])
}

/// 去掉控制字符（含 ESC），避免接口数据里的转义序列直接写进终端
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\t' || c == '\n' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect()
}

/// 按显示宽度截断文本，超长时末尾加 ".."
pub fn truncate_with_dots(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let dots_width = 2; // ".." 占 2 列
    let content_width = max_width.saturating_sub(dots_width);
    let mut result = String::new();
    let mut width = 0;
    for c in text.chars() {
        let cw = c.width().unwrap_or(0);
        if width + cw > content_width {
            break;
        }
        result.push(c);
        width += cw;
    }
    result.push_str("..");
    result
}
