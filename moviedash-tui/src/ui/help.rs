use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme::Theme;

const HELP_PANEL_WIDTH: u16 = 46;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Dashboard",
        &[
            ("r", "Update & reload"),
            ("j / k", "Move down / up"),
            ("g / G", "First / last"),
            ("o / Enter", "Open link in browser"),
            ("e", "Export as HTML"),
            ("L", "Log out"),
        ],
    ),
    (
        "Global",
        &[
            ("q / Ctrl+C", "Quit"),
            ("?", "Help"),
            ("!", "Logs"),
        ],
    ),
];

/// 渲染悬浮帮助面板（居中覆盖）
pub fn render(frame: &mut Frame, area: Rect, scroll: u16) {
    // 面板外高度 = 2 (borders) + content_lines + 1 (hint)
    let panel_h = count_lines(SECTIONS) as u16 + 3;

    let (content_area, hint_area) =
        super::util::overlay_panel(frame, area, "Help", HELP_PANEL_WIDTH, panel_h);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    for (section_name, bindings) in SECTIONS {
        lines.push(Line::from(Span::styled(
            format!("  {section_name}"),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        for (key, desc) in bindings.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<14}"), Theme::active()),
                Span::raw(*desc),
            ]));
        }

        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), content_area);

    // 固定提示（不受滚动影响）
    frame.render_widget(
        Paragraph::new(Span::styled("     Esc/? close", Theme::secondary())),
        hint_area,
    );
}

fn count_lines(sections: &[(&str, &[(&str, &str)])]) -> usize {
    let mut n = 1; // top padding
    for (_, bindings) in sections {
        n += 1; // section title
        n += bindings.len();
        n += 1; // gap
    }
    n
}
