use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

pub struct LoginState {
    pub username: String,
    pub password: String,
    pub focused_field: LoginField,
    pub username_cursor: usize,
    pub password_cursor: usize,
    pub error: Option<String>,
    /// 登录请求进行中，忽略输入
    pub submitting: bool,
}

impl LoginState {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            focused_field: LoginField::Username,
            username_cursor: 0,
            password_cursor: 0,
            error: None,
            submitting: false,
        }
    }

    pub fn current_input(&mut self) -> (&mut String, &mut usize) {
        match self.focused_field {
            LoginField::Username => (&mut self.username, &mut self.username_cursor),
            LoginField::Password => (&mut self.password, &mut self.password_cursor),
        }
    }

    pub fn toggle_field(&mut self) {
        self.focused_field = match self.focused_field {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    /// 光标以字符计，插入位置需换算成字节偏移
    pub fn insert_char(&mut self, c: char) {
        let (text, cursor) = self.current_input();
        let at = byte_offset(text, *cursor);
        text.insert(at, c);
        *cursor += 1;
    }

    pub fn delete_before_cursor(&mut self) {
        let (text, cursor) = self.current_input();
        if *cursor > 0 {
            *cursor -= 1;
            let at = byte_offset(text, *cursor);
            text.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        let (_, cursor) = self.current_input();
        *cursor = cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let (text, cursor) = self.current_input();
        if *cursor < text.chars().count() {
            *cursor += 1;
        }
    }

    /// 提交前清掉上一次的错误
    pub fn begin_submit(&mut self) {
        self.error = None;
        self.submitting = true;
    }

    pub fn fail(&mut self, message: String) {
        self.submitting = false;
        self.error = Some(message);
    }
}

impl Default for LoginState {
    fn default() -> Self {
        Self::new()
    }
}

fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(i, _)| i)
}

/// 渲染登录表单（居中显示在主内容区）
pub fn render(frame: &mut Frame, area: Rect, state: &LoginState) {
    // 垂直居中
    let form_height = 12u16;
    let v_pad = area.height.saturating_sub(form_height) / 2;
    let v_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(v_pad),
            Constraint::Length(form_height),
            Constraint::Min(0),
        ])
        .split(area);

    // 水平居中，表单宽度 44
    let form_width = 44u16.min(area.width.saturating_sub(4));
    let h_pad = area.width.saturating_sub(form_width) / 2;
    let h_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(h_pad),
            Constraint::Length(form_width),
            Constraint::Min(0),
        ])
        .split(v_layout[1]);

    let form_area = h_layout[1];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // 标题
            Constraint::Length(1), // Username 标签
            Constraint::Length(1), // Username 输入
            Constraint::Length(1), // 空行
            Constraint::Length(1), // Password 标签
            Constraint::Length(1), // Password 输入
            Constraint::Length(1), // 空行
            Constraint::Length(1), // 提示行
            Constraint::Length(1), // 空行
            Constraint::Length(1), // 错误信息
            Constraint::Min(0),
        ])
        .split(form_area);

    let title = Paragraph::new(Line::from(Span::styled(
        "SIGN IN",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, rows[0]);

    let editable = !state.submitting;
    let user_focused = editable && state.focused_field == LoginField::Username;
    let pw_focused = editable && state.focused_field == LoginField::Password;

    let label_style = |focused: bool| {
        if focused {
            Theme::highlight()
        } else {
            Theme::secondary()
        }
    };

    frame.render_widget(
        Paragraph::new(Span::styled("Username", label_style(user_focused))),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(build_input_line(
            &state.username,
            state.username_cursor,
            user_focused,
            false,
        )),
        rows[2],
    );

    frame.render_widget(
        Paragraph::new(Span::styled("Password", label_style(pw_focused))),
        rows[4],
    );
    frame.render_widget(
        Paragraph::new(build_input_line(
            &state.password,
            state.password_cursor,
            pw_focused,
            true,
        )),
        rows[5],
    );

    let hint = if state.submitting {
        Line::from(Span::styled("Signing in...", Theme::active()))
    } else {
        Line::from(vec![
            Span::styled("[Enter]", Theme::highlight()),
            Span::raw(" Sign in  "),
            Span::styled("[Tab]", Theme::secondary()),
            Span::raw(" Switch  "),
            Span::styled("[Esc]", Theme::secondary()),
            Span::raw(" Quit"),
        ])
    };
    frame.render_widget(Paragraph::new(hint), rows[7]);

    if let Some(err) = &state.error {
        let err_line = Paragraph::new(Span::styled(super::util::sanitize(err), Theme::error()));
        frame.render_widget(err_line, rows[9]);
    }
}

/// 构建输入行：> content  (光标用反色块表示)
fn build_input_line(
    text: &str,
    cursor: usize,
    is_focused: bool,
    is_password: bool,
) -> Line<'static> {
    let prefix = if is_focused { "> " } else { "  " };
    let display: String = if is_password {
        "\u{2022}".repeat(text.chars().count())
    } else {
        text.to_string()
    };

    if is_focused {
        let before: String = display.chars().take(cursor).collect();
        let cursor_char: String = display
            .chars()
            .nth(cursor)
            .map_or(" ".to_string(), |c| c.to_string());
        let after: String = display.chars().skip(cursor + 1).collect();

        Line::from(vec![
            Span::styled(prefix.to_string(), Theme::active()),
            Span::raw(before),
            Span::styled(
                cursor_char,
                Style::default().add_modifier(Modifier::REVERSED),
            ),
            Span::raw(after),
        ])
    } else {
        Line::from(vec![
            Span::styled(prefix.to_string(), Theme::secondary()),
            Span::styled(display, Theme::secondary()),
        ])
    }
}
