use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// Loop ticks per spinner frame (the loop polls at ~60fps)
const TICKS_PER_FRAME: usize = 5;

// Grid switches to two columns from this inner width
const TWO_COLUMN_MIN_WIDTH: u16 = 30;

const CELL_HEIGHT: u16 = 3;

const ACCENT: Color = Color::Magenta;

pub fn render_header(frame: &mut Frame, title_area: Rect, subtitle_area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "🐾 ペットの名前ジェネレーター",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);

    let subtitle = Paragraph::new(
        "あなたの新しい家族にぴったりの、かわいくて覚えやすいカタカナの名前を見つけましょう！",
    )
    .style(Style::default().fg(Color::Gray))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    frame.render_widget(title, title_area);
    frame.render_widget(subtitle, subtitle_area);
}

pub fn render_category_selector(frame: &mut Frame, app: &App, area: Rect) {
    let enabled = app.can_generate();
    let (text_style, border_style) = if enabled {
        (
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            Style::default().fg(ACCENT),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    };

    let position = format!(
        " {}/{} ",
        app.selected_index() + 1,
        app.categories().len()
    );

    let selector = Paragraph::new(Line::from(vec![
        Span::styled("◀ ", border_style),
        Span::styled(app.selected_category(), text_style),
        Span::styled(" ▶", border_style),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 動物の種類を選択してください: ")
            .title_bottom(Line::from(position).right_aligned())
            .border_style(border_style),
    );

    frame.render_widget(selector, area);
}

pub fn render_generate_button(frame: &mut Frame, app: &App, area: Rect) {
    let (label, style) = if app.is_loading() {
        let spinner = SPINNER_FRAMES[(app.spinner_tick / TICKS_PER_FRAME) % SPINNER_FRAMES.len()];
        (
            format!("{spinner} 生成中..."),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            "名前を生成する".to_string(),
            Style::default()
                .fg(Color::White)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        )
    };

    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));

    frame.render_widget(button, area);
}

pub fn render_error_panel(frame: &mut Frame, message: &str, area: Rect) {
    let panel = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    " エラーが発生しました: ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ))
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(panel, area);
}

/// One bordered cell per name, filled row by row so reading order matches the list.
pub fn render_name_grid(frame: &mut Frame, names: &[String], area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " 候補の名前: ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns: u16 = if inner.width >= TWO_COLUMN_MIN_WIDTH { 2 } else { 1 };
    let per_row = usize::from(columns);

    let row_count = names.len().div_ceil(per_row);
    let mut row_constraints = vec![Constraint::Length(CELL_HEIGHT); row_count];
    row_constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(inner);

    let cell_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    for (row_area, row_names) in rows.iter().zip(names.chunks(per_row)) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, u32::from(columns)); per_row])
            .split(*row_area);

        for (cell_area, name) in cells.iter().zip(row_names) {
            let cell = Paragraph::new(name.as_str())
                .alignment(Alignment::Center)
                .style(cell_style)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                );
            frame.render_widget(cell, *cell_area);
        }
    }
}

pub fn render_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.exit_pending {
        (
            "Press Ctrl+C again to exit, Esc to cancel",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "←/→: Pet type | Enter: Generate | Ctrl+H: Help | Ctrl+C: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    let bar = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(style);

    frame.render_widget(bar, area);
}

pub fn render_help_window(frame: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            "PetNames - Keyboard Shortcuts",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("General:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Ctrl+H        - Show/hide this help"),
        Line::from("  Ctrl+Q        - Quit application"),
        Line::from("  Ctrl+C        - Quit application (press twice)"),
        Line::from(""),
        Line::from(Span::styled("Generator:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Left/Right    - Previous/next pet type"),
        Line::from("  Up/Down       - Previous/next pet type"),
        Line::from("  Enter         - Generate names"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Ctrl+H or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(ACCENT)),
        )
        .wrap(Wrap { trim: false });

    let popup_width = 52;
    let popup_height = 15;
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: popup_width.min(area.width),
        height: popup_height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help_paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::rendered_rows;

    #[test]
    fn test_spinner_frame_advances_with_ticks() {
        let mut app = App::default();
        app.begin_generation();
        let first = rendered_rows(&app, 60, 30).join("\n");

        for _ in 0..TICKS_PER_FRAME {
            app.tick();
        }
        let second = rendered_rows(&app, 60, 30).join("\n");

        assert!(first.contains(SPINNER_FRAMES[0]));
        assert!(second.contains(SPINNER_FRAMES[1]));
    }

    #[test]
    fn test_selector_shows_position() {
        let mut app = App::default();
        app.select_next();
        let text = rendered_rows(&app, 60, 30).join("\n");
        assert!(text.contains("猫"));
        assert!(text.contains(&format!("2/{}", app.categories().len())));
    }

    #[test]
    fn test_narrow_grid_uses_one_column() {
        let names: Vec<String> = vec!["AAA".to_string(), "BBB".to_string()];
        let mut app = App::default();
        app.begin_generation();
        app.handle_event(crate::events::AppEvent::NamesGenerated(names));

        let rows = rendered_rows(&app, 24, 30);
        let row_a = rows.iter().position(|r| r.contains("AAA")).unwrap();
        let row_b = rows.iter().position(|r| r.contains("BBB")).unwrap();
        assert!(row_b > row_a);

        let rows = rendered_rows(&app, 80, 30);
        let row_a = rows.iter().position(|r| r.contains("AAA")).unwrap();
        let row_b = rows.iter().position(|r| r.contains("BBB")).unwrap();
        assert_eq!(row_a, row_b);
    }

    #[test]
    fn test_exit_pending_prompt() {
        let mut app = App::default();
        app.exit_pending = true;
        let text = rendered_rows(&app, 80, 30).join("\n");
        assert!(text.contains("PressCtrl+Cagaintoexit"));
    }
}
