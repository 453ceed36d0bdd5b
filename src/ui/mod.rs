pub mod widgets;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(2), // Subtitle
            Constraint::Length(1), // Empty gap
            Constraint::Length(3), // Category selector
            Constraint::Length(3), // Generate button
            Constraint::Length(1), // Empty gap
            Constraint::Min(0),    // Error panel or name grid
            Constraint::Length(1), // Bottom keymap bar
        ])
        .split(frame.area());

    widgets::render_header(frame, chunks[0], chunks[1]);
    widgets::render_category_selector(frame, app, chunks[3]);
    widgets::render_generate_button(frame, app, chunks[4]);

    if let Some(message) = app.error_message() {
        widgets::render_error_panel(frame, message, chunks[6]);
    } else if !app.names().is_empty() {
        widgets::render_name_grid(frame, app.names(), chunks[6]);
    }

    widgets::render_bottom_bar(frame, app, chunks[7]);

    if app.show_help {
        widgets::render_help_window(frame, frame.area());
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::rendered_text;
    use crate::app::{App, RequestState, UNKNOWN_ERROR_MESSAGE};
    use crate::events::AppEvent;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    fn entries_after_header(text: &str, list: &[&str]) -> Vec<usize> {
        let start = text.find("候補の名前").expect("results header is rendered");
        list.iter()
            .map(|name| start + text[start..].find(name).expect("name is rendered"))
            .collect()
    }

    #[test]
    fn test_idle_shows_form_only() {
        let text = rendered_text(&App::default());
        assert!(text.contains("ペットの名前ジェネレーター"));
        assert!(text.contains("犬"));
        assert!(text.contains("名前を生成する"));
        assert!(!text.contains("候補の名前"));
        assert!(!text.contains("エラーが発生しました"));
    }

    #[test]
    fn test_dog_names_render_in_order() {
        let list = ["ポチ", "ココ", "マロン", "ソラ", "ルナ"];
        let mut app = App::default();
        assert_eq!(app.begin_generation().as_deref(), Some("犬"));
        app.handle_event(AppEvent::NamesGenerated(names(&list)));

        let text = rendered_text(&app);
        let positions = entries_after_header(&text, &list);

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(!text.contains("エラーが発生しました"));
    }

    #[test]
    fn test_every_name_gets_one_cell() {
        for count in 1..=7 {
            let list: Vec<String> = (0..count).map(|i| format!("Name{i}x")).collect();
            let mut app = App::default();
            app.begin_generation();
            app.handle_event(AppEvent::NamesGenerated(list.clone()));

            let text = rendered_text(&app);
            for name in &list {
                assert_eq!(text.matches(name.as_str()).count(), 1, "{name} rendered once");
            }
        }
    }

    #[test]
    fn test_error_panel_shows_message() {
        let mut app = App::default();
        app.begin_generation();
        app.handle_event(AppEvent::GenerationFailed("quota exceeded".to_string()));

        let text = rendered_text(&app);
        assert!(text.contains("エラーが発生しました"));
        assert!(text.contains("quotaexceeded"));
        assert!(!text.contains("候補の名前"));
    }

    #[test]
    fn test_unknown_failure_shows_fallback() {
        let mut app = App::default();
        app.begin_generation();
        app.handle_event(AppEvent::GenerationAborted);

        let text = rendered_text(&app);
        assert!(text.contains(UNKNOWN_ERROR_MESSAGE));
    }

    #[test]
    fn test_loading_disables_button() {
        let mut app = App::default();
        app.begin_generation();

        let text = rendered_text(&app);
        assert!(text.contains("生成中"));
        assert!(!text.contains("名前を生成する"));

        app.handle_event(AppEvent::NamesGenerated(names(&["ミケ"])));
        let text = rendered_text(&app);
        assert!(text.contains("名前を生成する"));
        assert!(!text.contains("生成中"));
    }

    #[test]
    fn test_new_generation_clears_previous_results() {
        let mut app = App::default();
        app.request = RequestState::Succeeded(names(&["ポチ"]));
        assert!(rendered_text(&app).contains("ポチ"));

        app.begin_generation();
        let text = rendered_text(&app);
        assert!(!text.contains("ポチ"));
        assert!(!text.contains("候補の名前"));
    }

    #[test]
    fn test_help_window_renders() {
        let mut app = App::default();
        app.toggle_help();
        assert!(rendered_text(&app).contains("KeyboardShortcuts"));
    }

    #[test]
    fn test_render_survives_tiny_terminal() {
        let mut app = App::default();
        app.request = RequestState::Succeeded(names(&["ポチ", "ココ"]));
        let rows = super::test_support::rendered_rows(&app, 10, 5);
        assert_eq!(rows.len(), 5);
    }
}
